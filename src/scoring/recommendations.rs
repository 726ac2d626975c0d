//! Advisory recommendation lookup.
//!
//! A pure table keyed by (risk level, XDR progression level). Identical
//! inputs always yield the identical ordered list.

use smallvec::SmallVec;

use crate::types::RiskLevel;

const CRITICAL: [&str; 4] = [
    "Immediate isolation in negative pressure room",
    "Emergency CBNAAT testing within 2 hours",
    "Notify infection control team immediately",
    "Initiate comprehensive contact tracing",
];

const HIGH: [&str; 3] = [
    "Enhanced monitoring and isolation precautions",
    "Priority CBNAAT testing within 4 hours",
    "Document all contacts in past 48 hours",
];

const MEDIUM: [&str; 3] = [
    "Regular monitoring and assessment",
    "CBNAAT testing if symptoms develop",
    "Consider isolation if clinical suspicion",
];

const LOW: [&str; 2] = [
    "Standard monitoring protocols",
    "Reassess if condition changes",
];

/// Appended when XDR progression risk is High or Critical.
const XDR_BLOCK: [&str; 4] = [
    "Specialized infectious disease consultation",
    "Extended drug susceptibility testing required",
    "Maximum containment protocols",
    "Weekly XDR progression monitoring",
];

/// Ordered advisories for a (risk level, XDR progression level) pair.
pub fn recommendations_for(
    level: RiskLevel,
    xdr_risk: RiskLevel,
) -> SmallVec<[&'static str; 8]> {
    let base: &[&'static str] = match level {
        RiskLevel::Critical => &CRITICAL,
        RiskLevel::High => &HIGH,
        RiskLevel::Medium => &MEDIUM,
        RiskLevel::Low => &LOW,
    };

    let mut out: SmallVec<[&'static str; 8]> = SmallVec::from_slice(base);
    if xdr_risk.is_actionable() {
        out.extend_from_slice(&XDR_BLOCK);
    }
    out
}
