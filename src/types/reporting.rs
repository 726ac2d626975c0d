//! Read-only reference data consumed for reporting.

use serde::{Deserialize, Serialize};

use super::RiskLevel;

/// Infection pressure in one hospital zone. Static external input; the core
/// never mutates it.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    pub zone: String,
    pub infection_count: u32,
    pub risk_level: RiskLevel,
    pub xdr_cases: u32,
}

/// Hand-hygiene compliance for one department. Static external input.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HygieneRecord {
    pub department: String,
    pub hygiene_compliance: u8,
    pub priority: RiskLevel,
}

/// Aggregate counters for the ward dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WardSummary {
    /// Confirmed XDR patients
    pub xdr_cases: usize,
    /// Confirmed MDR and Pre-XDR patients
    pub mdr_cases: usize,
    /// Patients at High or Critical risk level
    pub high_risk: usize,
    /// Tests currently in `Processing`
    pub active_tests: usize,
}
