//! Patient record and its classification enums.

use serde::{Deserialize, Serialize};

/// Hospital ward a patient is admitted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Ward {
    Icu,
    General,
    Isolation,
    Emergency,
}

impl Ward {
    pub fn as_str(&self) -> &'static str {
        match self {
            Ward::Icu => "ICU",
            Ward::General => "General",
            Ward::Isolation => "Isolation",
            Ward::Emergency => "Emergency",
        }
    }
}

/// Resistance classification of a patient's most recent confirmed pathogen.
/// Ordered by severity.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize,
)]
pub enum ResistanceStatus {
    /// No resistant pathogen confirmed
    #[default]
    None,
    /// Multi-drug resistant
    Mdr,
    /// Intermediate profile with elevated progression risk toward XDR
    PreXdr,
    /// Extensively drug resistant
    Xdr,
}

impl ResistanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResistanceStatus::None => "None",
            ResistanceStatus::Mdr => "MDR",
            ResistanceStatus::PreXdr => "Pre-XDR",
            ResistanceStatus::Xdr => "XDR",
        }
    }

    /// Whether this status puts the patient in the progression sweep set.
    pub fn is_progression_candidate(&self) -> bool {
        matches!(self, ResistanceStatus::Mdr | ResistanceStatus::PreXdr)
    }
}

/// Risk level derived from a numeric score.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize,
)]
pub enum RiskLevel {
    #[default]
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
            RiskLevel::Critical => "Critical",
        }
    }

    /// Is this level actionable (High or Critical)?
    pub fn is_actionable(&self) -> bool {
        matches!(self, RiskLevel::High | RiskLevel::Critical)
    }
}

/// A registered patient.
///
/// Risk fields are mutated only by applying a scoring result; resistance
/// status only by the test lifecycle on a positive resistant result.
/// Patients are never deleted during a session.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    /// Unique patient identifier (e.g. "P001")
    pub patient_id: String,
    /// Display name
    pub name: String,
    /// Age in years
    pub age: u16,
    /// Admitting ward
    pub ward: Ward,
    /// Current risk score (0-30)
    pub risk_score: u8,
    /// Risk level derived from the score
    pub risk_level: RiskLevel,
    /// Resistance classification
    pub resistance: ResistanceStatus,
    /// XDR progression risk as last assessed
    pub xdr_risk: RiskLevel,
}

impl Patient {
    /// Create a freshly registered patient with no assessment on record.
    pub fn new(patient_id: impl Into<String>, name: impl Into<String>, age: u16, ward: Ward) -> Self {
        Self {
            patient_id: patient_id.into(),
            name: name.into(),
            age,
            ward,
            risk_score: 0,
            risk_level: RiskLevel::Low,
            resistance: ResistanceStatus::None,
            xdr_risk: RiskLevel::Low,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_level_ordering() {
        assert!(RiskLevel::Low < RiskLevel::Medium);
        assert!(RiskLevel::Medium < RiskLevel::High);
        assert!(RiskLevel::High < RiskLevel::Critical);
    }

    #[test]
    fn test_actionable_levels() {
        assert!(!RiskLevel::Low.is_actionable());
        assert!(!RiskLevel::Medium.is_actionable());
        assert!(RiskLevel::High.is_actionable());
        assert!(RiskLevel::Critical.is_actionable());
    }

    #[test]
    fn test_progression_candidates() {
        assert!(!ResistanceStatus::None.is_progression_candidate());
        assert!(ResistanceStatus::Mdr.is_progression_candidate());
        assert!(ResistanceStatus::PreXdr.is_progression_candidate());
        assert!(!ResistanceStatus::Xdr.is_progression_candidate());
    }

    #[test]
    fn test_new_patient_defaults() {
        let p = Patient::new("P010", "Test Patient", 40, Ward::General);
        assert_eq!(p.risk_score, 0);
        assert_eq!(p.risk_level, RiskLevel::Low);
        assert_eq!(p.resistance, ResistanceStatus::None);
    }
}
