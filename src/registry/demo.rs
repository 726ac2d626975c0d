//! Demo dataset for operator walkthroughs and tests.

use crate::types::{HygieneRecord, Patient, ResistanceStatus, RiskLevel, Ward, Zone};

/// The four demo patients.
pub fn demo_patients() -> Vec<Patient> {
    vec![
        Patient {
            patient_id: "P001".to_string(),
            name: "John Doe".to_string(),
            age: 65,
            ward: Ward::Icu,
            risk_score: 22,
            risk_level: RiskLevel::High,
            resistance: ResistanceStatus::Mdr,
            xdr_risk: RiskLevel::Medium,
        },
        Patient {
            patient_id: "P002".to_string(),
            name: "Jane Smith".to_string(),
            age: 34,
            ward: Ward::General,
            risk_score: 12,
            risk_level: RiskLevel::Medium,
            resistance: ResistanceStatus::None,
            xdr_risk: RiskLevel::Low,
        },
        Patient {
            patient_id: "P003".to_string(),
            name: "Robert Johnson".to_string(),
            age: 78,
            ward: Ward::Isolation,
            risk_score: 28,
            risk_level: RiskLevel::Critical,
            resistance: ResistanceStatus::Xdr,
            xdr_risk: RiskLevel::Critical,
        },
        Patient {
            patient_id: "P004".to_string(),
            name: "Maria Garcia".to_string(),
            age: 52,
            ward: Ward::Icu,
            risk_score: 26,
            risk_level: RiskLevel::Critical,
            resistance: ResistanceStatus::PreXdr,
            xdr_risk: RiskLevel::High,
        },
    ]
}

/// Infection pressure per zone.
pub fn demo_zones() -> Vec<Zone> {
    vec![
        Zone {
            zone: "Isolation Unit".to_string(),
            infection_count: 2,
            risk_level: RiskLevel::Critical,
            xdr_cases: 1,
        },
        Zone {
            zone: "ICU".to_string(),
            infection_count: 3,
            risk_level: RiskLevel::High,
            xdr_cases: 0,
        },
        Zone {
            zone: "General Ward".to_string(),
            infection_count: 1,
            risk_level: RiskLevel::Medium,
            xdr_cases: 0,
        },
        Zone {
            zone: "Emergency".to_string(),
            infection_count: 0,
            risk_level: RiskLevel::Low,
            xdr_cases: 0,
        },
    ]
}

/// Hand-hygiene compliance per department.
pub fn demo_hygiene() -> Vec<HygieneRecord> {
    vec![
        HygieneRecord {
            department: "Isolation Unit".to_string(),
            hygiene_compliance: 95,
            priority: RiskLevel::Critical,
        },
        HygieneRecord {
            department: "ICU".to_string(),
            hygiene_compliance: 85,
            priority: RiskLevel::High,
        },
        HygieneRecord {
            department: "General Ward".to_string(),
            hygiene_compliance: 92,
            priority: RiskLevel::Medium,
        },
        HygieneRecord {
            department: "Emergency".to_string(),
            hygiene_compliance: 78,
            priority: RiskLevel::Low,
        },
    ]
}
