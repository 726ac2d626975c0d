//! Diagnostic test records and resistance profiles.

use serde::{Deserialize, Serialize};

/// Processing state of a diagnostic test. `Completed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    Processing,
    Completed,
}

/// Final outcome of a completed test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TestResult {
    Negative,
    Positive,
}

/// First-line and second-line drugs covered by the resistance profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Drug {
    Rifampicin,
    Isoniazid,
    Fluoroquinolones,
    Injectables,
    Pyrazinamide,
}

impl Drug {
    pub fn as_str(&self) -> &'static str {
        match self {
            Drug::Rifampicin => "rifampicin",
            Drug::Isoniazid => "isoniazid",
            Drug::Fluoroquinolones => "fluoroquinolones",
            Drug::Injectables => "injectables",
            Drug::Pyrazinamide => "pyrazinamide",
        }
    }
}

/// Susceptibility of the pathogen to one drug.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum Susceptibility {
    Sensitive,
    Resistant,
}

/// Drug-by-drug susceptibility mapping, present only on positive results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ResistanceProfile(pub Vec<(Drug, Susceptibility)>);

impl ResistanceProfile {
    /// Profile for an MDR-positive resolution: first-line resistance only.
    pub fn mdr() -> Self {
        Self(vec![
            (Drug::Rifampicin, Susceptibility::Resistant),
            (Drug::Isoniazid, Susceptibility::Resistant),
        ])
    }

    /// Profile for an XDR-positive resolution: first- and second-line
    /// resistance.
    pub fn xdr() -> Self {
        Self(vec![
            (Drug::Rifampicin, Susceptibility::Resistant),
            (Drug::Isoniazid, Susceptibility::Resistant),
            (Drug::Fluoroquinolones, Susceptibility::Resistant),
            (Drug::Injectables, Susceptibility::Resistant),
        ])
    }

    /// XDR profile extended with pyrazinamide, as reported by reference
    /// laboratories that assay it.
    pub fn xdr_with_pyrazinamide() -> Self {
        let mut profile = Self::xdr();
        profile.0.push((Drug::Pyrazinamide, Susceptibility::Resistant));
        profile
    }

    /// Pre-XDR profile: fluoroquinolone resistance with injectables still
    /// sensitive.
    pub fn pre_xdr() -> Self {
        Self(vec![
            (Drug::Rifampicin, Susceptibility::Resistant),
            (Drug::Isoniazid, Susceptibility::Resistant),
            (Drug::Fluoroquinolones, Susceptibility::Resistant),
            (Drug::Injectables, Susceptibility::Sensitive),
        ])
    }

    pub fn is_resistant(&self, drug: Drug) -> bool {
        self.0
            .iter()
            .any(|(d, s)| *d == drug && *s == Susceptibility::Resistant)
    }
}

/// A diagnostic test record.
///
/// Created on test start, mutated only by the lifecycle tick/resolve path,
/// immutable once `Completed`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticTest {
    /// Unique test identifier (e.g. "T001")
    pub test_id: String,
    /// Patient the sample was drawn from. Not required to reference a
    /// registered patient; downstream joins render missing patients as
    /// "Unknown".
    pub patient_id: String,
    pub status: TestStatus,
    /// Remaining processing time units; meaningful only while `Processing`
    pub time_remaining: u32,
    pub result: Option<TestResult>,
    pub resistance_profile: Option<ResistanceProfile>,
    pub mdr_detected: bool,
    pub xdr_detected: bool,
    pub pre_xdr: bool,
    /// Unix millis when the test was started
    pub started_at_ms: u64,
}

impl DiagnosticTest {
    /// Create a new test in `Processing` state with the given time budget.
    pub fn new(
        test_id: impl Into<String>,
        patient_id: impl Into<String>,
        budget: u32,
        now_ms: u64,
    ) -> Self {
        Self {
            test_id: test_id.into(),
            patient_id: patient_id.into(),
            status: TestStatus::Processing,
            time_remaining: budget,
            result: None,
            resistance_profile: None,
            mdr_detected: false,
            xdr_detected: false,
            pre_xdr: false,
            started_at_ms: now_ms,
        }
    }

    pub fn is_processing(&self) -> bool {
        self.status == TestStatus::Processing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_test_is_processing() {
        let t = DiagnosticTest::new("T100", "P001", 90, 0);
        assert!(t.is_processing());
        assert_eq!(t.time_remaining, 90);
        assert!(t.result.is_none());
        assert!(t.resistance_profile.is_none());
    }

    #[test]
    fn test_xdr_profile_fully_resistant() {
        let p = ResistanceProfile::xdr();
        assert!(p.is_resistant(Drug::Rifampicin));
        assert!(p.is_resistant(Drug::Fluoroquinolones));
        assert!(p.is_resistant(Drug::Injectables));
    }

    #[test]
    fn test_pre_xdr_profile_spares_injectables() {
        let p = ResistanceProfile::pre_xdr();
        assert!(p.is_resistant(Drug::Fluoroquinolones));
        assert!(!p.is_resistant(Drug::Injectables));
    }

    #[test]
    fn test_mdr_profile_first_line_only() {
        let p = ResistanceProfile::mdr();
        assert!(p.is_resistant(Drug::Rifampicin));
        assert!(p.is_resistant(Drug::Isoniazid));
        assert!(!p.is_resistant(Drug::Fluoroquinolones));
    }
}
