//! Periodic XDR progression sweep over resistant patients.

use tracing::debug;

use crate::alerts::AlertManager;
use crate::types::{Alert, AlertKind, Patient, ResistanceStatus, RiskLevel, Ward};

/// Stateless progression monitor.
///
/// Evaluates every MDR/Pre-XDR patient against a fixed threshold ladder and
/// raises a `ProgressionRisk` alert on High. All dedup lives in the
/// `AlertManager`, so repeated sweeps over the same snapshot are idempotent.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProgressionMonitor;

impl ProgressionMonitor {
    pub fn new() -> Self {
        Self
    }

    /// Sweep a patient snapshot, raising alerts for High progression risk.
    /// Returns the alerts that came back from the manager (existing ones
    /// included, per its idempotent raise).
    pub fn sweep(&self, patients: &[Patient], alerts: &AlertManager, now_ms: u64) -> Vec<Alert> {
        let mut raised = Vec::new();
        for patient in patients {
            if !patient.resistance.is_progression_candidate() {
                continue;
            }
            let score = Self::progression_score(patient);
            let risk = Self::progression_risk(score);
            debug!(
                patient_id = %patient.patient_id,
                score,
                risk = risk.as_str(),
                "progression sweep"
            );
            if risk == RiskLevel::High {
                raised.push(alerts.raise(
                    AlertKind::ProgressionRisk,
                    &patient.patient_id,
                    4,
                    format!(
                        "Patient {} showing high risk for XDR progression",
                        patient.name
                    ),
                    now_ms,
                ));
            }
        }
        raised
    }

    /// Additive progression score for one patient.
    pub fn progression_score(patient: &Patient) -> u8 {
        let mut score = 0u8;
        if patient.risk_score >= 20 {
            score += 2;
        }
        if patient.ward == Ward::Icu {
            score += 1;
        }
        if patient.age >= 65 {
            score += 1;
        }
        if patient.resistance == ResistanceStatus::PreXdr {
            score += 3;
        }
        score
    }

    /// Map a progression score to its level.
    pub fn progression_risk(score: u8) -> RiskLevel {
        if score >= 4 {
            RiskLevel::High
        } else if score >= 2 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}
