//! Patient registry: read-mostly reference data for the rest of the engine.

mod demo;

pub use demo::{demo_hygiene, demo_patients, demo_zones};

use std::sync::RwLock;

use tracing::debug;

use crate::scoring::ScoreResult;
use crate::types::{Patient, ResistanceStatus};

/// Owns all patient records. Patients are registered once and never deleted
/// during a session; risk fields change only through `apply_assessment`,
/// resistance status only through `set_resistance`.
#[derive(Default)]
pub struct PatientRegistry {
    patients: RwLock<Vec<Patient>>,
}

impl PatientRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a patient. An existing record with the same id is replaced.
    pub fn insert(&self, patient: Patient) {
        let mut patients = self.patients.write().unwrap();
        if let Some(existing) = patients
            .iter_mut()
            .find(|p| p.patient_id == patient.patient_id)
        {
            *existing = patient;
        } else {
            patients.push(patient);
        }
    }

    pub fn get(&self, patient_id: &str) -> Option<Patient> {
        self.patients
            .read()
            .unwrap()
            .iter()
            .find(|p| p.patient_id == patient_id)
            .cloned()
    }

    /// Snapshot of every patient, in registration order.
    pub fn list(&self) -> Vec<Patient> {
        self.patients.read().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.patients.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.patients.read().unwrap().is_empty()
    }

    /// Apply a scoring result to a patient's risk fields. The only path
    /// that mutates them. Returns false if the patient is unknown.
    pub fn apply_assessment(&self, patient_id: &str, result: &ScoreResult) -> bool {
        let mut patients = self.patients.write().unwrap();
        let Some(patient) = patients.iter_mut().find(|p| p.patient_id == patient_id) else {
            return false;
        };
        patient.risk_score = result.score;
        patient.risk_level = result.level;
        patient.xdr_risk = result.xdr_risk;
        debug!(
            patient_id,
            score = result.score,
            level = result.level.as_str(),
            "assessment applied"
        );
        true
    }

    /// Update a patient's resistance classification. Returns false if the
    /// patient is unknown.
    pub fn set_resistance(&self, patient_id: &str, status: ResistanceStatus) -> bool {
        let mut patients = self.patients.write().unwrap();
        let Some(patient) = patients.iter_mut().find(|p| p.patient_id == patient_id) else {
            return false;
        };
        patient.resistance = status;
        debug!(patient_id, status = status.as_str(), "resistance updated");
        true
    }
}
