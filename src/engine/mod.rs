//! Engine context: owns every mutable aggregate and exposes the operations
//! consumed by the presentation layer.
//!
//! One `Engine` instance per process. Cloning is cheap (shared aggregates)
//! and every clone drives the same state, so the scheduler tasks and any
//! number of readers can hold their own handle.

mod scheduler;

use std::sync::{Arc, RwLock};
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::{debug, info};

use crate::alerts::AlertManager;
use crate::config::EngineConfig;
use crate::errors::Result;
use crate::lifecycle::{Outcome, Resolution, TestTracker};
use crate::monitor::ProgressionMonitor;
use crate::registry::{demo_hygiene, demo_patients, demo_zones, PatientRegistry};
use crate::scoring::{self, ScoreResult};
use crate::types::{
    Alert, AlertKind, DiagnosticTest, HygieneRecord, Patient, ResistanceProfile, ResistanceStatus,
    RiskFactors, TestResult, TestStatus, WardSummary, Zone,
};

use scheduler::Scheduler;

/// Read-only reference data for reporting.
#[derive(Default)]
struct ReferenceData {
    zones: Vec<Zone>,
    hygiene: Vec<HygieneRecord>,
}

/// The engine context object.
#[derive(Clone)]
pub struct Engine {
    config: EngineConfig,
    patients: Arc<PatientRegistry>,
    tests: Arc<TestTracker>,
    alerts: Arc<AlertManager>,
    monitor: ProgressionMonitor,
    reference: Arc<RwLock<ReferenceData>>,
    scheduler: Arc<Scheduler>,
}

impl Engine {
    /// Build an engine from a validated configuration.
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            patients: Arc::new(PatientRegistry::new()),
            tests: Arc::new(TestTracker::new(config.resolution.clone())),
            alerts: Arc::new(AlertManager::new(config.alerts.clone())),
            monitor: ProgressionMonitor::new(),
            reference: Arc::new(RwLock::new(ReferenceData::default())),
            scheduler: Arc::new(Scheduler::default()),
            config,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // === Scoring ===

    /// Score a factor bundle. Pure; does not touch any patient record.
    pub fn score_factors(&self, factors: &RiskFactors) -> ScoreResult {
        scoring::score(factors)
    }

    /// Score a factor bundle and apply the result to a registered patient,
    /// raising a `HighRiskAssessment` alert when the level is actionable.
    /// Returns `None` for unknown patients.
    pub fn assess_patient(&self, patient_id: &str, factors: &RiskFactors) -> Option<ScoreResult> {
        let result = scoring::score(factors);
        if !self.patients.apply_assessment(patient_id, &result) {
            return None;
        }
        if result.level.is_actionable() {
            self.alerts.raise(
                AlertKind::HighRiskAssessment,
                patient_id,
                3,
                format!(
                    "Patient scored {} - Enhanced monitoring required",
                    result.score
                ),
                now_ms(),
            );
        }
        Some(result)
    }

    // === Diagnostic tests ===

    /// Start a new test and return its id. Unknown patient ids are accepted;
    /// joins downstream render the patient as "Unknown".
    pub fn start_test(&self, patient_id: &str) -> String {
        self.tests.start_test(patient_id, now_ms()).test_id
    }

    pub fn tests(&self) -> Vec<DiagnosticTest> {
        self.tests.tests()
    }

    pub fn test(&self, test_id: &str) -> Option<DiagnosticTest> {
        self.tests.get(test_id)
    }

    /// Resolve a processing test immediately (operator shortcut). No-op on
    /// unknown or completed tests.
    pub fn resolve_test_now(&self, test_id: &str) -> Option<DiagnosticTest> {
        let resolution = self.tests.resolve_now(test_id)?;
        self.handle_resolutions(std::iter::once(resolution), now_ms());
        self.tests.get(test_id)
    }

    // === Alerts ===

    /// Alert history, most recent first.
    pub fn alerts(&self) -> Vec<Alert> {
        self.alerts.alerts()
    }

    /// Acknowledge an alert; silently ignores unknown ids.
    pub fn acknowledge_alert(&self, alert_id: u64) {
        self.alerts.acknowledge(alert_id);
    }

    pub fn active_alert_count(&self) -> usize {
        self.alerts.active_count()
    }

    pub fn has_critical_outbreak(&self) -> bool {
        self.alerts.has_critical_outbreak()
    }

    // === Patients ===

    pub fn register_patient(&self, patient: Patient) {
        self.patients.insert(patient);
    }

    pub fn patients(&self) -> Vec<Patient> {
        self.patients.list()
    }

    pub fn patient(&self, patient_id: &str) -> Option<Patient> {
        self.patients.get(patient_id)
    }

    // === Reporting ===

    /// Aggregate counters over the current patient and test state.
    pub fn ward_summary(&self) -> WardSummary {
        let patients = self.patients.list();
        WardSummary {
            xdr_cases: patients
                .iter()
                .filter(|p| p.resistance == ResistanceStatus::Xdr)
                .count(),
            mdr_cases: patients
                .iter()
                .filter(|p| p.resistance.is_progression_candidate())
                .count(),
            high_risk: patients.iter().filter(|p| p.risk_level.is_actionable()).count(),
            active_tests: self.tests.active_count(),
        }
    }

    pub fn zones(&self) -> Vec<Zone> {
        self.reference.read().unwrap().zones.clone()
    }

    pub fn hygiene(&self) -> Vec<HygieneRecord> {
        self.reference.read().unwrap().hygiene.clone()
    }

    // === Scheduler control ===

    /// Start the three periodic tasks. Errors if already running. Must be
    /// called from within a tokio runtime.
    pub fn start(&self) -> Result<()> {
        self.scheduler.start(self.clone())
    }

    /// Stop all periodic tasks and wait for them to finish their current
    /// cycle. Errors if not running.
    pub async fn stop(&self) -> Result<()> {
        self.scheduler.stop().await
    }

    pub fn is_running(&self) -> bool {
        self.scheduler.is_running()
    }

    // === Periodic cycles ===

    /// Fine-grained countdown tick: advance processing tests, act on any
    /// resolutions.
    pub(crate) fn countdown_cycle(&self) -> Result<()> {
        let resolutions = self.tests.tick();
        // The test store lock is released before alerts are raised.
        self.handle_resolutions(resolutions.into_iter(), now_ms());
        Ok(())
    }

    /// Coarse status refresh: re-log the current picture.
    pub(crate) fn refresh_cycle(&self) -> Result<()> {
        let summary = self.ward_summary();
        debug!(
            active_tests = summary.active_tests,
            active_alerts = self.alerts.active_count(),
            xdr_cases = summary.xdr_cases,
            "status refresh"
        );
        Ok(())
    }

    /// Progression sweep over the current patient snapshot.
    pub(crate) fn sweep_cycle(&self) -> Result<()> {
        self.monitor
            .sweep(&self.patients.list(), &self.alerts, now_ms());
        Ok(())
    }

    /// Apply resolution outcomes: resistance upgrades and detection alerts.
    fn handle_resolutions(&self, resolutions: impl Iterator<Item = Resolution>, now_ms: u64) {
        for resolution in resolutions {
            match resolution.outcome {
                Outcome::Negative => {}
                Outcome::Mdr => {
                    self.upgrade_resistance(&resolution.patient_id, ResistanceStatus::Mdr);
                    self.alerts.raise(
                        AlertKind::MdrDetection,
                        &resolution.patient_id,
                        4,
                        "Multi-Drug Resistant TB confirmed - Enhanced isolation required",
                        now_ms,
                    );
                }
                Outcome::Xdr => {
                    self.upgrade_resistance(&resolution.patient_id, ResistanceStatus::Xdr);
                    self.alerts.raise(
                        AlertKind::XdrOutbreak,
                        &resolution.patient_id,
                        5,
                        "Extensively Drug-Resistant TB confirmed - Immediate containment required",
                        now_ms,
                    );
                }
            }
        }
    }

    /// Raise a patient's resistance classification; never downgrades.
    fn upgrade_resistance(&self, patient_id: &str, status: ResistanceStatus) {
        match self.patients.get(patient_id) {
            Some(patient) if patient.resistance < status => {
                self.patients.set_resistance(patient_id, status);
            }
            _ => {}
        }
    }

    // === Demo data ===

    /// Seed the demo dataset: four patients, three tests in
    /// characteristic states, three alerts, and the reporting reference
    /// data.
    pub fn seed_demo(&self) {
        let now = now_ms();
        for patient in demo_patients() {
            self.patients.insert(patient);
        }

        // Halfway through its 90-unit budget.
        let mut t001 = DiagnosticTest::new("T001", "P001", 90, now - 45 * 60 * 1000);
        t001.time_remaining = 45;
        self.tests.insert(t001);

        let mut t002 = DiagnosticTest::new("T002", "P003", 90, now - 90 * 60 * 1000);
        t002.status = TestStatus::Completed;
        t002.time_remaining = 0;
        t002.result = Some(TestResult::Positive);
        t002.mdr_detected = true;
        t002.xdr_detected = true;
        t002.resistance_profile = Some(ResistanceProfile::xdr_with_pyrazinamide());
        self.tests.insert(t002);

        let mut t003 = DiagnosticTest::new("T003", "P004", 90, now - 90 * 60 * 1000);
        t003.status = TestStatus::Completed;
        t003.time_remaining = 0;
        t003.result = Some(TestResult::Positive);
        t003.mdr_detected = true;
        t003.pre_xdr = true;
        t003.resistance_profile = Some(ResistanceProfile::pre_xdr());
        self.tests.insert(t003);

        self.alerts.raise(
            AlertKind::HighRiskAssessment,
            "P001",
            3,
            "Patient scored 22 - Enhanced monitoring required",
            now - 30 * 60 * 1000,
        );
        self.alerts.raise(
            AlertKind::PreXdrHighRisk,
            "P004",
            4,
            "Pre-XDR case with high progression risk",
            now - 15 * 60 * 1000,
        );
        self.alerts.raise(
            AlertKind::XdrOutbreak,
            "P003",
            5,
            "Extensively Drug-Resistant TB detected - Immediate isolation required",
            now - 2 * 60 * 1000,
        );
        // The assessment alert starts acknowledged in the demo set.
        if let Some(a) = self
            .alerts
            .alerts()
            .iter()
            .find(|a| a.kind == AlertKind::HighRiskAssessment)
        {
            self.alerts.acknowledge(a.alert_id);
        }

        let mut reference = self.reference.write().unwrap();
        reference.zones = demo_zones();
        reference.hygiene = demo_hygiene();

        info!(
            patients = self.patients.len(),
            tests = self.tests.tests().len(),
            alerts = self.alerts.count(),
            "demo data seeded"
        );
    }
}

/// Wall-clock unix millis.
fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
