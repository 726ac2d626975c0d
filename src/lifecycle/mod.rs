//! Diagnostic test lifecycle: Processing -> Completed, driven by scheduler
//! ticks, with stochastic resolution.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, RwLock};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::config::ResolutionConfig;
use crate::types::{DiagnosticTest, ResistanceProfile, TestResult, TestStatus};

/// Category drawn at resolution time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Negative,
    Mdr,
    Xdr,
}

/// A resolution event, handed back to the caller so alerts can be raised
/// without the test store locked.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub test_id: String,
    pub patient_id: String,
    pub outcome: Outcome,
}

/// Owns all diagnostic test records and advances their processing state.
///
/// Thread-safe: the record store sits behind its own lock, the RNG behind
/// another, and no lock is held across calls into other components.
pub struct TestTracker {
    config: ResolutionConfig,
    tests: RwLock<Vec<DiagnosticTest>>,
    rng: Mutex<StdRng>,
    next_seq: AtomicU64,
}

impl TestTracker {
    pub fn new(config: ResolutionConfig) -> Self {
        let rng = if config.random_seed > 0 {
            StdRng::seed_from_u64(config.random_seed)
        } else {
            StdRng::from_entropy()
        };
        Self {
            config,
            tests: RwLock::new(Vec::new()),
            rng: Mutex::new(rng),
            next_seq: AtomicU64::new(1),
        }
    }

    /// Start a new test for the given patient. The patient id is accepted
    /// as-is; it does not have to reference a registered patient.
    pub fn start_test(&self, patient_id: impl Into<String>, now_ms: u64) -> DiagnosticTest {
        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst);
        let test = DiagnosticTest::new(
            format!("T{seq:03}"),
            patient_id,
            self.config.initial_budget,
            now_ms,
        );
        debug!(test_id = %test.test_id, patient_id = %test.patient_id, "test started");
        self.tests.write().unwrap().push(test.clone());
        test
    }

    /// Insert a pre-built record (seed data). Keeps the id sequence ahead of
    /// any numeric suffix already in use.
    pub fn insert(&self, test: DiagnosticTest) {
        if let Some(n) = test
            .test_id
            .strip_prefix('T')
            .and_then(|s| s.parse::<u64>().ok())
        {
            self.next_seq.fetch_max(n + 1, Ordering::SeqCst);
        }
        self.tests.write().unwrap().push(test);
    }

    /// Advance every `Processing` test by one time unit, resolving those
    /// that reach zero. Returns the resolutions for the caller to act on.
    pub fn tick(&self) -> Vec<Resolution> {
        let mut resolutions = Vec::new();
        let mut tests = self.tests.write().unwrap();
        for test in tests.iter_mut() {
            if !test.is_processing() {
                continue;
            }
            test.time_remaining = test.time_remaining.saturating_sub(1);
            if test.time_remaining == 0 {
                resolutions.push(self.resolve(test));
            }
        }
        resolutions
    }

    /// Resolve a test immediately regardless of its remaining time.
    /// Returns `None` if the id is unknown or the test is already
    /// `Completed` (resolution is a one-shot transition).
    pub fn resolve_now(&self, test_id: &str) -> Option<Resolution> {
        let mut tests = self.tests.write().unwrap();
        let test = tests
            .iter_mut()
            .find(|t| t.test_id == test_id && t.is_processing())?;
        test.time_remaining = 0;
        Some(self.resolve(test))
    }

    /// Draw an outcome and write the terminal state onto the record.
    fn resolve(&self, test: &mut DiagnosticTest) -> Resolution {
        let outcome = self.draw_outcome();
        test.status = TestStatus::Completed;
        match outcome {
            Outcome::Negative => {
                test.result = Some(TestResult::Negative);
            }
            Outcome::Mdr => {
                test.result = Some(TestResult::Positive);
                test.mdr_detected = true;
                test.resistance_profile = Some(ResistanceProfile::mdr());
            }
            Outcome::Xdr => {
                test.result = Some(TestResult::Positive);
                test.mdr_detected = true;
                test.xdr_detected = true;
                test.resistance_profile = Some(ResistanceProfile::xdr());
            }
        }
        debug!(test_id = %test.test_id, outcome = ?outcome, "test resolved");
        Resolution {
            test_id: test.test_id.clone(),
            patient_id: test.patient_id.clone(),
            outcome,
        }
    }

    /// One sample from the categorical outcome distribution.
    fn draw_outcome(&self) -> Outcome {
        let r: f64 = self.rng.lock().unwrap().gen();
        if r < self.config.p_xdr {
            Outcome::Xdr
        } else if r < self.config.p_xdr + self.config.p_mdr {
            Outcome::Mdr
        } else {
            Outcome::Negative
        }
    }

    /// Snapshot of every test record, in creation order.
    pub fn tests(&self) -> Vec<DiagnosticTest> {
        self.tests.read().unwrap().clone()
    }

    pub fn get(&self, test_id: &str) -> Option<DiagnosticTest> {
        self.tests
            .read()
            .unwrap()
            .iter()
            .find(|t| t.test_id == test_id)
            .cloned()
    }

    /// Number of tests currently `Processing`.
    pub fn active_count(&self) -> usize {
        self.tests
            .read()
            .unwrap()
            .iter()
            .filter(|t| t.is_processing())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(seed: u64, budget: u32) -> TestTracker {
        TestTracker::new(ResolutionConfig {
            initial_budget: budget,
            random_seed: seed,
            ..Default::default()
        })
    }

    #[test]
    fn test_start_assigns_sequential_ids() {
        let tracker = seeded(7, 90);
        let a = tracker.start_test("P001", 0);
        let b = tracker.start_test("P002", 0);
        assert_eq!(a.test_id, "T001");
        assert_eq!(b.test_id, "T002");
    }

    #[test]
    fn test_unknown_patient_accepted() {
        let tracker = seeded(7, 90);
        let t = tracker.start_test("P999", 0);
        assert_eq!(t.patient_id, "P999");
        assert!(t.is_processing());
    }

    #[test]
    fn test_tick_decrements_to_resolution() {
        let tracker = seeded(7, 3);
        let t = tracker.start_test("P001", 0);
        assert!(tracker.tick().is_empty());
        assert!(tracker.tick().is_empty());
        let resolved = tracker.tick();
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].test_id, t.test_id);
        let done = tracker.get(&t.test_id).unwrap();
        assert_eq!(done.status, TestStatus::Completed);
        assert!(done.result.is_some());
        assert_eq!(done.time_remaining, 0);
    }

    #[test]
    fn test_completed_test_is_terminal() {
        let tracker = seeded(7, 1);
        let t = tracker.start_test("P001", 0);
        assert_eq!(tracker.tick().len(), 1);
        let after_first = tracker.get(&t.test_id).unwrap();

        // Further ticks and explicit re-resolution leave the record alone.
        assert!(tracker.tick().is_empty());
        assert!(tracker.resolve_now(&t.test_id).is_none());
        let after_second = tracker.get(&t.test_id).unwrap();
        assert_eq!(after_first.status, after_second.status);
        assert_eq!(after_first.result, after_second.result);
        assert_eq!(
            after_first.resistance_profile,
            after_second.resistance_profile
        );
    }

    #[test]
    fn test_resolve_now_short_circuits_countdown() {
        let tracker = seeded(7, 90);
        let t = tracker.start_test("P001", 0);
        let r = tracker.resolve_now(&t.test_id);
        assert!(r.is_some());
        assert_eq!(tracker.get(&t.test_id).unwrap().status, TestStatus::Completed);
        assert_eq!(tracker.active_count(), 0);
    }

    #[test]
    fn test_xdr_implies_mdr_flag() {
        // Enough resolutions to see every outcome with a fixed seed.
        let tracker = seeded(42, 1);
        for i in 0..200 {
            tracker.start_test(format!("P{i:03}"), 0);
        }
        tracker.tick();
        for t in tracker.tests() {
            if t.xdr_detected {
                assert!(t.mdr_detected, "XDR without MDR flag on {}", t.test_id);
                assert!(t.resistance_profile.is_some());
            }
            if t.result == Some(TestResult::Negative) {
                assert!(t.resistance_profile.is_none());
                assert!(!t.mdr_detected);
            }
        }
    }

    #[test]
    fn test_seeded_distribution_matches_configuration() {
        let tracker = seeded(42, 1);
        let n = 10_000;
        for i in 0..n {
            tracker.start_test(format!("P{i}"), 0);
        }
        let resolutions = tracker.tick();
        assert_eq!(resolutions.len(), n);

        let xdr = resolutions
            .iter()
            .filter(|r| r.outcome == Outcome::Xdr)
            .count() as f64;
        let mdr = resolutions
            .iter()
            .filter(|r| r.outcome == Outcome::Mdr)
            .count() as f64;
        let neg = resolutions
            .iter()
            .filter(|r| r.outcome == Outcome::Negative)
            .count() as f64;

        let n = n as f64;
        assert!((neg / n - 0.60).abs() < 0.03, "negative {}", neg / n);
        assert!((mdr / n - 0.25).abs() < 0.03, "mdr {}", mdr / n);
        assert!((xdr / n - 0.15).abs() < 0.03, "xdr {}", xdr / n);
    }

    #[test]
    fn test_insert_keeps_sequence_ahead_of_seed_ids() {
        let tracker = seeded(7, 90);
        tracker.insert(DiagnosticTest::new("T003", "P004", 90, 0));
        let next = tracker.start_test("P001", 0);
        assert_eq!(next.test_id, "T004");
    }
}
