//! Thread-safe alert store with idempotent raise and acknowledgment.
//!
//! The store enforces one invariant: at most one unacknowledged alert of a
//! given kind exists per patient. Raising a duplicate is a no-op returning
//! the existing alert, so upstream components need no dedup state of their
//! own.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use tracing::{info, warn};

use crate::config::AlertHistoryConfig;
use crate::types::{Alert, AlertKind};

/// Owns the alert history. Safe to share behind an `Arc`.
pub struct AlertManager {
    config: AlertHistoryConfig,
    /// Most-recent-first; creation order is never disturbed by
    /// acknowledgment.
    alerts: RwLock<VecDeque<Alert>>,
    next_id: AtomicU64,
}

impl AlertManager {
    pub fn new(config: AlertHistoryConfig) -> Self {
        Self {
            config,
            alerts: RwLock::new(VecDeque::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Raise an alert, subject to the dedup invariant: if an unacknowledged
    /// alert of the same (kind, patient) exists, it is returned unchanged
    /// and nothing is inserted.
    pub fn raise(
        &self,
        kind: AlertKind,
        patient_id: &str,
        level: u8,
        description: impl Into<String>,
        now_ms: u64,
    ) -> Alert {
        let mut alerts = self.alerts.write().unwrap();
        if let Some(existing) = alerts
            .iter()
            .find(|a| !a.acknowledged && a.kind == kind && a.patient_id == patient_id)
        {
            return existing.clone();
        }

        let alert = Alert::new(
            self.next_id.fetch_add(1, Ordering::SeqCst),
            kind,
            patient_id,
            level,
            description,
            now_ms,
        );
        match level {
            5 => warn!(kind = kind.as_str(), patient_id, "critical alert raised"),
            _ => info!(kind = kind.as_str(), patient_id, level, "alert raised"),
        }
        alerts.push_front(alert.clone());
        Self::trim(&mut alerts, self.config.capacity);
        alert
    }

    /// Evict oldest acknowledged entries above capacity. Unacknowledged
    /// alerts are never evicted, so the dedup invariant and the open-alert
    /// audit trail survive trimming.
    fn trim(alerts: &mut VecDeque<Alert>, capacity: usize) {
        while alerts.len() > capacity {
            let Some(idx) = alerts.iter().rposition(|a| a.acknowledged) else {
                break;
            };
            alerts.remove(idx);
        }
    }

    /// Mark an alert acknowledged. Unknown or already-acknowledged ids are a
    /// silent no-op.
    pub fn acknowledge(&self, alert_id: u64) {
        let mut alerts = self.alerts.write().unwrap();
        for alert in alerts.iter_mut() {
            if alert.alert_id == alert_id {
                alert.acknowledged = true;
                break;
            }
        }
    }

    /// Full history, most recent first.
    pub fn alerts(&self) -> Vec<Alert> {
        self.alerts.read().unwrap().iter().cloned().collect()
    }

    /// Unacknowledged alerts, most recent first.
    pub fn unacknowledged(&self) -> Vec<Alert> {
        self.alerts
            .read()
            .unwrap()
            .iter()
            .filter(|a| !a.acknowledged)
            .cloned()
            .collect()
    }

    /// Count of unacknowledged alerts.
    pub fn active_count(&self) -> usize {
        self.alerts
            .read()
            .unwrap()
            .iter()
            .filter(|a| !a.acknowledged)
            .count()
    }

    /// True if any unacknowledged alert denotes an XDR outbreak.
    pub fn has_critical_outbreak(&self) -> bool {
        self.alerts
            .read()
            .unwrap()
            .iter()
            .any(|a| !a.acknowledged && a.kind.is_outbreak())
    }

    /// Total alert count, acknowledged included.
    pub fn count(&self) -> usize {
        self.alerts.read().unwrap().len()
    }
}
