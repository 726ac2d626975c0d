//! Alert records.

use serde::{Deserialize, Serialize};

/// Category of alert, the dedup key together with the patient id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum AlertKind {
    /// Confirmed XDR case - the highest-severity event in the system
    XdrOutbreak,
    /// Confirmed MDR case
    MdrDetection,
    /// MDR/Pre-XDR patient at high risk of progressing to XDR
    ProgressionRisk,
    /// Risk assessment scored High or Critical
    HighRiskAssessment,
    /// Pre-XDR case flagged at registration or import
    PreXdrHighRisk,
}

impl AlertKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertKind::XdrOutbreak => "XdrOutbreak",
            AlertKind::MdrDetection => "MdrDetection",
            AlertKind::ProgressionRisk => "ProgressionRisk",
            AlertKind::HighRiskAssessment => "HighRiskAssessment",
            AlertKind::PreXdrHighRisk => "PreXdrHighRisk",
        }
    }

    /// Does this kind denote a confirmed XDR outbreak?
    pub fn is_outbreak(&self) -> bool {
        matches!(self, AlertKind::XdrOutbreak)
    }
}

/// An alert instance. Part of the permanent audit trail; mutated only by
/// acknowledgment.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    /// Unique identifier, monotonically increasing
    pub alert_id: u64,
    /// Severity level, 1 (informational) to 5 (outbreak)
    pub level: u8,
    pub kind: AlertKind,
    /// Subject patient
    pub patient_id: String,
    /// Unix timestamp in milliseconds when the alert was raised
    pub timestamp_ms: u64,
    pub acknowledged: bool,
    pub description: String,
}

impl Alert {
    pub fn new(
        alert_id: u64,
        kind: AlertKind,
        patient_id: impl Into<String>,
        level: u8,
        description: impl Into<String>,
        timestamp_ms: u64,
    ) -> Self {
        Self {
            alert_id,
            level,
            kind,
            patient_id: patient_id.into(),
            timestamp_ms,
            acknowledged: false,
            description: description.into(),
        }
    }

    /// Format the alert as a single display line.
    pub fn format(&self) -> String {
        let ack = if self.acknowledged { " [ACK]" } else { "" };
        format!(
            "[{}] L{} {} {}: {}{}",
            format_timestamp_short(self.timestamp_ms),
            self.level,
            self.kind.as_str(),
            self.patient_id,
            self.description,
            ack,
        )
    }
}

/// Format timestamp for alert display (HH:MM:SS).
fn format_timestamp_short(millis: u64) -> String {
    let secs = millis / 1000;
    let hours = (secs / 3600) % 24;
    let mins = (secs / 60) % 60;
    let s = secs % 60;
    format!("{hours:02}:{mins:02}:{s:02}")
}
