//! Configuration types for the engine.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct EngineConfig {
    /// Periodic task intervals
    #[serde(default)]
    pub scheduler: SchedulerConfig,
    /// Diagnostic test resolution parameters
    #[serde(default)]
    pub resolution: ResolutionConfig,
    /// Alert history parameters
    #[serde(default)]
    pub alerts: AlertHistoryConfig,
}

impl EngineConfig {
    /// Validate the configuration, returning `Error::InvalidConfig` on the
    /// first violated constraint.
    pub fn validate(&self) -> Result<()> {
        self.scheduler.validate()?;
        self.resolution.validate()?;
        self.alerts.validate()
    }
}

/// Intervals for the three periodic tasks.
///
/// The tasks are independent and never coalesced: the countdown task owns the
/// per-tick decrement, the refresh task only re-logs test status, and the
/// sweep task evaluates progression risk.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SchedulerConfig {
    /// Test countdown period in milliseconds.
    /// Default: 5000
    #[serde(default = "default_countdown_ms")]
    pub countdown_interval_ms: u64,

    /// Coarse test-status refresh period in milliseconds.
    /// Default: 60000
    #[serde(default = "default_refresh_ms")]
    pub refresh_interval_ms: u64,

    /// Progression sweep period in milliseconds.
    /// Default: 30000
    #[serde(default = "default_sweep_ms")]
    pub sweep_interval_ms: u64,
}

fn default_countdown_ms() -> u64 {
    5_000
}

fn default_refresh_ms() -> u64 {
    60_000
}

fn default_sweep_ms() -> u64 {
    30_000
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            countdown_interval_ms: default_countdown_ms(),
            refresh_interval_ms: default_refresh_ms(),
            sweep_interval_ms: default_sweep_ms(),
        }
    }
}

impl SchedulerConfig {
    pub fn countdown_interval(&self) -> Duration {
        Duration::from_millis(self.countdown_interval_ms)
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_interval_ms)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_millis(self.sweep_interval_ms)
    }

    fn validate(&self) -> Result<()> {
        if self.countdown_interval_ms == 0
            || self.refresh_interval_ms == 0
            || self.sweep_interval_ms == 0
        {
            return Err(Error::InvalidConfig(
                "scheduler intervals must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Parameters for stochastic test resolution.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolutionConfig {
    /// Time units a new test spends in `Processing` before resolution.
    /// Default: 90
    #[serde(default = "default_initial_budget")]
    pub initial_budget: u32,

    /// Probability of a negative result.
    /// Default: 0.60
    #[serde(default = "default_p_negative")]
    pub p_negative: f64,

    /// Probability of an MDR-positive result.
    /// Default: 0.25
    #[serde(default = "default_p_mdr")]
    pub p_mdr: f64,

    /// Probability of an XDR-positive result.
    /// Default: 0.15
    #[serde(default = "default_p_xdr")]
    pub p_xdr: f64,

    /// Random seed (0 = use system random).
    #[serde(default)]
    pub random_seed: u64,
}

fn default_initial_budget() -> u32 {
    90
}

fn default_p_negative() -> f64 {
    0.60
}

fn default_p_mdr() -> f64 {
    0.25
}

fn default_p_xdr() -> f64 {
    0.15
}

impl Default for ResolutionConfig {
    fn default() -> Self {
        Self {
            initial_budget: default_initial_budget(),
            p_negative: default_p_negative(),
            p_mdr: default_p_mdr(),
            p_xdr: default_p_xdr(),
            random_seed: 0,
        }
    }
}

impl ResolutionConfig {
    fn validate(&self) -> Result<()> {
        if self.initial_budget == 0 {
            return Err(Error::InvalidConfig(
                "initial test budget must be non-zero".to_string(),
            ));
        }
        for (name, p) in [
            ("p_negative", self.p_negative),
            ("p_mdr", self.p_mdr),
            ("p_xdr", self.p_xdr),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(Error::InvalidConfig(format!(
                    "{name} must be within [0, 1], got {p}"
                )));
            }
        }
        let sum = self.p_negative + self.p_mdr + self.p_xdr;
        if (sum - 1.0).abs() > 1e-9 {
            return Err(Error::InvalidConfig(format!(
                "resolution probabilities must sum to 1.0, got {sum}"
            )));
        }
        Ok(())
    }
}

/// Alert history parameters.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AlertHistoryConfig {
    /// Maximum number of alerts retained. Trimming evicts the oldest
    /// acknowledged entries only; unacknowledged alerts are never evicted.
    /// Default: 1024
    #[serde(default = "default_alert_capacity")]
    pub capacity: usize,
}

fn default_alert_capacity() -> usize {
    1024
}

impl Default for AlertHistoryConfig {
    fn default() -> Self {
        Self {
            capacity: default_alert_capacity(),
        }
    }
}

impl AlertHistoryConfig {
    fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(Error::InvalidConfig(
                "alert capacity must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}
