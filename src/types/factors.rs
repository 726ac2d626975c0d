//! Per-assessment clinical risk factor inputs.

use serde::{Deserialize, Serialize};

/// Maximum meaningful value for a single factor: clinical inputs top out at
/// percentage-style scales (SAPS, days in ICU). Inputs above this are
/// clamped rather than rejected.
pub const FACTOR_CEILING: u32 = 100;

/// Input bundle for one risk assessment.
///
/// Each field is a non-negative severity value; callers pass ordinal
/// severities (0-3) or raw clinical magnitudes (ICU days, SAPS points) as
/// their forms dictate. Missing factors default to 0. Constructed per
/// scoring call, not persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RiskFactors {
    pub age: u32,
    pub immunity: u32,
    pub locality: u32,
    pub nutrition: u32,
    pub icu_days: u32,
    pub mdr_history: u32,
    pub antibiotics: u32,
    pub saps_score: u32,
}

impl RiskFactors {
    /// Return a copy with every factor clamped to `0..=FACTOR_CEILING`.
    pub fn clamped(&self) -> Self {
        Self {
            age: self.age.min(FACTOR_CEILING),
            immunity: self.immunity.min(FACTOR_CEILING),
            locality: self.locality.min(FACTOR_CEILING),
            nutrition: self.nutrition.min(FACTOR_CEILING),
            icu_days: self.icu_days.min(FACTOR_CEILING),
            mdr_history: self.mdr_history.min(FACTOR_CEILING),
            antibiotics: self.antibiotics.min(FACTOR_CEILING),
            saps_score: self.saps_score.min(FACTOR_CEILING),
        }
    }
}
