//! Pure risk scoring: factor inputs to score, level, XDR progression risk,
//! and advisory recommendations.
//!
//! Everything here is a pure function of its inputs. No locks, no state,
//! safe to call from any thread.

mod recommendations;

pub use recommendations::recommendations_for;

use smallvec::SmallVec;

use crate::types::{RiskFactors, RiskLevel};

/// Factor weights. The weights sum to 1.0, so a uniform factor bundle maps
/// to a score equal to the common factor value.
pub const WEIGHTS: [(&str, f64); 8] = [
    ("age", 0.05),
    ("immunity", 0.15),
    ("locality", 0.08),
    ("nutrition", 0.10),
    ("icuDays", 0.12),
    ("mdrHistory", 0.20),
    ("antibiotics", 0.15),
    ("sapsScore", 0.15),
];

/// Result of one scoring call.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreResult {
    /// Weighted risk score, 0-30
    pub score: u8,
    /// Level derived from the score
    pub level: RiskLevel,
    /// XDR progression sub-score
    pub xdr_score: u8,
    /// Level derived from the sub-score
    pub xdr_risk: RiskLevel,
    /// Ordered advisory list; identical inputs always produce identical
    /// recommendations
    pub recommendations: SmallVec<[&'static str; 8]>,
}

/// Score a factor bundle.
///
/// Out-of-range inputs are clamped to the nearest valid bound, never
/// rejected.
pub fn score(factors: &RiskFactors) -> ScoreResult {
    let f = factors.clamped();

    let total = f.age as f64 * 0.05
        + f.immunity as f64 * 0.15
        + f.locality as f64 * 0.08
        + f.nutrition as f64 * 0.10
        + f.icu_days as f64 * 0.12
        + f.mdr_history as f64 * 0.20
        + f.antibiotics as f64 * 0.15
        + f.saps_score as f64 * 0.15;

    let score = total.round().clamp(0.0, 30.0) as u8;
    let level = risk_level_for(score);

    let xdr_score = xdr_progression_score(&f, score);
    let xdr_risk = xdr_risk_for(xdr_score);

    ScoreResult {
        score,
        level,
        xdr_score,
        xdr_risk,
        recommendations: recommendations_for(level, xdr_risk),
    }
}

/// Map a risk score to its level. Thresholds are strict and evaluated
/// high-to-low.
pub fn risk_level_for(score: u8) -> RiskLevel {
    if score > 24 {
        RiskLevel::Critical
    } else if score > 16 {
        RiskLevel::High
    } else if score > 8 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

/// XDR progression sub-score: an independent accumulator over the factors
/// most predictive of MDR advancing to XDR.
fn xdr_progression_score(f: &RiskFactors, total: u8) -> u8 {
    let mut xdr_score = 0u8;
    if f.mdr_history >= 2 {
        xdr_score += 3;
    }
    if f.antibiotics >= 2 {
        xdr_score += 2;
    }
    if f.immunity >= 2 {
        xdr_score += 2;
    }
    if f.locality >= 2 {
        xdr_score += 1;
    }
    if total >= 20 {
        xdr_score += 2;
    }
    xdr_score
}

/// Map an XDR progression sub-score to its level.
pub fn xdr_risk_for(xdr_score: u8) -> RiskLevel {
    if xdr_score >= 6 {
        RiskLevel::Critical
    } else if xdr_score >= 4 {
        RiskLevel::High
    } else if xdr_score >= 2 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A bundle with every factor set to `v`; weights sum to 1.0 so the
    /// score equals `v`.
    fn uniform(v: u32) -> RiskFactors {
        RiskFactors {
            age: v,
            immunity: v,
            locality: v,
            nutrition: v,
            icu_days: v,
            mdr_history: v,
            antibiotics: v,
            saps_score: v,
        }
    }

    #[test]
    fn test_uniform_bundle_scores_its_value() {
        for v in [0u32, 8, 9, 16, 17, 24, 25, 30] {
            assert_eq!(score(&uniform(v)).score, v as u8, "uniform({v})");
        }
    }

    #[test]
    fn test_level_boundaries() {
        assert_eq!(score(&uniform(8)).level, RiskLevel::Low);
        assert_eq!(score(&uniform(9)).level, RiskLevel::Medium);
        assert_eq!(score(&uniform(16)).level, RiskLevel::Medium);
        assert_eq!(score(&uniform(17)).level, RiskLevel::High);
        assert_eq!(score(&uniform(24)).level, RiskLevel::High);
        assert_eq!(score(&uniform(25)).level, RiskLevel::Critical);
    }

    #[test]
    fn test_xdr_level_boundaries() {
        assert_eq!(xdr_risk_for(1), RiskLevel::Low);
        assert_eq!(xdr_risk_for(2), RiskLevel::Medium);
        assert_eq!(xdr_risk_for(4), RiskLevel::High);
        assert_eq!(xdr_risk_for(6), RiskLevel::Critical);
    }

    #[test]
    fn test_missing_factors_default_to_zero() {
        let r = score(&RiskFactors::default());
        assert_eq!(r.score, 0);
        assert_eq!(r.level, RiskLevel::Low);
        assert_eq!(r.xdr_risk, RiskLevel::Low);
    }

    #[test]
    fn test_out_of_range_input_clamped() {
        let f = RiskFactors {
            mdr_history: 10_000,
            ..Default::default()
        };
        // clamped to 100, weighted by 0.20
        assert_eq!(score(&f).score, 20);
    }

    #[test]
    fn test_score_clamped_to_thirty() {
        let f = RiskFactors {
            icu_days: 100,
            saps_score: 100,
            mdr_history: 100,
            antibiotics: 100,
            ..Default::default()
        };
        assert_eq!(score(&f).score, 30);
    }

    #[test]
    fn test_monotonic_in_every_factor() {
        let base = uniform(5);
        let mutations: [fn(&mut RiskFactors, u32); 8] = [
            |f, v| f.age = v,
            |f, v| f.immunity = v,
            |f, v| f.locality = v,
            |f, v| f.nutrition = v,
            |f, v| f.icu_days = v,
            |f, v| f.mdr_history = v,
            |f, v| f.antibiotics = v,
            |f, v| f.saps_score = v,
        ];
        for set in mutations {
            let mut prev = 0u8;
            for v in 0..=30 {
                let mut f = base;
                set(&mut f, v);
                let s = score(&f).score;
                assert!(s >= prev, "score decreased at factor value {v}");
                prev = s;
            }
        }
    }

    #[test]
    fn test_progression_scenario_all_bonuses() {
        // Every bonus fires: +3 +2 +2 +1 and +2 for total >= 20.
        let f = RiskFactors {
            mdr_history: 2,
            antibiotics: 2,
            immunity: 2,
            locality: 2,
            icu_days: 60,
            saps_score: 80,
            ..Default::default()
        };
        let r = score(&f);
        assert!(r.score >= 20);
        assert_eq!(r.xdr_score, 10);
        assert_eq!(r.xdr_risk, RiskLevel::Critical);
    }

    #[test]
    fn test_recommendations_deterministic() {
        let f = uniform(25);
        assert_eq!(score(&f).recommendations, score(&f).recommendations);
    }
}
