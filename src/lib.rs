//! MDR/XDR pathogen risk engine.
//!
//! Scores hospital patients from clinical risk factors, runs diagnostic
//! tests through a tick-driven processing lifecycle, and raises deduplicated
//! alerts when risk crosses thresholds or resistant-pathogen progression is
//! detected. All state is in-memory and process-lifetime; presentation,
//! persistence and transport live outside this crate.

#![deny(unreachable_pub)]

// Core modules
mod alerts;
mod config;
mod engine;
mod errors;
mod lifecycle;
mod monitor;
mod registry;
mod scoring;
mod types;


// Re-exports
pub use alerts::AlertManager;
pub use config::{AlertHistoryConfig, EngineConfig, ResolutionConfig, SchedulerConfig};
pub use engine::Engine;
pub use errors::{Error, Result};
pub use lifecycle::{Outcome, Resolution, TestTracker};
pub use monitor::ProgressionMonitor;
pub use registry::{demo_hygiene, demo_patients, demo_zones, PatientRegistry};
pub use scoring::{
    recommendations_for, risk_level_for, score, xdr_risk_for, ScoreResult, WEIGHTS,
};
pub use types::*;
