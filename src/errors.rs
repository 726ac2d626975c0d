use thiserror::Error;

/// Engine error type.
///
/// Unknown patient/test/alert ids are not errors: lookups return `Option`
/// and acknowledgment of an unknown alert is a silent no-op.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Scheduler start requested while the periodic tasks are already running
    #[error("scheduler is already running")]
    AlreadyRunning,

    /// Scheduler stop requested while no periodic tasks are running
    #[error("scheduler is not running")]
    NotRunning,

    /// Configuration failed validation
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;
