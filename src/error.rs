use chrono::{NaiveDateTime, NaiveTime};
use thiserror::Error;

/// Errors raised by the scheduling library.
///
/// Lookups and filters never fail; everything here is either a contract
/// violation by the caller or a problem loading external data.
#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("Invalid time range: start {start} must be before end {end}")]
    InvalidRange { start: NaiveTime, end: NaiveTime },

    #[error("Slot step must be positive, got {0} minutes")]
    InvalidStep(i64),

    #[error("Invalid time of day: '{0}'. Expected HH:MM")]
    InvalidTimeOfDay(String),

    #[error("Local time {0} does not exist in the viewer's time zone")]
    NonexistentLocalTime(NaiveDateTime),

    #[error("Invalid appointment {id}: {reason}")]
    InvalidAppointment { id: String, reason: String },

    #[error("Duplicate {kind} id: {id}")]
    DuplicateId { kind: &'static str, id: String },

    #[error("{0}")]
    Parse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for ScheduleError {
    fn from(err: serde_json::Error) -> Self {
        ScheduleError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for ScheduleError {
    fn from(err: toml::de::Error) -> Self {
        ScheduleError::Serialization(err.to_string())
    }
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;

/// Helper to create configuration errors
pub fn config_error(message: &str) -> ScheduleError {
    ScheduleError::Config(message.to_string())
}
