// Track core error types
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::observer::ObserverError;

/// Errors raised by the track state and its inputs.
///
/// Input errors are raised before anything is written. `Observer` is the
/// exception: it reports a delivery that aborted after the change was applied.
#[derive(Debug, Error)]
pub enum TrackError {
    #[error("Invalid coordinate for {field}: {axis} = {value}")]
    InvalidCoordinate {
        field: &'static str,
        axis: &'static str,
        value: f64,
    },

    #[error("Unresolved unit: {0}")]
    UnresolvedUnit(String),

    #[error("Cannot compute duration: {missing} is not set")]
    OutOfOrderFinalization { missing: &'static str },

    #[error("Cannot compute duration: end time {end} is before start time {start}")]
    EndBeforeStart {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("A track is already active")]
    AlreadyActive,

    #[error("No track is active")]
    NotActive,

    #[error("The active track is already finished")]
    AlreadyFinished,

    #[error("Invalid timestamp: {0} ms")]
    InvalidTimestamp(i64),

    #[error(transparent)]
    Observer(#[from] ObserverError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TrackError {
    /// Get error code for client handling
    pub fn error_code(&self) -> &'static str {
        match self {
            TrackError::InvalidCoordinate { .. } => "INVALID_COORDINATE",
            TrackError::UnresolvedUnit(_) => "UNRESOLVED_UNIT",
            TrackError::OutOfOrderFinalization { .. } => "OUT_OF_ORDER_FINALIZATION",
            TrackError::EndBeforeStart { .. } => "END_BEFORE_START",
            TrackError::AlreadyActive => "ALREADY_ACTIVE",
            TrackError::NotActive => "NOT_ACTIVE",
            TrackError::AlreadyFinished => "ALREADY_FINISHED",
            TrackError::InvalidTimestamp(_) => "INVALID_TIMESTAMP",
            TrackError::Observer(_) => "OBSERVER_FAILED",
            TrackError::Json(_) => "INVALID_JSON",
        }
    }
}
