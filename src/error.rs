//! Error types for the countdown engine and presets

use thiserror::Error;

/// Errors raised by countdown engine operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimerError {
    #[error("Cannot configure the timer while it is running")]
    InvalidState,

    #[error("Cannot start a timer with no remaining time")]
    ZeroDuration,
}

/// Errors raised when building a timer preset
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PresetError {
    #[error("Preset name is required")]
    MissingName,

    #[error("Hours must be between 0 and 23, got {0}")]
    HoursOutOfRange(u64),

    #[error("Minutes must be between 0 and 59, got {0}")]
    MinutesOutOfRange(u64),

    #[error("Seconds must be between 0 and 59, got {0}")]
    SecondsOutOfRange(u64),

    #[error("Unknown preset: {0}")]
    Unknown(String),
}

pub type TimerResult<T> = Result<T, TimerError>;
