//! Timer error type

use thiserror::Error;

/// Reasons a timer operation was rejected. A rejected operation never
/// changes the timer state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimerError {
    #[error("Set at least 1 second")]
    ZeroDuration,

    #[error("{field} must be between 0 and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: u32,
        max: u32,
    },

    #[error("{0} seconds is not a preset")]
    UnknownPreset(u64),

    #[error("timer is already running")]
    AlreadyRunning,

    #[error("timer is not running")]
    NotRunning,

    #[error("timer is not paused")]
    NotPaused,

    #[error("timer is idle")]
    NotActive,

    #[error("failed to lock timer state: {0}")]
    StatePoisoned(String),
}

impl TimerError {
    /// Whether the rejection is a problem with user input rather than
    /// with the current timer state
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ZeroDuration | Self::OutOfRange { .. })
    }
}
