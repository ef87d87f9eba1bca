//! Minutes/seconds form input

use serde::{Deserialize, Serialize};

use crate::error::TimerError;

pub const MAX_MINUTES: u32 = 60;
pub const MAX_SECONDS: u32 = 59;

/// Duration as typed into the widget's two numeric inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationInput {
    #[serde(default)]
    pub minutes: u32,
    #[serde(default)]
    pub seconds: u32,
}

impl DurationInput {
    pub fn new(minutes: u32, seconds: u32) -> Self {
        Self { minutes, seconds }
    }

    /// Validate the fields and combine them into a number of seconds
    pub fn total_seconds(&self) -> Result<u64, TimerError> {
        if self.minutes > MAX_MINUTES {
            return Err(TimerError::OutOfRange {
                field: "minutes",
                value: self.minutes,
                max: MAX_MINUTES,
            });
        }
        if self.seconds > MAX_SECONDS {
            return Err(TimerError::OutOfRange {
                field: "seconds",
                value: self.seconds,
                max: MAX_SECONDS,
            });
        }

        match u64::from(self.minutes) * 60 + u64::from(self.seconds) {
            0 => Err(TimerError::ZeroDuration),
            total => Ok(total),
        }
    }
}

impl Default for DurationInput {
    fn default() -> Self {
        Self::new(0, 30)
    }
}
