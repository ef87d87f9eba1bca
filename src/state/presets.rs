//! One-click preset durations

use serde::Serialize;

use crate::error::TimerError;

/// A preset start button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Preset {
    pub label: &'static str,
    pub seconds: u64,
}

pub const PRESETS: [Preset; 5] = [
    Preset { label: "1 min", seconds: 60 },
    Preset { label: "2 min", seconds: 120 },
    Preset { label: "3 min", seconds: 180 },
    Preset { label: "5 min", seconds: 300 },
    Preset { label: "10 min", seconds: 600 },
];

/// Look up the preset for `seconds`
pub fn find(seconds: u64) -> Result<Preset, TimerError> {
    PRESETS
        .iter()
        .copied()
        .find(|preset| preset.seconds == seconds)
        .ok_or(TimerError::UnknownPreset(seconds))
}
