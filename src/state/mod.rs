//! State management module
//!
//! This module contains the timer state machine and the session state that
//! owns it.

pub mod app_state;
pub mod clock;
pub mod duration;
pub mod presets;
pub mod timer_state;

// Re-export main types
pub use app_state::AppState;
pub use clock::{Clock, ManualClock, SystemClock};
pub use duration::DurationInput;
pub use presets::{Preset, PRESETS};
pub use timer_state::{ExpiryEvent, TickOutcome, TimerPhase, TimerSnapshot, TimerState};
