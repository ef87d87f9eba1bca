//! View formatting
//!
//! Pure functions turning timer numbers into what the widget draws: the
//! clock text, the headline, the progress fraction and the hourglass chart.

pub mod hourglass;

pub use hourglass::hourglass_svg;

use crate::state::TimerPhase;

/// Shown while nothing is running
pub const IDLE_HEADLINE: &str = "Pick a time and press start";
/// Shown right after a run reaches zero
pub const EXPIRED_HEADLINE: &str = "Time's up!";

/// Format remaining time as `MM:SS`, or `Ns` under a minute
pub fn format_clock(remaining_seconds: f64) -> String {
    let whole = remaining_seconds.max(0.0).floor() as u64;
    let mins = whole / 60;
    let secs = whole % 60;
    if mins > 0 {
        format!("{:02}:{:02}", mins, secs)
    } else {
        format!("{}s", secs)
    }
}

/// Headline for the current phase. Running and paused runs always show the
/// remaining time.
pub fn headline(phase: TimerPhase, remaining_seconds: f64) -> String {
    match phase {
        TimerPhase::Running => format!("Remaining: {}", format_clock(remaining_seconds)),
        TimerPhase::Paused => format!("Paused: {}", format_clock(remaining_seconds)),
        TimerPhase::Expired => EXPIRED_HEADLINE.to_string(),
        TimerPhase::Idle => IDLE_HEADLINE.to_string(),
    }
}

/// Fraction of the run already elapsed, in `0.0..=1.0`
pub fn progress(total_seconds: u64, remaining_seconds: f64) -> f64 {
    if total_seconds == 0 {
        return 0.0;
    }
    (1.0 - remaining_seconds / total_seconds as f64).clamp(0.0, 1.0)
}
