//! Countdown timer state machine
//!
//! The timer is idle, running or paused. Expiry is a transient step taken by
//! [`TimerState::tick`]: a run that reaches zero fires one [`ExpiryEvent`] and
//! folds back to idle. Every operation takes the current wall-clock instant so
//! the machine itself never reads a clock.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{error::TimerError, view};

/// Observable phase of the timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerPhase {
    Idle,
    Running,
    Paused,
    Expired,
}

/// One-shot notification emitted when a run reaches zero
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpiryEvent {
    pub run_id: u64,
    pub total_seconds: u64,
    pub expired_at: DateTime<Utc>,
}

/// Result of recomputing the remaining time
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// Nothing to count: the timer is idle or paused
    Stopped(TimerPhase),
    /// Still counting down
    Counting { remaining_seconds: f64 },
    /// The run just reached zero; the timer is idle again
    Expired(ExpiryEvent),
}

/// Timer state for the countdown of a single session
#[derive(Debug, Clone, Default)]
pub struct TimerState {
    total_seconds: u64,
    start_time: Option<DateTime<Utc>>,
    paused_time: Option<DateTime<Utc>>,
    remaining_seconds: f64,
    is_running: bool,
    expired_notified: bool,
    run_id: u64,
}

impl TimerState {
    /// Create a new idle timer
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> TimerPhase {
        if self.is_running {
            TimerPhase::Running
        } else if self.paused_time.is_some() {
            TimerPhase::Paused
        } else {
            TimerPhase::Idle
        }
    }

    pub fn total_seconds(&self) -> u64 {
        self.total_seconds
    }

    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        self.start_time
    }

    pub fn paused_time(&self) -> Option<DateTime<Utc>> {
        self.paused_time
    }

    /// Last computed remaining time
    pub fn remaining_seconds(&self) -> f64 {
        self.remaining_seconds
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn expired_notified(&self) -> bool {
        self.expired_notified
    }

    pub fn run_id(&self) -> u64 {
        self.run_id
    }

    /// Begin a new run of `duration` seconds, replacing any paused run
    pub fn start(&mut self, duration: u64, now: DateTime<Utc>) -> Result<(), TimerError> {
        if duration == 0 {
            return Err(TimerError::ZeroDuration);
        }
        if self.is_running {
            return Err(TimerError::AlreadyRunning);
        }

        self.total_seconds = duration;
        self.start_time = Some(now);
        self.paused_time = None;
        self.remaining_seconds = duration as f64;
        self.is_running = true;
        self.expired_notified = false;
        self.run_id += 1;
        Ok(())
    }

    pub fn pause(&mut self, now: DateTime<Utc>) -> Result<(), TimerError> {
        if !self.is_running {
            return Err(TimerError::NotRunning);
        }

        self.remaining_seconds = self.remaining_at(now).max(0.0);
        self.is_running = false;
        self.paused_time = Some(now);
        Ok(())
    }

    /// Continue a paused run. The start instant moves forward by the time
    /// spent paused, so the pause does not count against the countdown.
    pub fn resume(&mut self, now: DateTime<Utc>) -> Result<(), TimerError> {
        let paused_at = self.paused_time.ok_or(TimerError::NotPaused)?;
        let started_at = self.start_time.ok_or(TimerError::NotPaused)?;

        self.start_time = Some(started_at + (now - paused_at));
        self.paused_time = None;
        self.is_running = true;
        Ok(())
    }

    /// Abandon the current run
    pub fn cancel(&mut self) -> Result<(), TimerError> {
        if self.phase() == TimerPhase::Idle {
            return Err(TimerError::NotActive);
        }

        self.reset();
        Ok(())
    }

    /// Recompute the remaining time against `now`, expiring the run once it
    /// reaches zero
    pub fn tick(&mut self, now: DateTime<Utc>) -> TickOutcome {
        if !self.is_running {
            return TickOutcome::Stopped(self.phase());
        }

        let remaining = self.remaining_at(now);
        if remaining > 0.0 {
            self.remaining_seconds = remaining;
            return TickOutcome::Counting { remaining_seconds: remaining };
        }

        let event = ExpiryEvent {
            run_id: self.run_id,
            total_seconds: self.total_seconds,
            expired_at: now,
        };
        // Only start() leads to running and it clears the flag, so this is
        // the one expiry of the run
        self.reset();
        self.expired_notified = true;
        TickOutcome::Expired(event)
    }

    /// Remaining time at `now` according to the start instant, without
    /// touching the cache
    pub fn remaining_at(&self, now: DateTime<Utc>) -> f64 {
        match self.start_time {
            Some(started_at) if self.is_running => {
                let elapsed = (now - started_at).num_milliseconds() as f64 / 1000.0;
                self.total_seconds as f64 - elapsed
            }
            _ => self.remaining_seconds,
        }
    }

    /// Read model for the view layer
    pub fn snapshot(&self) -> TimerSnapshot {
        let phase = self.phase();
        let remaining = self.remaining_seconds;
        let shown_phase = if phase == TimerPhase::Idle && self.expired_notified {
            TimerPhase::Expired
        } else {
            phase
        };

        TimerSnapshot {
            phase,
            run_id: self.run_id,
            total_seconds: self.total_seconds,
            remaining_seconds: remaining,
            elapsed_seconds: (self.total_seconds as f64 - remaining).max(0.0),
            progress: view::progress(self.total_seconds, remaining),
            clock: view::format_clock(remaining),
            headline: view::headline(shown_phase, remaining),
            expired_notified: self.expired_notified,
            start_time: self.start_time,
            paused_time: self.paused_time,
            presets_enabled: !self.is_running,
        }
    }

    fn reset(&mut self) {
        self.total_seconds = 0;
        self.start_time = None;
        self.paused_time = None;
        self.remaining_seconds = 0.0;
        self.is_running = false;
    }
}

/// Everything the view layer needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub phase: TimerPhase,
    pub run_id: u64,
    pub total_seconds: u64,
    pub remaining_seconds: f64,
    pub elapsed_seconds: f64,
    pub progress: f64,
    pub clock: String,
    pub headline: String,
    pub expired_notified: bool,
    pub start_time: Option<DateTime<Utc>>,
    pub paused_time: Option<DateTime<Utc>>,
    pub presets_enabled: bool,
}
