//! Main application state management

use std::{
    sync::{Arc, Mutex, MutexGuard},
    time::{Duration, Instant},
};
use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, watch};
use tracing::{debug, info, warn};

use crate::{config::WidgetSettings, error::TimerError};
use super::{
    presets, Clock, DurationInput, ExpiryEvent, TickOutcome, TimerPhase, TimerSnapshot,
    TimerState,
};

/// Session state shared by the HTTP handlers and the ticker task
#[derive(Debug)]
pub struct AppState {
    /// The countdown for this session
    timer: Mutex<TimerState>,
    clock: Arc<dyn Clock>,
    /// How often the ticker recomputes a running timer
    pub tick_interval: Duration,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Page defaults and the expiry sound
    pub widget: WidgetSettings,
    /// Last action tracking
    last_action: Mutex<Option<(String, DateTime<Utc>)>>,
    /// Latest snapshot, republished after every change
    pub snapshot_tx: watch::Sender<TimerSnapshot>,
    /// Keep the receiver alive to prevent channel closure
    _snapshot_rx: watch::Receiver<TimerSnapshot>,
    /// One-shot expiry notifications
    pub expiry_tx: broadcast::Sender<ExpiryEvent>,
}

impl AppState {
    /// Create a new AppState with an idle timer
    pub fn new(
        port: u16,
        host: String,
        tick_interval: Duration,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let timer = TimerState::new();
        let (snapshot_tx, snapshot_rx) = watch::channel(timer.snapshot());
        let (expiry_tx, _) = broadcast::channel(16);

        Self {
            timer: Mutex::new(timer),
            clock,
            tick_interval,
            start_time: Instant::now(),
            port,
            host,
            widget: WidgetSettings::default(),
            last_action: Mutex::new(None),
            snapshot_tx,
            _snapshot_rx: snapshot_rx,
            expiry_tx,
        }
    }

    /// Replace the widget settings
    pub fn with_widget(mut self, widget: WidgetSettings) -> Self {
        self.widget = widget;
        self
    }

    fn lock_timer(&self) -> Result<MutexGuard<'_, TimerState>, TimerError> {
        self.timer
            .lock()
            .map_err(|e| TimerError::StatePoisoned(e.to_string()))
    }

    /// Apply a user transition and publish the resulting snapshot
    fn transition<F>(&self, action: &str, apply: F) -> Result<TimerSnapshot, TimerError>
    where
        F: FnOnce(&mut TimerState, DateTime<Utc>) -> Result<(), TimerError>,
    {
        let now = self.clock.now();
        let mut timer = self.lock_timer()?;

        if let Err(e) = apply(&mut *timer, now) {
            debug!("Rejected {}: {}", action, e);
            return Err(e);
        }
        let snapshot = timer.snapshot();
        // Publish under the lock so snapshots land in transition order
        self.publish(snapshot.clone());
        drop(timer);

        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some((action.to_string(), now));
        }

        Ok(snapshot)
    }

    fn publish(&self, snapshot: TimerSnapshot) {
        if let Err(e) = self.snapshot_tx.send(snapshot) {
            warn!("Failed to send timer snapshot: {}", e);
        }
    }

    /// Start a run of `duration` seconds
    pub fn start(&self, duration: u64) -> Result<TimerSnapshot, TimerError> {
        let snapshot = self.transition("start", |timer, now| timer.start(duration, now))?;
        info!("Timer started for {}s (run {})", duration, snapshot.run_id);
        Ok(snapshot)
    }

    /// Start a run from the minutes/seconds inputs
    pub fn start_input(&self, input: DurationInput) -> Result<TimerSnapshot, TimerError> {
        let duration = input.total_seconds()?;
        self.start(duration)
    }

    /// Start one of the preset durations
    pub fn pick_preset(&self, seconds: u64) -> Result<TimerSnapshot, TimerError> {
        let preset = presets::find(seconds)?;
        let snapshot =
            self.transition("preset", |timer, now| timer.start(preset.seconds, now))?;
        info!("Preset {} started (run {})", preset.label, snapshot.run_id);
        Ok(snapshot)
    }

    pub fn pause(&self) -> Result<TimerSnapshot, TimerError> {
        let snapshot = self.transition("pause", |timer, now| timer.pause(now))?;
        info!("Timer paused with {:.1}s remaining", snapshot.remaining_seconds);
        Ok(snapshot)
    }

    pub fn resume(&self) -> Result<TimerSnapshot, TimerError> {
        let snapshot = self.transition("resume", |timer, now| timer.resume(now))?;
        info!("Timer resumed with {:.1}s remaining", snapshot.remaining_seconds);
        Ok(snapshot)
    }

    pub fn cancel(&self) -> Result<TimerSnapshot, TimerError> {
        let snapshot = self.transition("cancel", |timer, _| timer.cancel())?;
        info!("Timer cancelled");
        Ok(snapshot)
    }

    /// Recompute the remaining time, firing the expiry notification when the
    /// run reaches zero
    pub fn tick(&self) -> Result<TimerSnapshot, TimerError> {
        let now = self.clock.now();
        let mut timer = self.lock_timer()?;
        let outcome = timer.tick(now);
        let snapshot = timer.snapshot();

        let expiry = match outcome {
            TickOutcome::Stopped(_) => return Ok(snapshot),
            TickOutcome::Counting { remaining_seconds } => {
                debug!("Tick: {:.1}s remaining", remaining_seconds);
                None
            }
            TickOutcome::Expired(event) => Some(event),
        };
        // Publish under the lock so snapshots land in transition order
        self.publish(snapshot.clone());
        drop(timer);

        if let Some(event) = expiry {
            info!("Timer expired after {}s (run {})", event.total_seconds, event.run_id);
            if let Ok(mut last_action) = self.last_action.lock() {
                *last_action = Some(("expired".to_string(), now));
            }
            // No subscribers just means nobody is listening right now
            if self.expiry_tx.send(event).is_err() {
                debug!("No expiry subscribers");
            }
        }

        Ok(snapshot)
    }

    /// Phase of the live timer, which may be newer than the last snapshot a
    /// subscriber has seen
    pub fn phase(&self) -> Result<TimerPhase, TimerError> {
        Ok(self.lock_timer()?.phase())
    }

    /// Current snapshot, ticking a running timer first
    pub fn snapshot(&self) -> Result<TimerSnapshot, TimerError> {
        self.tick()
    }

    /// Subscribe to expiry notifications
    pub fn subscribe_expiry(&self) -> broadcast::Receiver<ExpiryEvent> {
        self.expiry_tx.subscribe()
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        match self.last_action.lock().ok().and_then(|last| last.clone()) {
            Some((action, at)) => (Some(action), Some(at)),
            None => (None, None),
        }
    }
}
