//! Redraw ticker background task

use std::{sync::Arc, time::Duration};
use tokio::time::{interval, sleep, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::state::{AppState, TimerPhase};

/// Background task that recomputes the remaining time while the timer runs.
/// The snapshot channel only wakes it up; whether to tick is decided by the
/// live timer, so a stale snapshot cannot keep it busy.
pub async fn ticker_task(state: Arc<AppState>) {
    info!("Starting ticker task ({}ms interval)", state.tick_interval.as_millis());

    let mut snapshot_rx = state.snapshot_tx.subscribe();

    loop {
        // Mark the current snapshot seen before reading the live phase, so a
        // transition after this point still wakes us
        let _ = snapshot_rx.borrow_and_update();

        match state.phase() {
            Ok(TimerPhase::Running) => {}
            Ok(_) => {
                // Wait for the next transition
                if snapshot_rx.changed().await.is_err() {
                    debug!("Snapshot channel closed, stopping ticker");
                    return;
                }
                continue;
            }
            Err(e) => {
                error!("Failed to read timer phase: {}", e);
                sleep(Duration::from_secs(1)).await;
                continue;
            }
        }

        debug!("Timer running, ticking");
        let mut ticks = interval(state.tick_interval);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            ticks.tick().await;
            match state.tick() {
                Ok(snapshot) if snapshot.phase == TimerPhase::Running => {}
                Ok(snapshot) => {
                    debug!("Timer left running state: {:?}", snapshot.phase);
                    break;
                }
                Err(e) => {
                    error!("Failed to tick timer: {}", e);
                    // Wait a bit before retrying
                    sleep(Duration::from_secs(1)).await;
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ManualClock;
    use tokio::time::timeout;

    #[tokio::test]
    async fn ticker_drives_timer_to_expiry() {
        let clock = Arc::new(ManualClock::default());
        let state = Arc::new(AppState::new(
            8501,
            "127.0.0.1".to_string(),
            Duration::from_millis(5),
            clock.clone(),
        ));
        let mut expiries = state.subscribe_expiry();
        tokio::spawn(ticker_task(Arc::clone(&state)));

        state.start(30).unwrap();
        clock.advance(chrono::Duration::seconds(31));

        let event = timeout(Duration::from_secs(2), expiries.recv())
            .await
            .expect("expiry within timeout")
            .unwrap();
        assert_eq!(event.total_seconds, 30);

        let snapshot = state.snapshot().unwrap();
        assert_eq!(snapshot.phase, TimerPhase::Idle);
        assert!(snapshot.expired_notified);

        // Further ticks must not notify again
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert!(expiries.try_recv().is_err());
    }

    #[tokio::test]
    async fn ticker_keeps_counting_after_resume() {
        let clock = Arc::new(ManualClock::default());
        let state = Arc::new(AppState::new(
            8501,
            "127.0.0.1".to_string(),
            Duration::from_millis(5),
            clock.clone(),
        ));
        tokio::spawn(ticker_task(Arc::clone(&state)));

        state.start(60).unwrap();
        state.pause().unwrap();
        clock.advance(chrono::Duration::seconds(120));
        state.resume().unwrap();

        tokio::time::sleep(Duration::from_millis(30)).await;
        let snapshot = state.snapshot().unwrap();
        assert_eq!(snapshot.phase, TimerPhase::Running);
        assert_eq!(snapshot.remaining_seconds, 60.0);
    }
}
