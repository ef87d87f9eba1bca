//! Expiry notifier background task

use std::{io::Write, sync::Arc};
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};

use crate::state::AppState;

/// ASCII bell
const BELL: &[u8] = b"\x07";

/// Background task that announces every expiry on the server side, ringing
/// the terminal bell when `bell` is set. Bell failures are ignored.
pub async fn expiry_notifier_task(state: Arc<AppState>, bell: bool) {
    info!("Starting expiry notifier task (bell={})", bell);

    let mut expiry_rx = state.subscribe_expiry();

    loop {
        match expiry_rx.recv().await {
            Ok(event) => {
                info!("Time's up! {}s run {} finished at {}", event.total_seconds, event.run_id, event.expired_at);
                if bell {
                    let mut stdout = std::io::stdout();
                    let _ = stdout.write_all(BELL).and_then(|_| stdout.flush());
                }
            }
            Err(RecvError::Lagged(skipped)) => {
                warn!("Expiry notifier lagged, skipped {} events", skipped);
            }
            Err(RecvError::Closed) => {
                info!("Expiry channel closed, stopping notifier");
                return;
            }
        }
    }
}
