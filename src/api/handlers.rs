//! HTTP endpoint handlers

use std::{convert::Infallible, path::Path, sync::Arc};
use axum::{
    extract::{Path as UrlPath, State},
    http::{header, StatusCode},
    response::{
        sse::{Event, KeepAlive, Sse},
        Html, IntoResponse, Json, Response,
    },
};
use futures::stream::{self, Stream};
use tokio::sync::broadcast::error::RecvError;
use tracing::{error, warn};

use crate::{
    error::TimerError,
    state::{AppState, DurationInput, Preset, TimerSnapshot, PRESETS},
    view::{format_clock, hourglass_svg},
};
use super::{
    page::render_page,
    responses::{ApiResponse, HealthResponse, Rejection, StatusResponse},
};

type TransitionResult = Result<Json<ApiResponse>, Rejection>;

/// Turn a rejected transition into a response carrying the unchanged timer
fn reject(state: &AppState, error: TimerError) -> Rejection {
    if let TimerError::StatePoisoned(_) = error {
        error!("Timer request failed: {}", error);
        return Rejection { error, timer: None };
    }

    warn!("Timer request rejected: {}", error);
    Rejection {
        error,
        timer: state.snapshot().ok(),
    }
}

fn accepted(message: String, timer: TimerSnapshot) -> Json<ApiResponse> {
    Json(ApiResponse::ok(message, timer))
}

/// Handle GET / - Serve the timer widget
pub async fn index_handler(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(render_page(&state.widget))
}

/// Handle GET /timer - Tick and return the current snapshot
pub async fn timer_handler(State(state): State<Arc<AppState>>) -> Result<Json<TimerSnapshot>, Rejection> {
    state
        .snapshot()
        .map(Json)
        .map_err(|e| reject(&state, e))
}

/// Handle GET /timer/hourglass.svg - Draw the hourglass chart
pub async fn hourglass_handler(State(state): State<Arc<AppState>>) -> Result<Response, Rejection> {
    let snapshot = state.snapshot().map_err(|e| reject(&state, e))?;
    let svg = hourglass_svg(snapshot.total_seconds, snapshot.remaining_seconds);

    Ok((
        [
            (header::CONTENT_TYPE, "image/svg+xml"),
            (header::CACHE_CONTROL, "no-store"),
        ],
        svg,
    )
        .into_response())
}

/// Handle POST /timer/start - Start a run from the minutes/seconds inputs
pub async fn start_handler(
    State(state): State<Arc<AppState>>,
    Json(input): Json<DurationInput>,
) -> TransitionResult {
    match state.start_input(input) {
        Ok(timer) => {
            let message = format!("Timer started for {}", format_clock(timer.total_seconds as f64));
            Ok(accepted(message, timer))
        }
        Err(e) => Err(reject(&state, e)),
    }
}

/// Handle POST /timer/preset/:seconds - Start a preset run
pub async fn preset_handler(
    State(state): State<Arc<AppState>>,
    UrlPath(seconds): UrlPath<u64>,
) -> TransitionResult {
    match state.pick_preset(seconds) {
        Ok(timer) => {
            let message = format!("Preset started for {}", format_clock(timer.total_seconds as f64));
            Ok(accepted(message, timer))
        }
        Err(e) => Err(reject(&state, e)),
    }
}

/// Handle POST /timer/pause
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> TransitionResult {
    state
        .pause()
        .map(|timer| accepted("Timer paused".to_string(), timer))
        .map_err(|e| reject(&state, e))
}

/// Handle POST /timer/resume
pub async fn resume_handler(State(state): State<Arc<AppState>>) -> TransitionResult {
    state
        .resume()
        .map(|timer| accepted("Timer resumed".to_string(), timer))
        .map_err(|e| reject(&state, e))
}

/// Handle POST /timer/cancel
pub async fn cancel_handler(State(state): State<Arc<AppState>>) -> TransitionResult {
    state
        .cancel()
        .map(|timer| accepted("Timer cancelled".to_string(), timer))
        .map_err(|e| reject(&state, e))
}

/// Handle GET /presets - List the preset buttons
pub async fn presets_handler() -> Json<Vec<Preset>> {
    Json(PRESETS.to_vec())
}

/// Handle GET /events - Stream expiry notifications as server-sent events
pub async fn events_handler(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let expiry_rx = state.subscribe_expiry();

    let events = stream::unfold(expiry_rx, |mut expiry_rx| async move {
        loop {
            match expiry_rx.recv().await {
                Ok(expiry) => {
                    let event = Event::default()
                        .event("expired")
                        .json_data(&expiry)
                        .unwrap_or_else(|e| {
                            warn!("Failed to encode expiry event: {}", e);
                            Event::default().event("expired")
                        });
                    return Some((Ok::<_, Infallible>(event), expiry_rx));
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Event stream lagged, skipped {} expiry events", skipped);
                }
                Err(RecvError::Closed) => return None,
            }
        }
    });

    Sse::new(events).keep_alive(KeepAlive::default())
}

/// Handle GET /sound - Serve the configured expiry sound
pub async fn sound_handler(State(state): State<Arc<AppState>>) -> Response {
    let Some(path) = state.widget.sound.as_deref() else {
        return StatusCode::NOT_FOUND.into_response();
    };

    match tokio::fs::read(path).await {
        Ok(bytes) => ([(header::CONTENT_TYPE, audio_content_type(path))], bytes).into_response(),
        Err(e) => {
            warn!("Failed to read sound file {}: {}", path.display(), e);
            StatusCode::NOT_FOUND.into_response()
        }
    }
}

fn audio_content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("mp3") => "audio/mpeg",
        Some("wav") => "audio/wav",
        Some("ogg") => "audio/ogg",
        _ => "application/octet-stream",
    }
}

/// Handle GET /status - Return timer and server status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, Rejection> {
    let timer = state.snapshot().map_err(|e| reject(&state, e))?;
    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        timer,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
