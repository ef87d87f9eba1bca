//! HTTP API module
//!
//! This module contains all HTTP endpoint handlers, the widget page and
//! response structures.

pub mod handlers;
pub mod page;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/timer", get(timer_handler))
        .route("/timer/hourglass.svg", get(hourglass_handler))
        .route("/timer/start", post(start_handler))
        .route("/timer/preset/:seconds", post(preset_handler))
        .route("/timer/pause", post(pause_handler))
        .route("/timer/resume", post(resume_handler))
        .route("/timer/cancel", post(cancel_handler))
        .route("/presets", get(presets_handler))
        .route("/events", get(events_handler))
        .route("/sound", get(sound_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
