//! Hourglass - A simple countdown timer widget served over HTTP
//!
//! This is the main entry point for the hourglass application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use hourglass::{
    api::create_router,
    config::Config,
    state::{AppState, SystemClock},
    tasks::{expiry_notifier_task, ticker_task},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("hourglass={},tower_http=info", config.log_level()))
        .init();

    info!("Starting hourglass server v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration: host={}, port={}, tick={}ms, bell={}",
        config.host, config.port, config.tick_interval_ms, config.bell
    );
    if let Some(sound) = &config.sound {
        if !sound.is_file() {
            tracing::warn!("Sound file {} not found, the page will beep instead", sound.display());
        }
    }

    // Create application state
    let state = Arc::new(
        AppState::new(
            config.port,
            config.host.clone(),
            config.tick_interval(),
            Arc::new(SystemClock),
        )
        .with_widget(config.widget_settings()),
    );

    // Start the redraw ticker and the expiry notifier
    let ticker_state = Arc::clone(&state);
    tokio::spawn(async move {
        ticker_task(ticker_state).await;
    });

    let notifier_state = Arc::clone(&state);
    let bell = config.bell;
    tokio::spawn(async move {
        expiry_notifier_task(notifier_state, bell).await;
    });

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Timer running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET  /                     - Timer widget");
    info!("  GET  /timer                - Current timer snapshot");
    info!("  POST /timer/start          - Start from {{minutes, seconds}}");
    info!("  POST /timer/preset/:secs   - Start a preset");
    info!("  POST /timer/pause          - Pause the running timer");
    info!("  POST /timer/resume         - Resume the paused timer");
    info!("  POST /timer/cancel         - Cancel the timer");
    info!("  GET  /events               - Expiry notifications (SSE)");
    info!("  GET  /status               - Timer and server status");
    info!("  GET  /health               - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
