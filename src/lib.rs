//! Hourglass - A simple countdown timer widget served over HTTP
//!
//! This library provides the countdown state machine, the session state that
//! owns it, and the HTTP surface the widget page talks to.

pub mod api;
pub mod config;
pub mod error;
pub mod state;
pub mod tasks;
pub mod utils;
pub mod view;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use error::TimerError;
pub use state::{AppState, TimerState};
pub use utils::signals::shutdown_signal;
