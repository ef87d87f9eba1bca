//! Background tasks module
//!
//! This module contains background tasks that run alongside the HTTP server.

pub mod notifier;
pub mod ticker;

// Re-export main functions
pub use notifier::expiry_notifier_task;
pub use ticker::ticker_task;
