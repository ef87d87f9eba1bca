//! Configuration and CLI argument handling

use std::{path::PathBuf, time::Duration};
use clap::Parser;

use crate::state::duration::{MAX_MINUTES, MAX_SECONDS};

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "hourglass")]
#[command(about = "A simple countdown timer widget served over HTTP")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "8501")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// How often a running timer is recomputed, in milliseconds
    #[arg(long, default_value = "100", value_parser = clap::value_parser!(u64).range(10..=1000))]
    pub tick_interval_ms: u64,

    /// Minutes pre-filled in the widget
    #[arg(long, default_value = "0", value_parser = clap::value_parser!(u32).range(0..=MAX_MINUTES as i64))]
    pub default_minutes: u32,

    /// Seconds pre-filled in the widget
    #[arg(long, default_value = "30", value_parser = clap::value_parser!(u32).range(0..=MAX_SECONDS as i64))]
    pub default_seconds: u32,

    /// Sound file played by the page when the timer expires
    #[arg(long)]
    pub sound: Option<PathBuf>,

    /// Ring the terminal bell when the timer expires
    #[arg(long)]
    pub bell: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Settings handed to the widget page
    pub fn widget_settings(&self) -> WidgetSettings {
        WidgetSettings {
            default_minutes: self.default_minutes,
            default_seconds: self.default_seconds,
            sound: self.sound.clone(),
        }
    }
}

/// What the widget page needs from the configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetSettings {
    pub default_minutes: u32,
    pub default_seconds: u32,
    pub sound: Option<PathBuf>,
}

impl Default for WidgetSettings {
    fn default() -> Self {
        Self {
            default_minutes: 0,
            default_seconds: 30,
            sound: None,
        }
    }
}
