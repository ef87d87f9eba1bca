//! Widget page

use crate::{
    config::WidgetSettings,
    state::duration::{MAX_MINUTES, MAX_SECONDS},
};

const TEMPLATE: &str = include_str!("../../static/index.html");

/// Fill the page template with the configured input defaults
pub fn render_page(settings: &WidgetSettings) -> String {
    TEMPLATE
        .replace("{{DEFAULT_MINUTES}}", &settings.default_minutes.to_string())
        .replace("{{DEFAULT_SECONDS}}", &settings.default_seconds.to_string())
        .replace("{{MAX_MINUTES}}", &MAX_MINUTES.to_string())
        .replace("{{MAX_SECONDS}}", &MAX_SECONDS.to_string())
}
