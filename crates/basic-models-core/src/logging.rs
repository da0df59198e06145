//! Logging integration.
//!
//! Provides [`setup_logging`] for installing a [`tracing`] subscriber from
//! [`Settings`](crate::settings::Settings) and span helpers used by the admin
//! handler.

use crate::settings::Settings;

/// Sets up the global tracing subscriber based on the given settings.
///
/// The filter is read from `settings.log_level`. In debug mode a pretty,
/// human-readable format is used; otherwise a structured JSON format is used.
/// Installing a second subscriber is a no-op.
pub fn setup_logging(settings: &Settings) {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_new(&settings.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    if settings.debug {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .pretty()
            .try_init()
            .ok();
    } else {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .json()
            .try_init()
            .ok();
    }
}

/// Creates a span for one admin action run against a model.
///
/// # Examples
///
/// ```
/// use basic_models_core::logging::action_span;
///
/// let span = action_span("activate_objects", "blog.article");
/// let _guard = span.enter();
/// tracing::info!("running action");
/// ```
pub fn action_span(action: &str, model_key: &str) -> tracing::Span {
    tracing::info_span!("admin_action", action, model = model_key)
}

/// Creates a span for a save issued by the admin (single record or formset).
pub fn save_span(model_key: &str, change: bool) -> tracing::Span {
    tracing::debug_span!("admin_save", model = model_key, change)
}
