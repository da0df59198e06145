//! # basic-models-core
//!
//! Error types, settings, logging, translations and text helpers shared by the
//! basic-models admin helpers.
//!
//! ## Modules
//!
//! - [`error`] - Error type and result alias
//! - [`settings`] - Settings, including the admin field-name configuration
//! - [`settings_loader`] - Loading settings from TOML/JSON and the environment
//! - [`logging`] - Tracing-based logging integration
//! - [`i18n`] - Thread-local language activation and the translation catalog
//! - [`utils`] - Text helpers (`slugify`, `interpolate`)

pub mod error;
pub mod i18n;
pub mod logging;
pub mod settings;
pub mod settings_loader;
pub mod utils;

pub use error::{BasicModelsError, BasicModelsResult};
pub use settings::{AdminSettings, Settings};

/// Applies process-wide settings: installs the tracing subscriber and sets
/// the default translation language from `settings.language_code`.
pub fn configure(settings: &Settings) {
    logging::setup_logging(settings);
    i18n::set_default_language(&settings.language_code);
    tracing::debug!(language = %settings.language_code, "configured basic-models");
}
