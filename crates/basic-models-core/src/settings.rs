//! Settings for the admin helpers.
//!
//! [`Settings`] holds the small amount of process configuration the helpers
//! need: logging, the default language and, under [`AdminSettings`], the
//! names of the audit and activation fields the admin presets touch.

use serde::{Deserialize, Serialize};

/// Field names and defaults used by the admin presets.
///
/// # Examples
///
/// ```
/// use basic_models_core::settings::AdminSettings;
///
/// let admin = AdminSettings::default();
/// assert_eq!(admin.created_by_field, "created_by");
/// assert_eq!(admin.active_field, "is_active");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminSettings {
    /// Field stamped with the acting user when a record is first saved.
    pub created_by_field: String,
    /// Field stamped with the acting user on every save.
    pub updated_by_field: String,
    /// Field set when a record is first saved (read-only in the admin).
    pub created_at_field: String,
    /// Field refreshed on every save (read-only in the admin).
    pub updated_at_field: String,
    /// Boolean field toggled by the activate/deactivate actions.
    pub active_field: String,
    /// Whether the presets show the save buttons at the top of the form.
    pub save_on_top: bool,
    /// Change form template used by the one-active preset.
    pub one_active_change_form_template: String,
}

impl Default for AdminSettings {
    fn default() -> Self {
        Self {
            created_by_field: "created_by".to_string(),
            updated_by_field: "updated_by".to_string(),
            created_at_field: "created_at".to_string(),
            updated_at_field: "updated_at".to_string(),
            active_field: "is_active".to_string(),
            save_on_top: true,
            one_active_change_form_template: "admin/preview_change_form.html".to_string(),
        }
    }
}

/// The complete set of settings.
///
/// # Examples
///
/// ```
/// use basic_models_core::settings::Settings;
///
/// let settings = Settings::default();
/// assert!(settings.debug);
/// assert_eq!(settings.log_level, "info");
/// assert_eq!(settings.language_code, "en");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Whether debug mode is enabled (pretty logs instead of JSON).
    pub debug: bool,
    /// The log filter directive (e.g. "info", "basic_models_admin=debug").
    pub log_level: String,
    /// The default language for action labels and operator messages,
    /// applied by [`configure`](crate::configure).
    pub language_code: String,
    /// Admin preset configuration.
    pub admin: AdminSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug: true,
            log_level: "info".to_string(),
            language_code: "en".to_string(),
            admin: AdminSettings::default(),
        }
    }
}
