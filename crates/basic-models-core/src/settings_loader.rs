//! Settings loading from configuration files.
//!
//! ## Loading Order
//!
//! 1. Start with default settings.
//! 2. Load from a TOML or JSON file (overriding defaults).
//! 3. Apply environment variable overrides (highest priority).
//!
//! ## Environment Variable Mapping
//!
//! | Env Var | Setting |
//! |---|---|
//! | `BASIC_MODELS_DEBUG` | `debug` |
//! | `BASIC_MODELS_LOG_LEVEL` | `log_level` |
//! | `BASIC_MODELS_LANGUAGE_CODE` | `language_code` |
//! | `BASIC_MODELS_CREATED_BY_FIELD` | `admin.created_by_field` |
//! | `BASIC_MODELS_UPDATED_BY_FIELD` | `admin.updated_by_field` |
//! | `BASIC_MODELS_ACTIVE_FIELD` | `admin.active_field` |
//!
//! ## Examples
//!
//! ```rust,no_run
//! use basic_models_core::settings_loader;
//!
//! let settings = settings_loader::from_toml_file_with_env("config/admin.toml").unwrap();
//! ```

use std::path::Path;

use crate::error::BasicModelsError;
use crate::settings::Settings;

/// Loads settings from a TOML string.
///
/// Keys not present in the TOML keep their default values, including keys
/// inside a partially specified `[admin]` table.
///
/// # Errors
///
/// Returns an error if the TOML is malformed or cannot be deserialized.
pub fn from_toml_str(toml_str: &str) -> Result<Settings, BasicModelsError> {
    let toml_value: toml::Value = toml::from_str(toml_str)
        .map_err(|e| BasicModelsError::ConfigurationError(format!("Failed to parse TOML: {e}")))?;
    merge_onto_defaults(toml_to_json(toml_value), "TOML")
}

/// Loads settings from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the TOML is malformed.
pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Settings, BasicModelsError> {
    let content = read_config(path.as_ref(), "TOML")?;
    from_toml_str(&content)
}

/// Loads settings from a TOML file and then applies environment variable overrides.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the TOML is malformed.
pub fn from_toml_file_with_env(path: impl AsRef<Path>) -> Result<Settings, BasicModelsError> {
    let mut settings = from_toml_file(path)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Loads settings from a JSON string.
///
/// # Errors
///
/// Returns an error if the JSON is malformed or cannot be deserialized.
pub fn from_json_str(json_str: &str) -> Result<Settings, BasicModelsError> {
    let json_value: serde_json::Value = serde_json::from_str(json_str)
        .map_err(|e| BasicModelsError::ConfigurationError(format!("Failed to parse JSON: {e}")))?;
    merge_onto_defaults(json_value, "JSON")
}

/// Loads settings from a JSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the JSON is malformed.
pub fn from_json_file(path: impl AsRef<Path>) -> Result<Settings, BasicModelsError> {
    let content = read_config(path.as_ref(), "JSON")?;
    from_json_str(&content)
}

/// Loads settings from just environment variables (starting from defaults).
pub fn from_env() -> Settings {
    let mut settings = Settings::default();
    apply_env_overrides(&mut settings);
    settings
}

/// Applies `BASIC_MODELS_*` environment variable overrides to a settings struct.
pub fn apply_env_overrides(settings: &mut Settings) {
    apply_overrides_from(settings, |key| std::env::var(key).ok());
}

/// Applies overrides using `lookup` to resolve each `BASIC_MODELS_*` key.
///
/// [`apply_env_overrides`] calls this with the process environment.
pub fn apply_overrides_from<F>(settings: &mut Settings, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(val) = lookup("BASIC_MODELS_DEBUG") {
        settings.debug = matches!(val.to_lowercase().as_str(), "true" | "1" | "yes");
    }

    if let Some(val) = lookup("BASIC_MODELS_LOG_LEVEL") {
        settings.log_level = val;
    }

    if let Some(val) = lookup("BASIC_MODELS_LANGUAGE_CODE") {
        settings.language_code = val;
    }

    if let Some(val) = lookup("BASIC_MODELS_CREATED_BY_FIELD") {
        settings.admin.created_by_field = val;
    }

    if let Some(val) = lookup("BASIC_MODELS_UPDATED_BY_FIELD") {
        settings.admin.updated_by_field = val;
    }

    if let Some(val) = lookup("BASIC_MODELS_ACTIVE_FIELD") {
        settings.admin.active_field = val;
    }
}

// ============================================================
// Helpers
// ============================================================

fn read_config(path: &Path, format: &str) -> Result<String, BasicModelsError> {
    std::fs::read_to_string(path).map_err(|e| {
        BasicModelsError::ConfigurationError(format!(
            "Failed to read {format} file '{}': {e}",
            path.display()
        ))
    })
}

fn merge_onto_defaults(
    value: serde_json::Value,
    format: &str,
) -> Result<Settings, BasicModelsError> {
    let default_json = serde_json::to_value(Settings::default()).map_err(|e| {
        BasicModelsError::ConfigurationError(format!("Failed to serialize default settings: {e}"))
    })?;

    let merged = merge_json(default_json, value);
    serde_json::from_value(merged).map_err(|e| {
        BasicModelsError::ConfigurationError(format!(
            "Failed to deserialize settings from {format}: {e}"
        ))
    })
}

/// Converts a TOML value to a `serde_json::Value`.
fn toml_to_json(value: toml::Value) -> serde_json::Value {
    match value {
        toml::Value::String(s) => serde_json::Value::String(s),
        toml::Value::Integer(i) => serde_json::json!(i),
        toml::Value::Float(f) => serde_json::json!(f),
        toml::Value::Boolean(b) => serde_json::Value::Bool(b),
        toml::Value::Datetime(dt) => serde_json::Value::String(dt.to_string()),
        toml::Value::Array(arr) => {
            serde_json::Value::Array(arr.into_iter().map(toml_to_json).collect())
        }
        toml::Value::Table(table) => {
            let map: serde_json::Map<String, serde_json::Value> = table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect();
            serde_json::Value::Object(map)
        }
    }
}

/// Deep-merges two JSON values. The `override_val` takes precedence.
fn merge_json(base: serde_json::Value, override_val: serde_json::Value) -> serde_json::Value {
    match (base, override_val) {
        (serde_json::Value::Object(mut base_map), serde_json::Value::Object(override_map)) => {
            for (key, override_v) in override_map {
                let merged = if let Some(base_v) = base_map.remove(&key) {
                    merge_json(base_v, override_v)
                } else {
                    override_v
                };
                base_map.insert(key, merged);
            }
            serde_json::Value::Object(base_map)
        }
        (_, override_val) => override_val,
    }
}
