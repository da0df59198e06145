//! Server-side prepopulated fields.
//!
//! A model admin can declare that a field (typically `slug`) is prepopulated
//! from others (typically `name`). The browser normally fills it in while
//! typing; [`prepopulate`] does the same on save for records that arrive with
//! the target still empty. A target that already has a value is never
//! overwritten.

use serde_json::Value;
use tracing::debug;

use basic_models_core::utils::text::slugify;

use crate::model_admin::ModelAdmin;
use crate::record::Record;

/// Fills every empty prepopulated field on `record` from its source fields.
///
/// Source values are rendered as text, joined with a space and slugified.
/// Returns the names of the fields that were filled.
///
/// # Examples
///
/// ```
/// use basic_models_admin::model_admin::ModelAdmin;
/// use basic_models_admin::prepopulate::prepopulate;
/// use basic_models_admin::record::Record;
/// use serde_json::json;
///
/// let admin = ModelAdmin::new("pages", "page").prepopulate("slug", vec!["name"]);
/// let mut record = Record::from_value(json!({"name": "About Us", "slug": ""})).unwrap();
/// prepopulate(&admin, &mut record);
/// assert_eq!(record.get("slug"), Some(&json!("about-us")));
/// ```
pub fn prepopulate(admin: &ModelAdmin, record: &mut Record) -> Vec<String> {
    let mut filled = Vec::new();

    for (target, sources) in &admin.prepopulated_fields {
        if !record.is_blank(target) {
            continue;
        }
        let joined = sources
            .iter()
            .filter_map(|source| record.get(source).and_then(as_text))
            .collect::<Vec<_>>()
            .join(" ");
        let slug = slugify(&joined);
        if slug.is_empty() {
            continue;
        }
        debug!(model = %admin.model_key(), field = %target, %slug, "prepopulated field");
        record.set(target.clone(), Value::String(slug));
        filled.push(target.clone());
    }

    filled
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
