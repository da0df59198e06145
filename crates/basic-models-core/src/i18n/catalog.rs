//! Translation catalog.
//!
//! Translations live in a global, thread-safe registry organized by language
//! code. They can be registered programmatically or loaded from JSON:
//!
//! ```json
//! {
//!   "messages": { "Duplicate selected %(verbose_name_plural)s": "Dupliquer les %(verbose_name_plural)s sélectionnés" },
//!   "plurals": { "1 object was": { "singular": "1 objet a été", "plural": "objets ont été" } }
//! }
//! ```

use std::collections::HashMap;
use std::sync::{OnceLock, RwLock};

use serde::Deserialize;

use crate::error::BasicModelsError;

/// A translation catalog for a single language.
#[derive(Debug, Clone, Default)]
pub struct TranslationCatalog {
    messages: HashMap<String, String>,
    /// singular msgid -> (translated singular, translated plural)
    plurals: HashMap<String, (String, String)>,
}

fn global_catalogs() -> &'static RwLock<HashMap<String, TranslationCatalog>> {
    static CATALOGS: OnceLock<RwLock<HashMap<String, TranslationCatalog>>> = OnceLock::new();
    CATALOGS.get_or_init(|| RwLock::new(HashMap::new()))
}

fn with_catalog<F, R>(language: &str, f: F) -> Option<R>
where
    F: FnOnce(&TranslationCatalog) -> Option<R>,
{
    let catalogs = global_catalogs().read().ok()?;
    catalogs.get(language).and_then(f)
}

#[allow(clippy::significant_drop_tightening)]
fn with_catalog_mut<F>(language: &str, f: F)
where
    F: FnOnce(&mut TranslationCatalog),
{
    // A poisoned catalog only loses the registration; lookups fall back to msgids.
    if let Ok(mut catalogs) = global_catalogs().write() {
        let catalog = catalogs.entry(language.to_string()).or_default();
        f(catalog);
    }
}

/// Registers simple message translations for a language.
///
/// Each entry is a `(msgid, translated)` pair. Existing entries are overwritten.
pub fn register_translations(language: &str, entries: Vec<(&str, &str)>) {
    with_catalog_mut(language, |catalog| {
        for (msgid, translated) in entries {
            catalog
                .messages
                .insert(msgid.to_string(), translated.to_string());
        }
    });
}

/// Registers plural translations for a language.
///
/// Each entry is `(singular_msgid, translated_singular, translated_plural)`.
pub fn register_plural_translations(language: &str, entries: Vec<(&str, &str, &str)>) {
    with_catalog_mut(language, |catalog| {
        for (singular, trans_singular, trans_plural) in entries {
            catalog.plurals.insert(
                singular.to_string(),
                (trans_singular.to_string(), trans_plural.to_string()),
            );
        }
    });
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CatalogFile {
    messages: HashMap<String, String>,
    plurals: HashMap<String, PluralEntry>,
}

#[derive(Debug, Deserialize)]
struct PluralEntry {
    singular: String,
    plural: String,
}

/// Loads translations for `language` from a JSON string.
///
/// # Errors
///
/// Returns a `ConfigurationError` if the JSON does not match the catalog format.
pub fn load_json(language: &str, json: &str) -> Result<(), BasicModelsError> {
    let file: CatalogFile = serde_json::from_str(json).map_err(|e| {
        BasicModelsError::ConfigurationError(format!(
            "Invalid translation catalog for '{language}': {e}"
        ))
    })?;
    with_catalog_mut(language, |catalog| {
        catalog.messages.extend(file.messages);
        catalog.plurals.extend(
            file.plurals
                .into_iter()
                .map(|(k, v)| (k, (v.singular, v.plural))),
        );
    });
    Ok(())
}

/// Looks up a simple translation.
pub fn translate(language: &str, msgid: &str) -> Option<String> {
    with_catalog(language, |catalog| catalog.messages.get(msgid).cloned())
}

/// Looks up a plural translation, choosing the form for `count`.
pub fn translate_plural(language: &str, singular: &str, count: u64) -> Option<String> {
    with_catalog(language, |catalog| {
        catalog.plurals.get(singular).map(|(one, many)| {
            if count == 1 {
                one.clone()
            } else {
                many.clone()
            }
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_translate() {
        register_translations("cat-a", vec![("Hello", "Hola")]);
        assert_eq!(translate("cat-a", "Hello"), Some("Hola".to_string()));
        assert_eq!(translate("cat-a", "Missing"), None);
        assert_eq!(translate("cat-unknown", "Hello"), None);
    }

    #[test]
    fn test_register_plural() {
        register_plural_translations("cat-b", vec![("object", "objet", "objets")]);
        assert_eq!(translate_plural("cat-b", "object", 1), Some("objet".to_string()));
        assert_eq!(translate_plural("cat-b", "object", 0), Some("objets".to_string()));
    }

    #[test]
    fn test_load_json() {
        let json = r#"{
            "messages": {"Duplicate": "Dupliquer"},
            "plurals": {"object": {"singular": "objet", "plural": "objets"}}
        }"#;
        load_json("cat-c", json).unwrap();
        assert_eq!(translate("cat-c", "Duplicate"), Some("Dupliquer".to_string()));
        assert_eq!(translate_plural("cat-c", "object", 2), Some("objets".to_string()));
    }

    #[test]
    fn test_load_json_partial_and_invalid() {
        load_json("cat-d", r#"{"messages": {"Yes": "Oui"}}"#).unwrap();
        assert_eq!(translate("cat-d", "Yes"), Some("Oui".to_string()));
        assert!(load_json("cat-d", r#"{"messages": []}"#).is_err());
    }
}
