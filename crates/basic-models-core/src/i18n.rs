//! Translation support for action labels and operator messages.
//!
//! - **Catalog**: a global registry of translations per language
//!   ([`catalog`]).
//! - **Activation**: thread-local [`activate`], [`deactivate`], [`get_language`],
//!   falling back to the process default set by [`set_default_language`].
//! - **Lookup**: [`gettext`], [`ngettext`], and [`gettext_lazy`] for labels
//!   that must be translated when rendered rather than when defined.
//!
//! ```
//! use basic_models_core::i18n;
//!
//! i18n::catalog::register_translations("es", vec![
//!     ("Mark selected objects as active", "Marcar objetos seleccionados como activos"),
//! ]);
//!
//! i18n::activate("es");
//! assert_eq!(
//!     i18n::gettext("Mark selected objects as active"),
//!     "Marcar objetos seleccionados como activos"
//! );
//! i18n::deactivate();
//! assert_eq!(
//!     i18n::gettext("Mark selected objects as active"),
//!     "Mark selected objects as active"
//! );
//! ```

pub mod catalog;
pub mod lazy;

use std::cell::RefCell;
use std::sync::RwLock;

pub use lazy::LazyString;

thread_local! {
    static CURRENT_LANGUAGE: RefCell<Option<String>> = const { RefCell::new(None) };
}

static DEFAULT_LANGUAGE: RwLock<Option<String>> = RwLock::new(None);

/// Sets the language used by threads that have not activated one.
pub fn set_default_language(language_code: &str) {
    if let Ok(mut default) = DEFAULT_LANGUAGE.write() {
        *default = Some(language_code.to_string());
    }
}

/// Returns the process default language (`"en"` unless set).
pub fn default_language() -> String {
    DEFAULT_LANGUAGE
        .read()
        .ok()
        .and_then(|default| (*default).clone())
        .unwrap_or_else(|| "en".to_string())
}

/// Activates the given language code for the current thread.
pub fn activate(language_code: &str) {
    CURRENT_LANGUAGE.with(|cell| {
        *cell.borrow_mut() = Some(language_code.to_string());
    });
}

/// Deactivates the current thread's language, reverting to the default.
pub fn deactivate() {
    CURRENT_LANGUAGE.with(|cell| {
        *cell.borrow_mut() = None;
    });
}

/// Returns the language code active on the current thread.
pub fn get_language() -> String {
    CURRENT_LANGUAGE
        .with(|cell| cell.borrow().clone())
        .unwrap_or_else(default_language)
}

/// Translates a message using the current thread's active language.
///
/// If no translation is found, returns the original `msgid`.
pub fn gettext(msgid: &str) -> String {
    let lang = get_language();
    catalog::translate(&lang, msgid).unwrap_or_else(|| msgid.to_string())
}

/// Translates a message with plural support.
///
/// Returns the singular form if `count == 1`, otherwise the plural form.
///
/// # Examples
///
/// ```
/// use basic_models_core::i18n;
///
/// assert_eq!(i18n::ngettext("1 object was", "objects were", 1), "1 object was");
/// assert_eq!(i18n::ngettext("1 object was", "objects were", 4), "objects were");
/// ```
pub fn ngettext(singular: &str, plural: &str, count: u64) -> String {
    let lang = get_language();
    catalog::translate_plural(&lang, singular, count).unwrap_or_else(|| {
        if count == 1 {
            singular.to_string()
        } else {
            plural.to_string()
        }
    })
}

/// Returns a lazy translation that defers [`gettext`] until the value is used.
pub fn gettext_lazy(msgid: &str) -> LazyString {
    LazyString::new(msgid.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activate_and_get_language() {
        deactivate();
        assert_eq!(get_language(), "en");
        activate("fr");
        assert_eq!(get_language(), "fr");
        deactivate();
        assert_eq!(get_language(), "en");
    }

    #[test]
    fn test_gettext_no_translation() {
        deactivate();
        assert_eq!(gettext("untranslated label"), "untranslated label");
    }

    #[test]
    fn test_gettext_registered() {
        catalog::register_translations("nl-test", vec![("Duplicate", "Dupliceren")]);
        activate("nl-test");
        assert_eq!(gettext("Duplicate"), "Dupliceren");
        deactivate();
        assert_eq!(gettext("Duplicate"), "Duplicate");
    }

    #[test]
    fn test_ngettext_fallback() {
        deactivate();
        assert_eq!(ngettext("object", "objects", 0), "objects");
        assert_eq!(ngettext("object", "objects", 1), "object");
        assert_eq!(ngettext("object", "objects", 2), "objects");
    }

    #[test]
    fn test_ngettext_registered() {
        catalog::register_plural_translations("de-test", vec![("object", "Objekt", "Objekte")]);
        activate("de-test");
        assert_eq!(ngettext("object", "objects", 1), "Objekt");
        assert_eq!(ngettext("object", "objects", 3), "Objekte");
        deactivate();
    }

    #[test]
    fn test_language_is_thread_local() {
        activate("it");
        let other = std::thread::spawn(get_language).join().unwrap();
        assert_eq!(other, "en");
        assert_eq!(get_language(), "it");
        deactivate();
    }
}
