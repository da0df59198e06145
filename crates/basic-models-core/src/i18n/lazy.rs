//! Lazy translation strings.
//!
//! [`LazyString`] defers the translation lookup until the string is displayed,
//! so labels defined once at registration time follow whatever language is
//! active when the admin renders them.

use std::fmt;

/// A lazily-translated string.
///
/// # Examples
///
/// ```
/// use basic_models_core::i18n::{self, LazyString};
///
/// let lazy = LazyString::new("Duplicate".to_string());
/// assert_eq!(lazy.to_string(), "Duplicate");
///
/// i18n::catalog::register_translations("pt", vec![("Duplicate", "Duplicar")]);
/// i18n::activate("pt");
/// assert_eq!(lazy.to_string(), "Duplicar");
/// i18n::deactivate();
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct LazyString {
    msgid: String,
}

impl LazyString {
    /// Creates a new `LazyString` with the given message ID.
    pub const fn new(msgid: String) -> Self {
        Self { msgid }
    }

    /// Returns the untranslated message ID.
    pub fn msgid(&self) -> &str {
        &self.msgid
    }

    /// Evaluates the translation using the current thread's active language.
    pub fn evaluate(&self) -> String {
        super::gettext(&self.msgid)
    }
}

impl fmt::Display for LazyString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.evaluate())
    }
}

impl fmt::Debug for LazyString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyString")
            .field("msgid", &self.msgid)
            .finish()
    }
}

impl From<&str> for LazyString {
    fn from(msgid: &str) -> Self {
        Self::new(msgid.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n;

    #[test]
    fn test_msgid_is_untranslated() {
        i18n::catalog::register_translations("lazy-test", vec![("Save", "Sichern")]);
        i18n::activate("lazy-test");
        let lazy = LazyString::from("Save");
        assert_eq!(lazy.msgid(), "Save");
        assert_eq!(lazy.evaluate(), "Sichern");
        i18n::deactivate();
        assert_eq!(lazy.evaluate(), "Save");
    }

    #[test]
    fn test_debug_shows_msgid() {
        let lazy = LazyString::from("Hello");
        assert!(format!("{lazy:?}").contains("Hello"));
    }
}
