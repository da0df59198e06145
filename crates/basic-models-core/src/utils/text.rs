//! String utility functions.
//!
//! `slugify` backs slug prepopulation and `interpolate` fills `%(name)s`
//! placeholders in translated labels and messages.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;

/// Converts a string to a URL-friendly slug.
///
/// Lowercases, removes characters other than word characters, whitespace and
/// hyphens, collapses whitespace and hyphen runs into a single hyphen and trims
/// leading and trailing hyphens.
///
/// # Examples
///
/// ```
/// use basic_models_core::utils::text::slugify;
///
/// assert_eq!(slugify("Hello World!"), "hello-world");
/// assert_eq!(slugify("  Spaced  Out  "), "spaced-out");
/// assert_eq!(slugify("already-slugged"), "already-slugged");
/// ```
pub fn slugify(s: &str) -> String {
    static NON_ALNUM: OnceLock<Regex> = OnceLock::new();
    static MULTI_HYPHEN: OnceLock<Regex> = OnceLock::new();

    let non_alnum = NON_ALNUM.get_or_init(|| Regex::new(r"[^\w\s-]").unwrap());
    let multi_hyphen = MULTI_HYPHEN.get_or_init(|| Regex::new(r"[-\s]+").unwrap());

    let s = s.to_lowercase();
    let s = non_alnum.replace_all(&s, "");
    let s = multi_hyphen.replace_all(&s, "-");
    s.trim_matches('-').to_string()
}

/// Replaces `%(name)s` placeholders with values from `params`.
///
/// Placeholders without a matching parameter are left untouched.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use basic_models_core::utils::text::interpolate;
///
/// let mut params = HashMap::new();
/// params.insert("verbose_name_plural", "pages".to_string());
/// assert_eq!(
///     interpolate("Duplicate selected %(verbose_name_plural)s", &params),
///     "Duplicate selected pages"
/// );
/// ```
pub fn interpolate(template: &str, params: &HashMap<&str, String>) -> String {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    let placeholder = PLACEHOLDER.get_or_init(|| Regex::new(r"%\((\w+)\)s").unwrap());

    placeholder
        .replace_all(template, |caps: &regex::Captures<'_>| {
            params
                .get(&caps[1])
                .cloned()
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}
