//! Language identifiers and the per-request language context.
//!
//! A language identifier is whatever a catalog file is named: `es.po` holds
//! the `es` catalog and `messages.pot` holds the `messages` catalog. No
//! validation against a list of known locales is performed; lookups match
//! identifiers exactly.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::path::Path;

/// Identifier of one language catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Language(String);

impl Language {
    /// Create a language identifier from a code string.
    pub fn new(code: impl Into<String>) -> Self {
        Language(code.into())
    }

    /// Derive the identifier from a catalog file path.
    ///
    /// The identifier is the file name with its final extension removed.
    /// Returns `None` for paths without a usable file name.
    ///
    /// # Example
    /// ```
    /// use po_translator::i18n::Language;
    ///
    /// let language = Language::from_catalog_path("locales/pot/es.po").unwrap();
    /// assert_eq!(language.code(), "es");
    /// ```
    pub fn from_catalog_path(path: impl AsRef<Path>) -> Option<Language> {
        let stem = path.as_ref().file_stem()?.to_str()?;
        if stem.is_empty() {
            return None;
        }
        Some(Language(stem.to_string()))
    }

    /// The identifier as a string slice.
    pub fn code(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Language {
    fn from(code: &str) -> Self {
        Language::new(code)
    }
}

impl From<String> for Language {
    fn from(code: String) -> Self {
        Language(code)
    }
}

impl Borrow<str> for Language {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Language {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// The language a request should be answered in.
///
/// Request handlers pass their context explicitly to
/// [`Translator::translate`](crate::i18n::Translator::translate); there is no
/// implicit fallback when a caller has no language to offer.
pub trait LanguageContext {
    /// Language identifier used for catalog lookups.
    fn language(&self) -> &str;
}

impl LanguageContext for str {
    fn language(&self) -> &str {
        self
    }
}

impl LanguageContext for String {
    fn language(&self) -> &str {
        self.as_str()
    }
}

impl LanguageContext for Language {
    fn language(&self) -> &str {
        self.code()
    }
}

impl<T: LanguageContext + ?Sized> LanguageContext for &T {
    fn language(&self) -> &str {
        (**self).language()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_catalog_path_po() {
        let language = Language::from_catalog_path("locales/pot/es.po").expect("should derive");
        assert_eq!(language.code(), "es");
    }

    #[test]
    fn test_from_catalog_path_pot() {
        let language = Language::from_catalog_path("messages.pot").expect("should derive");
        assert_eq!(language, Language::from("messages"));
    }

    #[test]
    fn test_from_catalog_path_keeps_region() {
        let language = Language::from_catalog_path("pt_BR.po").expect("should derive");
        assert_eq!(language.code(), "pt_BR");
    }

    #[test]
    fn test_from_catalog_path_without_file_name() {
        assert!(Language::from_catalog_path("/").is_none());
        assert!(Language::from_catalog_path("").is_none());
    }

    #[test]
    fn test_display_is_code() {
        assert_eq!(Language::new("es").to_string(), "es");
    }

    #[test]
    fn test_serde_is_transparent() {
        let json = serde_json::to_string(&Language::new("es")).expect("should serialize");
        assert_eq!(json, "\"es\"");
        let back: Language = serde_json::from_str(&json).expect("should deserialize");
        assert_eq!(back.code(), "es");
    }

    #[test]
    fn test_context_implementations_agree() {
        let owned = String::from("es");
        let language = Language::new("es");
        assert_eq!("es".language(), "es");
        assert_eq!(owned.language(), "es");
        assert_eq!(language.language(), "es");
        assert_eq!((&language).language(), "es");
    }
}
