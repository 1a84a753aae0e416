//! In-memory catalogs built from parsed entries.

use crate::i18n::Language;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Normalized original → translated strings for one language.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageCatalog {
    messages: HashMap<String, String>,
}

impl LanguageCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a translation, replacing any earlier one for the same original.
    pub fn insert(&mut self, original: impl Into<String>, translated: impl Into<String>) {
        self.messages.insert(original.into(), translated.into());
    }

    pub fn get(&self, original: &str) -> Option<&str> {
        self.messages.get(original).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.messages.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Every catalog one translator knows about, as of a single load.
///
/// Snapshots are never mutated once published; a reload builds a new one.
#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    languages: HashMap<Language, LanguageCatalog>,
    loaded_at: Option<DateTime<Utc>>,
}

impl CatalogSnapshot {
    /// An empty snapshot that has never been loaded.
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn with_languages(languages: HashMap<Language, LanguageCatalog>) -> Self {
        Self {
            languages,
            loaded_at: Some(Utc::now()),
        }
    }

    /// Translation of a normalized original in the given language.
    pub fn get(&self, language: &str, original: &str) -> Option<&str> {
        self.languages
            .get(language)
            .and_then(|catalog| catalog.get(original))
    }

    pub fn catalog(&self, language: &str) -> Option<&LanguageCatalog> {
        self.languages.get(language)
    }

    /// Loaded language identifiers, sorted.
    pub fn languages(&self) -> Vec<Language> {
        let mut languages: Vec<_> = self.languages.keys().cloned().collect();
        languages.sort();
        languages
    }

    /// When this snapshot was built, or `None` if nothing was ever loaded.
    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.loaded_at
    }

    /// Total number of entries across all languages.
    pub fn total_entries(&self) -> usize {
        self.languages.values().map(LanguageCatalog::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_overwrites() {
        let mut catalog = LanguageCatalog::new();
        catalog.insert("Hello", "Hola");
        catalog.insert("Hello", "Buenas");
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("Hello"), Some("Buenas"));
    }

    #[test]
    fn test_iter_yields_every_pair() {
        let mut catalog = LanguageCatalog::new();
        catalog.insert("Hello", "Hola");
        catalog.insert("Bye", "Adios");

        let mut pairs: Vec<_> = catalog.iter().collect();
        pairs.sort();
        assert_eq!(pairs, vec![("Bye", "Adios"), ("Hello", "Hola")]);
    }

    #[test]
    fn test_empty_snapshot() {
        let snapshot = CatalogSnapshot::empty();
        assert!(snapshot.languages().is_empty());
        assert!(snapshot.loaded_at().is_none());
        assert_eq!(snapshot.get("es", "Hello"), None);
    }

    #[test]
    fn test_snapshot_lookup_and_languages() {
        let mut spanish = LanguageCatalog::new();
        spanish.insert("Hello", "Hola");
        let mut fallback = LanguageCatalog::new();
        fallback.insert("Hello", "Hello there");

        let snapshot = CatalogSnapshot::with_languages(HashMap::from([
            (Language::new("messages"), fallback),
            (Language::new("es"), spanish),
        ]));

        assert_eq!(snapshot.get("es", "Hello"), Some("Hola"));
        assert_eq!(snapshot.get("fr", "Hello"), None);
        assert_eq!(
            snapshot.languages(),
            vec![Language::new("es"), Language::new("messages")]
        );
        assert_eq!(snapshot.total_entries(), 2);
        assert!(snapshot.loaded_at().is_some());
    }
}
