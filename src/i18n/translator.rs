//! Translator instances: load catalogs from a directory and answer lookups.
//!
//! Each [`Translator`] owns the catalogs of one feature. Loading parses every
//! catalog file into a private [`CatalogSnapshot`] and only then swaps it in,
//! so lookups are never blocked by file-system work and never see a
//! half-built catalog.

use crate::error::CatalogError;
use crate::i18n::{
    normalize, parser, CatalogSnapshot, CatalogValidator, Language, LanguageCatalog,
    LanguageContext, TranslationMetrics, TranslatorRegistry,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, info, warn};

/// Extension of per-language catalog files.
pub const DEFAULT_EXTENSION: &str = "po";

/// File holding the default-language catalog.
pub const DEFAULT_FALLBACK: &str = "messages.pot";

/// Where a translator reads its catalogs from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSource {
    dir: PathBuf,
    extension: String,
    fallback: String,
}

impl CatalogSource {
    /// Catalogs in `dir` using the default extension and fallback file.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            extension: DEFAULT_EXTENSION.to_string(),
            fallback: DEFAULT_FALLBACK.to_string(),
        }
    }

    /// Set the per-language catalog extension (with or without the dot).
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        let extension = extension.into();
        self.extension = extension.trim_start_matches('.').to_string();
        self
    }

    /// Set the file name of the default-language catalog.
    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = fallback.into();
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// Language identifier of the fallback catalog (`messages` by default).
    pub fn default_language(&self) -> Option<Language> {
        Language::from_catalog_path(&self.fallback)
    }

    /// Catalog files in load order: per-language files sorted by name, then
    /// the fallback file.
    ///
    /// Fails if the directory cannot be listed. A missing fallback file is
    /// not an error.
    pub fn catalog_files(&self) -> Result<Vec<PathBuf>, CatalogError> {
        let unavailable = |source| CatalogError::Unavailable {
            path: self.dir.clone(),
            source,
        };

        let mut files = Vec::new();
        for entry in fs::read_dir(&self.dir).map_err(unavailable)? {
            let path = entry.map_err(unavailable)?.path();
            let matches_extension =
                path.extension().and_then(|ext| ext.to_str()) == Some(self.extension.as_str());
            if matches_extension && path.is_file() {
                files.push(path);
            }
        }
        files.sort();

        let fallback = self.dir.join(&self.fallback);
        files.retain(|path| path != &fallback);
        if fallback.is_file() {
            files.push(fallback);
        } else {
            warn!(
                "Fallback catalog {} not found, loading without it",
                fallback.display()
            );
        }

        Ok(files)
    }
}

/// What a successful load read and kept.
#[derive(Debug, Clone, Serialize)]
pub struct LoadSummary {
    /// Name of the translator that was loaded
    pub translator: String,

    /// Catalog files in the order they were merged
    pub files: Vec<PathBuf>,

    /// Entry count per language identifier
    pub entries: BTreeMap<String, usize>,

    /// Entries whose translation breaks a placeholder
    pub validation_errors: usize,

    /// Entries with a suspicious but harmless difference
    pub validation_warnings: usize,

    /// When the new catalogs were built
    pub loaded_at: DateTime<Utc>,
}

/// Translations for one feature, keyed by language identifier.
#[derive(Debug)]
pub struct Translator {
    name: String,
    source: CatalogSource,
    snapshot: RwLock<Arc<CatalogSnapshot>>,
    metrics: TranslationMetrics,
}

impl Translator {
    /// Create an empty translator and register it for global reloads.
    ///
    /// Nothing is loaded yet; lookups return their input until
    /// [`Translator::load`] succeeds.
    pub fn new(
        name: impl Into<String>,
        source: CatalogSource,
        registry: &TranslatorRegistry,
    ) -> Arc<Translator> {
        let translator = Arc::new(Translator {
            name: name.into(),
            source,
            snapshot: RwLock::new(Arc::new(CatalogSnapshot::empty())),
            metrics: TranslationMetrics::new(),
        });
        registry.register(&translator);
        translator
    }

    /// Create, register and load a translator.
    ///
    /// The translator stays registered even if the initial load fails, so a
    /// later global reload can still pick up a directory that appears.
    pub fn open(
        name: impl Into<String>,
        source: CatalogSource,
        registry: &TranslatorRegistry,
    ) -> Result<Arc<Translator>, CatalogError> {
        let translator = Translator::new(name, source, registry);
        translator.load()?;
        Ok(translator)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> &CatalogSource {
        &self.source
    }

    pub fn metrics(&self) -> &TranslationMetrics {
        &self.metrics
    }

    /// Replace all catalogs with the contents of the translator's source.
    pub fn load(&self) -> Result<LoadSummary, CatalogError> {
        self.load_from(&self.source)
    }

    /// Replace all catalogs with the contents of another directory.
    ///
    /// The translator's own source is unchanged, so a later [`Translator::load`]
    /// or global reload reads from it again. On error the previous catalogs
    /// stay in place.
    pub fn load_from(&self, source: &CatalogSource) -> Result<LoadSummary, CatalogError> {
        match build_snapshot(&self.name, source) {
            Ok((snapshot, summary)) => {
                self.publish(snapshot);
                self.metrics.record_load();
                info!(
                    "Loaded {} catalog(s) for '{}' from {} ({} entries)",
                    summary.entries.len(),
                    self.name,
                    source.dir().display(),
                    summary.entries.values().sum::<usize>()
                );
                Ok(summary)
            }
            Err(e) => {
                self.metrics.record_load_failure();
                warn!("Keeping previous catalogs for '{}': {}", self.name, e);
                Err(e)
            }
        }
    }

    fn publish(&self, snapshot: CatalogSnapshot) {
        let mut current = self.snapshot.write().unwrap_or_else(PoisonError::into_inner);
        *current = Arc::new(snapshot);
    }

    /// The catalogs currently in use.
    ///
    /// The returned snapshot is immutable; a concurrent reload publishes a
    /// new one instead of changing it.
    pub fn snapshot(&self) -> Arc<CatalogSnapshot> {
        let current = self.snapshot.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&current)
    }

    /// Translate `original` into `language`.
    ///
    /// Returns `original` unchanged when there is no matching entry.
    pub fn lookup(&self, original: &str, language: &str) -> String {
        let key = normalize(original, true);
        let snapshot = self.snapshot();

        match snapshot.get(language, &key) {
            Some(translated) => {
                self.metrics.record_hit();
                translated.to_string()
            }
            None => {
                self.metrics.record_miss();
                original.to_string()
            }
        }
    }

    /// Translate `original` for the language carried by a request context.
    ///
    /// # Example
    /// ```no_run
    /// use po_translator::i18n::{CatalogSource, Language, Translator, TranslatorRegistry};
    ///
    /// let registry = TranslatorRegistry::new();
    /// let translator = Translator::open("utils", CatalogSource::new("locales/pot"), &registry)?;
    /// let guild_language = Language::new("es");
    /// println!("{}", translator.translate("Bot Information", &guild_language));
    /// # Ok::<(), po_translator::error::CatalogError>(())
    /// ```
    pub fn translate<C: LanguageContext + ?Sized>(&self, original: &str, context: &C) -> String {
        self.lookup(original, context.language())
    }

    /// Language identifiers with a loaded catalog, sorted.
    pub fn languages(&self) -> Vec<Language> {
        self.snapshot().languages()
    }

    pub fn has_language(&self, language: &str) -> bool {
        self.snapshot().catalog(language).is_some()
    }

    /// Identifier of the default-language catalog of this translator's source.
    pub fn default_language(&self) -> Option<Language> {
        self.source.default_language()
    }
}

/// Catalog text with a leading UTF-8 byte-order mark removed.
fn without_byte_order_mark(text: &str) -> &str {
    text.strip_prefix('\u{FEFF}').unwrap_or(text)
}

/// Read, parse and normalize every catalog of `source` into a new snapshot.
fn build_snapshot(
    name: &str,
    source: &CatalogSource,
) -> Result<(CatalogSnapshot, LoadSummary), CatalogError> {
    let files = source.catalog_files()?;
    let mut languages: HashMap<Language, LanguageCatalog> = HashMap::new();
    let mut validation_errors = 0;
    let mut validation_warnings = 0;

    for path in &files {
        let Some(language) = Language::from_catalog_path(path) else {
            continue;
        };
        let bytes = fs::read(path).map_err(|source| CatalogError::Unreadable {
            path: path.clone(),
            source,
        })?;
        let text = String::from_utf8_lossy(&bytes);
        let entries = parser::parse_str(without_byte_order_mark(&text));
        debug!(
            "Parsed {} entries from {} for language '{}'",
            entries.len(),
            path.display(),
            language
        );

        let catalog = languages.entry(language.clone()).or_default();
        for raw in entries {
            let original = normalize(raw.original.as_str(), true);
            let translated = normalize(raw.translated.as_str(), false);
            if original.is_empty() || translated.is_empty() {
                continue;
            }

            let report = CatalogValidator::validate(&original, &translated);
            if report.has_errors() {
                validation_errors += 1;
                warn!(
                    "Catalog entry {:?} in {} ({}): {:?}",
                    original,
                    path.display(),
                    language,
                    report.errors
                );
            }
            if report.has_warnings() {
                validation_warnings += 1;
                warn!(
                    "Catalog entry {:?} in {} ({}): {:?}",
                    original,
                    path.display(),
                    language,
                    report.warnings
                );
            }

            catalog.insert(original, translated);
        }
    }

    languages.retain(|_, catalog| !catalog.is_empty());

    let snapshot = CatalogSnapshot::with_languages(languages);
    let summary = LoadSummary {
        translator: name.to_string(),
        entries: snapshot
            .languages()
            .into_iter()
            .map(|language| {
                let count = snapshot.catalog(language.code()).map_or(0, LanguageCatalog::len);
                (language.to_string(), count)
            })
            .collect(),
        files,
        validation_errors,
        validation_warnings,
        loaded_at: snapshot.loaded_at().unwrap_or_else(Utc::now),
    };

    Ok((snapshot, summary))
}
