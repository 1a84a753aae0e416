//! Message-catalog translation.
//!
//! Catalog files are parsed into raw original/translated pairs, both sides are
//! normalized, and the result is indexed per language so that request
//! handlers can translate a string for the language of the current request.
//!
//! # Architecture
//!
//! - `normalize`: whitespace and escape canonicalization shared by loading and lookups
//! - `parser`: line-oriented `msgid`/`msgstr` state machine
//! - `catalog`: per-language maps and the immutable snapshot a translator serves from
//! - `language`: language identifiers and the explicit per-request context
//! - `translator`: loads a catalog directory and answers lookups
//! - `registry`: the set of live translators, reloaded together on demand
//! - `validator`: placeholder/URL checks run on every loaded entry
//! - `metrics`: hit/miss and load counters per translator
//!
//! # Example
//!
//! ```rust,no_run
//! use po_translator::i18n::{CatalogSource, Translator, TranslatorRegistry};
//!
//! let registry = TranslatorRegistry::new();
//! let translator = Translator::open("utils", CatalogSource::new("locales/pot"), &registry)?;
//!
//! assert_eq!(translator.lookup("Uptime", "xx"), "Uptime");
//!
//! // after editing catalogs on disk
//! let report = registry.reload_all();
//! assert!(report.is_complete());
//! # Ok::<(), po_translator::error::CatalogError>(())
//! ```

mod catalog;
mod language;
mod metrics;
mod normalize;
pub mod parser;
mod registry;
mod translator;
mod validator;

pub use catalog::{CatalogSnapshot, LanguageCatalog};
pub use language::{Language, LanguageContext};
pub use metrics::{MetricsReport, TranslationMetrics};
pub use normalize::normalize;
pub use parser::{EntrySet, RawEntry};
pub use registry::{ReloadFailure, ReloadReport, TranslatorRegistry};
pub use translator::{CatalogSource, LoadSummary, Translator, DEFAULT_EXTENSION, DEFAULT_FALLBACK};
pub use validator::{CatalogValidator, ValidationReport};
