//! Translator registry: the set of live translators that a global reload
//! refreshes.
//!
//! The application's startup routine owns one [`TranslatorRegistry`] and hands
//! it to every [`Translator`] it creates. The registry only holds weak
//! handles; translators live as long as the features that own them.

use crate::i18n::{LoadSummary, Translator};
use serde::Serialize;
use std::sync::{Arc, Mutex, PoisonError, Weak};
use tracing::{info, warn};

/// Append-only list of registered translators.
#[derive(Debug, Default)]
pub struct TranslatorRegistry {
    translators: Mutex<Vec<Weak<Translator>>>,
}

/// A translator that failed to reload.
#[derive(Debug, Clone, Serialize)]
pub struct ReloadFailure {
    /// Name of the translator
    pub translator: String,

    /// Why its catalogs could not be read
    pub error: String,
}

/// Outcome of [`TranslatorRegistry::reload_all`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReloadReport {
    /// Translators whose catalogs were replaced
    pub reloaded: Vec<LoadSummary>,

    /// Translators that kept their previous catalogs
    pub failed: Vec<ReloadFailure>,
}

impl ReloadReport {
    /// Check if every translator reloaded
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

impl TranslatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a translator to the reload list.
    ///
    /// Called by [`Translator::new`]; registering the same translator twice
    /// is a no-op.
    pub fn register(&self, translator: &Arc<Translator>) {
        let mut translators = self.translators.lock().unwrap_or_else(PoisonError::into_inner);
        let handle = Arc::downgrade(translator);
        if !translators.iter().any(|existing| existing.ptr_eq(&handle)) {
            translators.push(handle);
        }
    }

    /// Translators that are still alive, in registration order.
    pub fn translators(&self) -> Vec<Arc<Translator>> {
        self.translators
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter_map(Weak::upgrade)
            .collect()
    }

    /// Find a live translator by name.
    pub fn get(&self, name: &str) -> Option<Arc<Translator>> {
        self.translators()
            .into_iter()
            .find(|translator| translator.name() == name)
    }

    /// Number of live translators.
    pub fn len(&self) -> usize {
        self.translators().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reload every live translator from its own source.
    ///
    /// Translators are reloaded one after another and independently: a
    /// failure is logged and recorded, and the remaining translators are
    /// still reloaded. The registry lock is not held while catalogs are read.
    pub fn reload_all(&self) -> ReloadReport {
        let mut report = ReloadReport::default();

        for translator in self.translators() {
            match translator.load() {
                Ok(summary) => report.reloaded.push(summary),
                Err(e) => {
                    warn!("Reload failed for '{}': {}", translator.name(), e);
                    report.failed.push(ReloadFailure {
                        translator: translator.name().to_string(),
                        error: e.to_string(),
                    });
                }
            }
        }

        info!(
            "Reloaded {} translator(s), {} failed",
            report.reloaded.len(),
            report.failed.len()
        );
        report
    }
}
