use crate::i18n::{CatalogSource, DEFAULT_EXTENSION, DEFAULT_FALLBACK};
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    // Catalogs
    pub locales_dir: PathBuf,
    pub catalog_extension: String,
    pub fallback_catalog: String,

    // Watch mode
    pub reload_interval: Option<Duration>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            // Catalogs
            locales_dir: std::env::var("LOCALES_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("locales/pot")),
            catalog_extension: std::env::var("CATALOG_EXTENSION")
                .unwrap_or_else(|_| DEFAULT_EXTENSION.to_string()),
            fallback_catalog: std::env::var("FALLBACK_CATALOG")
                .unwrap_or_else(|_| DEFAULT_FALLBACK.to_string()),

            // Watch mode (0 or unset disables periodic reloads)
            reload_interval: match std::env::var("CATALOG_RELOAD_SECS") {
                Ok(value) => {
                    let secs: u64 = value
                        .trim()
                        .parse()
                        .with_context(|| format!("CATALOG_RELOAD_SECS is not a number: {value}"))?;
                    (secs > 0).then(|| Duration::from_secs(secs))
                }
                Err(_) => None,
            },
        })
    }

    /// Catalog source described by this configuration.
    pub fn catalog_source(&self) -> CatalogSource {
        CatalogSource::new(&self.locales_dir)
            .with_extension(&self.catalog_extension)
            .with_fallback(&self.fallback_catalog)
    }
}
