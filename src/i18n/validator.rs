//! Catalog entry validation.
//!
//! Checks that a translated catalog string keeps the parts of the original
//! that callers rely on: format placeholders that get filled in at runtime,
//! URLs, and inline code spans.

use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

/// Validation report containing errors and warnings about one entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Problems that will break formatting of the translated string
    pub errors: Vec<String>,

    /// Differences that are probably mistakes but do not break anything
    pub warnings: Vec<String>,
}

impl ValidationReport {
    /// Create a new empty validation report
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Check if the report has any errors
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Check if the report has any warnings
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Check if the report is clean (no errors or warnings)
    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Validator for catalog entries.
pub struct CatalogValidator;

static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();
static URL_REGEX: OnceLock<Regex> = OnceLock::new();

impl CatalogValidator {
    /// Validate one normalized original/translated pair.
    ///
    /// - Placeholders (`{}`, `{0}`, `{name}`) must match exactly, in any order.
    /// - URLs should be preserved.
    /// - The number of backticks should match, so code spans stay closed.
    pub fn validate(original: &str, translated: &str) -> ValidationReport {
        let mut report = ValidationReport::new();

        let mut orig_placeholders = Self::extract_placeholders(original);
        let mut trans_placeholders = Self::extract_placeholders(translated);
        orig_placeholders.sort();
        trans_placeholders.sort();
        if orig_placeholders != trans_placeholders {
            report.errors.push(format!(
                "Placeholder mismatch: original has {:?}, translation has {:?}",
                orig_placeholders, trans_placeholders
            ));
        }

        let orig_urls = Self::extract_urls(original);
        let trans_urls = Self::extract_urls(translated);
        if orig_urls != trans_urls {
            report.warnings.push(format!(
                "URL mismatch: original has {:?}, translation has {:?}",
                orig_urls, trans_urls
            ));
        }

        let orig_ticks = original.matches('`').count();
        let trans_ticks = translated.matches('`').count();
        if orig_ticks != trans_ticks {
            report.warnings.push(format!(
                "Code span mismatch: original has {} backticks, translation has {}",
                orig_ticks, trans_ticks
            ));
        }

        report
    }

    /// Extract all `{...}` format placeholders from text
    fn extract_placeholders(text: &str) -> Vec<String> {
        let regex = PLACEHOLDER_REGEX
            .get_or_init(|| Regex::new(r"\{[A-Za-z0-9_.:]*\}").expect("valid regex"));

        regex
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// Extract all URLs, including bare `www.` links
    fn extract_urls(text: &str) -> Vec<String> {
        let regex = URL_REGEX
            .get_or_init(|| Regex::new(r"(?:https?://|www\.)[^\s)\]>]+").expect("valid regex"));

        regex
            .find_iter(text)
            .map(|m| m.as_str().trim_end_matches(['.', ',']).to_string())
            .collect()
    }
}
