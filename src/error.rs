//! Errors surfaced while loading message catalogs.
//!
//! Parsing never fails: malformed lines are skipped by the parser. Lookups
//! never fail either: a miss returns the caller's string unchanged. The only
//! fallible operation is reading catalogs from disk.

use std::io;
use std::path::{Path, PathBuf};

/// Failure to read catalogs from their source directory.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The catalog directory is missing or cannot be listed.
    #[error("catalog directory {} is unavailable: {source}", .path.display())]
    Unavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A catalog file was listed but could not be read.
    #[error("catalog file {} could not be read: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl CatalogError {
    /// Path of the directory or file that failed.
    pub fn path(&self) -> &Path {
        match self {
            CatalogError::Unavailable { path, .. } | CatalogError::Unreadable { path, .. } => path,
        }
    }
}
