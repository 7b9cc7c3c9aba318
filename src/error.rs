//! Load-time error kinds for documentation catalogs.
//!
//! Search and render are total, so only catalog loading can fail. Errors are
//! reported once when a catalog is materialized, never per query.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading, parsing, or validating a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("reading catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing catalog {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("catalog {origin} has an invalid shape:\n{details}")]
    InvalidCatalogShape { origin: String, details: String },
}

impl CatalogError {
    pub(crate) fn invalid_shape(origin: impl Into<String>, details: impl Into<String>) -> Self {
        Self::InvalidCatalogShape {
            origin: origin.into(),
            details: details.into(),
        }
    }

    /// True for structural problems, as opposed to I/O or JSON syntax errors.
    #[must_use]
    pub fn is_shape_error(&self) -> bool {
        matches!(self, Self::InvalidCatalogShape { .. })
    }
}
