//! Load-time error types.

use thiserror::Error;

/// Errors raised while parsing the bundled data tables.
///
/// Only structural failures surface here; per-record incompleteness is
/// handled by dropping and reporting (see `LoadReport`).
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("malformed {table} table: {source}")]
    Table {
        table: &'static str,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("malformed technique corpus: {0}")]
    Corpus(#[from] serde_json::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, CatalogError>;
