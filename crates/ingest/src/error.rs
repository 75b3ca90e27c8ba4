//! Error types produced by the ingest crate.
//!
//! Every table is loaded once at startup, so these errors surface as startup
//! failures rather than request failures. All variants are cloneable and
//! comparable so callers and tests can match on them precisely.
//!
//! # Error Categories
//!
//! | Error | Category | Description |
//! |-------|----------|-------------|
//! | [`Io`](IngestError::Io) | I/O | Table file cannot be opened |
//! | [`MissingColumn`](IngestError::MissingColumn) | Schema | Header row lacks a required column |
//! | [`Csv`](IngestError::Csv) | Parse | A row cannot be read or converted |
//! | [`DuplicateProduct`](IngestError::DuplicateProduct) | Validation | Catalog lists a product twice |
//! | [`InvalidConfig`](IngestError::InvalidConfig) | Config | Table configuration is unusable |
//!
//! # Examples
//!
//! ```rust
//! use ingest::{Catalog, IngestError};
//!
//! match Catalog::from_path("/nonexistent/catalog.csv", b',') {
//!     Err(IngestError::Io { path, .. }) => assert!(path.ends_with("catalog.csv")),
//!     other => panic!("unexpected result: {other:?}"),
//! }
//! ```
use thiserror::Error;

/// Errors that can occur while loading catalog and rating tables.
///
/// The enum is marked `#[non_exhaustive]`; callers should include a catch-all
/// arm when matching.
///
/// ```rust
/// use ingest::IngestError;
///
/// let err = IngestError::MissingColumn {
///     path: "ratings.tsv".into(),
///     column: "rating".into(),
/// };
/// assert_eq!(err.to_string(), "ratings.tsv: missing required column `rating`");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum IngestError {
    /// The table file could not be opened or read.
    #[error("failed to open {path}: {message}")]
    Io { path: String, message: String },

    /// The header row does not name a column the table needs.
    ///
    /// Extra columns are always accepted; only missing ones are rejected.
    #[error("{path}: missing required column `{column}`")]
    MissingColumn { path: String, column: String },

    /// A row could not be parsed: wrong field count, a non-numeric id or
    /// rating, or malformed quoting. `line` is 1-based and counts the header.
    #[error("{path}: malformed row{}: {message}", at_line(.line))]
    Csv {
        path: String,
        line: Option<u64>,
        message: String,
    },

    /// The catalog lists the same product id more than once.
    ///
    /// Product ids key every join, so the catalog must be unique.
    #[error("duplicate product id {0} in catalog")]
    DuplicateProduct(u64),

    /// Table configuration is unusable (for example a non-ASCII delimiter).
    #[error("invalid table configuration: {0}")]
    InvalidConfig(String),
}

fn at_line(line: &Option<u64>) -> String {
    line.map(|l| format!(" at line {l}")).unwrap_or_default()
}

impl IngestError {
    pub(crate) fn csv(path: &str, err: &csv::Error) -> Self {
        Self::Csv {
            path: path.to_string(),
            line: err.position().map(|p| p.line()),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_error_message_includes_line_when_known() {
        let with_line = IngestError::Csv {
            path: "catalog.csv".into(),
            line: Some(4),
            message: "invalid digit".into(),
        };
        assert_eq!(
            with_line.to_string(),
            "catalog.csv: malformed row at line 4: invalid digit"
        );

        let without_line = IngestError::Csv {
            path: "catalog.csv".into(),
            line: None,
            message: "bad quote".into(),
        };
        assert_eq!(without_line.to_string(), "catalog.csv: malformed row: bad quote");
    }

    #[test]
    fn errors_are_comparable() {
        assert_eq!(
            IngestError::DuplicateProduct(101),
            IngestError::DuplicateProduct(101)
        );
        assert_ne!(
            IngestError::DuplicateProduct(101),
            IngestError::DuplicateProduct(102)
        );
    }
}
