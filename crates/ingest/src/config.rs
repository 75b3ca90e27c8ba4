//! Configuration for locating and parsing the lookup tables.
//!
//! [`TableConfig`] names the four tables the recommender joins against and
//! the field delimiters they use. It is meant to be embedded in a larger
//! application config and deserialized from YAML or JSON.
//!
//! # Quick Start
//!
//! ```rust
//! use ingest::TableConfig;
//!
//! let config = TableConfig::in_dir("data");
//! config.validate().expect("valid table config");
//! assert_eq!(config.history_delimiter, '\t');
//! ```
//!
//! # Serialization
//!
//! ```json
//! {
//!   "catalog": "data/catalog.csv",
//!   "user_recommendations": "data/UsrRecMatrix.csv",
//!   "item_recommendations": "data/ItemRecMatrix.csv",
//!   "rating_history": "data/ratings.tsv",
//!   "delimiter": ",",
//!   "history_delimiter": "\t"
//! }
//! ```
//!
//! The two delimiter fields are optional.
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::IngestError;

/// Paths and delimiters of the catalog and rating tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableConfig {
    /// Product catalog: `product_id, product_name, image, link,
    /// product_name_description_processed`. Row order must match the
    /// similarity index document order.
    pub catalog: PathBuf,

    /// Precomputed per-user recommendations: `user_id, product_id, rating`.
    pub user_recommendations: PathBuf,

    /// Precomputed per-item audiences: `product_id, user_id, rating`.
    pub item_recommendations: PathBuf,

    /// Observed ratings: `product_id, user_id, user, rating`.
    pub rating_history: PathBuf,

    /// Delimiter of the catalog and recommendation tables.
    ///
    /// Default: `,`
    #[serde(default = "default_delimiter")]
    pub delimiter: char,

    /// Delimiter of the rating history.
    ///
    /// Default: tab
    #[serde(default = "default_history_delimiter")]
    pub history_delimiter: char,
}

impl TableConfig {
    /// Conventional file names inside one directory.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            catalog: dir.join("catalog.csv"),
            user_recommendations: dir.join("user_recs.csv"),
            item_recommendations: dir.join("item_recs.csv"),
            rating_history: dir.join("ratings.tsv"),
            delimiter: default_delimiter(),
            history_delimiter: default_history_delimiter(),
        }
    }

    /// Resolves relative table paths against `base`.
    pub fn with_base_dir(mut self, base: impl AsRef<Path>) -> Self {
        let base = base.as_ref();
        for path in [
            &mut self.catalog,
            &mut self.user_recommendations,
            &mut self.item_recommendations,
            &mut self.rating_history,
        ] {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
        self
    }

    /// Checks that both delimiters are single ASCII characters.
    pub fn validate(&self) -> Result<(), IngestError> {
        delimiter_byte(self.delimiter)?;
        delimiter_byte(self.history_delimiter)?;
        Ok(())
    }

    /// Catalog and recommendation table delimiter as a byte.
    pub fn delimiter_byte(&self) -> Result<u8, IngestError> {
        delimiter_byte(self.delimiter)
    }

    /// Rating history delimiter as a byte.
    pub fn history_delimiter_byte(&self) -> Result<u8, IngestError> {
        delimiter_byte(self.history_delimiter)
    }
}

fn delimiter_byte(delimiter: char) -> Result<u8, IngestError> {
    if delimiter.is_ascii() && !delimiter.is_ascii_alphanumeric() && delimiter != '"' {
        Ok(delimiter as u8)
    } else {
        Err(IngestError::InvalidConfig(format!(
            "delimiter {delimiter:?} must be an ASCII punctuation or whitespace character"
        )))
    }
}

fn default_delimiter() -> char {
    ','
}

fn default_history_delimiter() -> char {
    '\t'
}
