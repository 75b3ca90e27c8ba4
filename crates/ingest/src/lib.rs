//! ShopRec Ingest Layer
//!
//! This is where the lookup tables enter the recommender. Every table is a
//! delimited file with a header row, read once at startup into an immutable,
//! indexed structure.
//!
//! ## What we load
//!
//! - **Catalog** - one row per product with name, image, link and the
//!   processed description. Row order doubles as similarity-index document
//!   order, so the catalog must be the file the index was built from.
//! - **User recommendations** - precomputed `(user, product, rating)` scores.
//! - **Item recommendations** - precomputed `(product, user, rating)` scores.
//! - **Rating history** - observed ratings, tab-separated, with the
//!   customer's display name.
//!
//! Columns are matched by header name, extra columns are ignored and missing
//! ones are reported before any row is parsed. Loads are logged via
//! `tracing`.
//!
//! ## Main entry point
//!
//! Call [`Tables::load`] with a [`TableConfig`], or load one table at a time
//! with [`Catalog::from_path`] and [`RatingTable::from_path`].
//!
//! ## Example
//!
//! ```
//! use ingest::{Catalog, Product, ProductId, RatingRecord, RatingTable};
//!
//! let catalog = Catalog::from_products(vec![Product {
//!     product_id: ProductId(101),
//!     product_name: "Áo thun nam".into(),
//!     image: None,
//!     link: None,
//!     processed_description: "áo thun nam".into(),
//! }])
//! .unwrap();
//! assert_eq!(catalog.position(ProductId(101)), Some(0));
//!
//! let ratings = RatingTable::from_records(vec![RatingRecord::new(7, 101, 4.5)]);
//! assert_eq!(ratings.for_product(ProductId(101)).count(), 1);
//! ```
use std::time::Instant;

use tracing::info;

mod catalog;
mod config;
mod error;
mod ratings;
mod table;
mod types;

pub use crate::catalog::Catalog;
pub use crate::config::TableConfig;
pub use crate::error::IngestError;
pub use crate::ratings::RatingTable;
pub use crate::types::{Product, ProductId, RatingRecord, UserId};

/// Every table the recommender joins against.
#[derive(Debug, Clone, Default)]
pub struct Tables {
    pub catalog: Catalog,
    pub user_recommendations: RatingTable,
    pub item_recommendations: RatingTable,
    pub rating_history: RatingTable,
}

impl Tables {
    /// Validates the config and loads all four tables.
    pub fn load(cfg: &TableConfig) -> Result<Self, IngestError> {
        let start = Instant::now();
        cfg.validate()?;
        let delimiter = cfg.delimiter_byte()?;

        let tables = Self {
            catalog: Catalog::from_path(&cfg.catalog, delimiter)?,
            user_recommendations: RatingTable::from_path(&cfg.user_recommendations, delimiter)?,
            item_recommendations: RatingTable::from_path(&cfg.item_recommendations, delimiter)?,
            rating_history: RatingTable::history_from_path(
                &cfg.rating_history,
                cfg.history_delimiter_byte()?,
            )?,
        };

        info!(
            products = tables.catalog.len(),
            user_recommendations = tables.user_recommendations.len(),
            item_recommendations = tables.item_recommendations.len(),
            ratings = tables.rating_history.len(),
            elapsed_micros = start.elapsed().as_micros(),
            "tables_loaded"
        );
        Ok(tables)
    }
}
