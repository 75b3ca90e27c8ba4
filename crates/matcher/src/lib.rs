//! # ShopRec Matcher (`matcher`)
//!
//! ## Purpose
//!
//! `matcher` is the read side of the recommender. It joins the preprocessing
//! pipeline (`canonical`), the similarity artifacts (`index`) and the lookup
//! tables (`ingest`) behind one context object, [`Recommender`], which is
//! built once at startup and passed by reference to every request.
//!
//! ## Lookups
//!
//! - **Content** - [`Recommender::recommend_products`] takes a raw
//!   description or a product id, runs it through the pipeline and ranks the
//!   catalog by cosine similarity.
//! - **Collaborative** - [`Recommender::user_recommendations`] and
//!   [`Recommender::item_audience`] slice the precomputed rating tables:
//!   filter to the key, sort by rating, keep rows at or above the threshold,
//!   take the top N.
//! - **Browsing** - product info, rating history, most active raters and the
//!   `"id - name"` choice lists front ends show.
//!
//! Unknown ids surface as [`MatchError::UnknownProduct`] or
//! [`MatchError::UnknownUser`]; a blank query is [`MatchError::EmptyQuery`].
//! A query with no known vocabulary is not an error, it just matches nothing.
//!
//! ## Example Usage
//!
//! ```
//! use canonical::{Preprocessor, StopwordSet};
//! use index::ContentArtifacts;
//! use ingest::{Catalog, Product, ProductId, Tables};
//! use matcher::{MatchConfig, Recommender};
//!
//! let catalog = Catalog::from_products(vec![
//!     Product {
//!         product_id: ProductId(101),
//!         product_name: "Áo thun nam".into(),
//!         image: None,
//!         link: None,
//!         processed_description: "áo thun nam".into(),
//!     },
//!     Product {
//!         product_id: ProductId(102),
//!         product_name: "Quần jean".into(),
//!         image: None,
//!         link: None,
//!         processed_description: "quần jean".into(),
//!     },
//! ])
//! .unwrap();
//! let artifacts = ContentArtifacts::from_corpus(catalog.processed_descriptions());
//! let tables = Tables { catalog, ..Tables::default() };
//!
//! let recommender = Recommender::new(
//!     Preprocessor::with_stopwords(StopwordSet::default()),
//!     artifacts,
//!     tables,
//!     MatchConfig::default(),
//! )
//! .unwrap();
//!
//! let result = recommender.recommend_products("101", 5, 0.4).unwrap();
//! assert_eq!(result.matches[0].product_id, ProductId(101));
//! ```
//!
//! ## Observability
//!
//! Lookups log at `debug` level through `tracing`. Pass a [`LookupMetrics`]
//! implementation to [`Recommender::with_metrics`] to record per-lookup
//! latency and result counts.

mod collaborative;
pub mod engine;
pub mod metrics;
pub mod types;

pub use crate::engine::Recommender;
pub use crate::metrics::{LookupKind, LookupMetrics};
pub use crate::types::{
    AudienceMember, Choice, ContentRecommendations, MatchConfig, MatchError, ProductMatch,
    RaterCount, RatedItem,
};
