use canonical::CanonicalError;
use index::IndexError;
use ingest::{IngestError, ProductId, UserId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default limits and thresholds for lookups.
///
/// Callers pass explicit values per request; these are what front ends use
/// when the request leaves them out. `MatchConfig` is serde-friendly so it
/// can be embedded in the application config.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MatchConfig {
    /// Minimum cosine similarity for content matches.
    pub similarity_threshold: f32,
    /// Number of content matches returned when none is requested.
    pub content_results: usize,
    /// Largest number of content matches a caller may request.
    pub max_content_results: usize,
    /// Minimum rating for collaborative recommendations.
    pub rating_threshold: f32,
    /// Number of collaborative recommendations returned when none is requested.
    pub collaborative_results: usize,
    /// Rows returned from a user's rating history.
    pub history_limit: usize,
    /// Users returned by the most-active-raters lookup.
    pub top_raters_limit: usize,
    /// Rated items listed per user in an item's audience.
    pub audience_history: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: 0.4,
            content_results: 5,
            max_content_results: 10,
            rating_threshold: 3.0,
            collaborative_results: 5,
            history_limit: 20,
            top_raters_limit: 100,
            audience_history: 5,
        }
    }
}

impl MatchConfig {
    pub fn validate(&self) -> Result<(), MatchError> {
        if !(0.0..=1.0).contains(&self.similarity_threshold) {
            return Err(MatchError::InvalidConfig(
                "similarity_threshold must be between 0.0 and 1.0".into(),
            ));
        }
        if !self.rating_threshold.is_finite() {
            return Err(MatchError::InvalidConfig(
                "rating_threshold must be a finite number".into(),
            ));
        }
        if self.content_results == 0 || self.collaborative_results == 0 {
            return Err(MatchError::InvalidConfig(
                "result counts must be greater than zero".into(),
            ));
        }
        if self.content_results > self.max_content_results {
            return Err(MatchError::InvalidConfig(
                "content_results must not exceed max_content_results".into(),
            ));
        }
        if self.history_limit == 0 || self.top_raters_limit == 0 || self.audience_history == 0 {
            return Err(MatchError::InvalidConfig(
                "history and ranking limits must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

/// A catalog product matched by content similarity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductMatch {
    pub product_id: ProductId,
    pub product_name: String,
    pub image: Option<String>,
    pub link: Option<String>,
    pub processed_description: String,
    /// Cosine similarity to the query.
    pub score: f32,
}

/// Result of a content lookup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContentRecommendations {
    /// Set when the query was a product id.
    pub source_product: Option<ProductId>,
    /// Query text after preprocessing, as matched against the index.
    pub processed_query: String,
    pub matches: Vec<ProductMatch>,
}

/// A product with a rating, joined with catalog details when the catalog
/// knows it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RatedItem {
    pub product_id: ProductId,
    pub rating: f32,
    pub product_name: Option<String>,
    pub link: Option<String>,
}

/// A user with the rating they gave or are predicted to give.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AudienceMember {
    pub user_id: UserId,
    pub user: Option<String>,
    pub rating: f32,
    /// The user's own highest-rated items from the rating history.
    pub top_items: Vec<RatedItem>,
}

/// A user ranked by how many ratings they left.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RaterCount {
    pub user_id: UserId,
    pub user: Option<String>,
    pub ratings: usize,
}

/// Selectable entry for a front end: an id with an `"id - name"` label.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Choice {
    pub id: u64,
    pub label: String,
}

impl Choice {
    pub fn new(id: u64, name: &str) -> Self {
        Self {
            id,
            label: format!("{id} - {name}"),
        }
    }
}

/// Errors produced by the lookup layer.
///
/// `UnknownProduct` and `UnknownUser` are ordinary "not found" outcomes of a
/// request, distinct from `EmptyQuery` and from startup failures.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MatchError {
    /// The content query was blank.
    #[error("query is empty")]
    EmptyQuery,
    /// The content query could not be interpreted.
    #[error("invalid query: {0}")]
    InvalidQuery(String),
    #[error("product {0} does not exist")]
    UnknownProduct(ProductId),
    #[error("user {0} does not exist")]
    UnknownUser(UserId),
    /// Invalid configuration.
    #[error("invalid match config: {0}")]
    InvalidConfig(String),
    /// Similarity index and catalog describe different product sets.
    #[error("similarity index has {documents} documents but the catalog has {products} products")]
    ArtifactMismatch { documents: usize, products: usize },
    #[error("index error: {0}")]
    Index(#[from] IndexError),
    #[error("ingest error: {0}")]
    Ingest(#[from] IngestError),
    #[error("preprocessing error: {0}")]
    Canonical(#[from] CanonicalError),
}

impl MatchError {
    /// True for the "does not exist" outcomes.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::UnknownProduct(_) | Self::UnknownUser(_))
    }
}
