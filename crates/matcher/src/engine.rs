use std::sync::Arc;
use std::time::Instant;

use canonical::{Preprocessor, ProcessedDescription};
use index::ContentArtifacts;
use ingest::{Product, ProductId, RatingRecord, Tables, UserId};
use tracing::debug;

use crate::collaborative::{by_rating_desc, top_rated};
use crate::metrics::{LookupKind, LookupMetrics};
use crate::types::{
    AudienceMember, Choice, ContentRecommendations, MatchConfig, MatchError, ProductMatch,
    RaterCount, RatedItem,
};


/// Read-only lookup context: preprocessing, similarity artifacts and tables.
///
/// Built once at startup and shared (typically as `Arc<Recommender>`); no
/// lookup mutates it.
pub struct Recommender {
    preprocessor: Preprocessor,
    artifacts: ContentArtifacts,
    tables: Tables,
    config: MatchConfig,
    metrics: Option<Arc<dyn LookupMetrics>>,
}

impl std::fmt::Debug for Recommender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Recommender")
            .field("preprocessor", &self.preprocessor)
            .field("documents", &self.artifacts.num_documents())
            .field("products", &self.tables.catalog.len())
            .field("config", &self.config)
            .field("metrics", &self.metrics.is_some())
            .finish()
    }
}

impl Recommender {
    /// Assemble a recommender after checking that the similarity index was
    /// built over this catalog (one document per product row).
    pub fn new(
        preprocessor: Preprocessor,
        artifacts: ContentArtifacts,
        tables: Tables,
        config: MatchConfig,
    ) -> Result<Self, MatchError> {
        config.validate()?;
        let documents = artifacts.num_documents();
        let products = tables.catalog.len();
        if documents != products {
            return Err(MatchError::ArtifactMismatch {
                documents,
                products,
            });
        }
        Ok(Self {
            preprocessor,
            artifacts,
            tables,
            config,
            metrics: None,
        })
    }

    /// Report every lookup to `metrics`.
    pub fn with_metrics(mut self, metrics: Arc<dyn LookupMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn preprocessor(&self) -> &Preprocessor {
        &self.preprocessor
    }

    pub fn artifacts(&self) -> &ContentArtifacts {
        &self.artifacts
    }

    pub fn tables(&self) -> &Tables {
        &self.tables
    }

    /// Run the preprocessing pipeline over a raw description.
    pub fn preprocess(&self, raw: &str) -> ProcessedDescription {
        self.preprocessor.preprocess(raw)
    }

    /// Content-based recommendations for a query.
    ///
    /// A query made only of ASCII digits is a product id and is replaced by
    /// that product's stored processed description; anything else is a raw
    /// description. Either way the text goes through the full pipeline and
    /// is ranked against the similarity index. A query with no known term
    /// yields an empty result, not an error.
    pub fn recommend_products(
        &self,
        query: &str,
        count: usize,
        threshold: f32,
    ) -> Result<ContentRecommendations, MatchError> {
        let start = Instant::now();
        let result = self.content_lookup(query, count, threshold);
        self.observe(
            LookupKind::Content,
            start,
            result.as_ref().map_or(0, |r| r.matches.len()),
        );
        result
    }

    fn content_lookup(
        &self,
        query: &str,
        count: usize,
        threshold: f32,
    ) -> Result<ContentRecommendations, MatchError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(MatchError::EmptyQuery);
        }
        if count > self.config.max_content_results {
            return Err(MatchError::InvalidQuery(format!(
                "at most {} results may be requested",
                self.config.max_content_results
            )));
        }
        if !threshold.is_finite() {
            return Err(MatchError::InvalidQuery(
                "threshold must be a finite number".into(),
            ));
        }

        let (source_product, text) = if query.bytes().all(|b| b.is_ascii_digit()) {
            let id: ProductId = query.parse().map_err(|_| {
                MatchError::InvalidQuery(format!("product id {query} is out of range"))
            })?;
            let product = self
                .tables
                .catalog
                .get(id)
                .ok_or(MatchError::UnknownProduct(id))?;
            (Some(id), product.processed_description.as_str())
        } else {
            (None, query)
        };

        let processed = self.preprocessor.preprocess(text);
        let hits = self
            .artifacts
            .similar(processed.tokens.as_slice(), threshold, count);
        let matches: Vec<ProductMatch> = hits
            .iter()
            .filter_map(|hit| {
                self.tables
                    .catalog
                    .at(hit.doc)
                    .map(|product| product_match(product, hit.score))
            })
            .collect();

        debug!(
            source_product = ?source_product.map(|p| p.0),
            tokens = processed.tokens.len(),
            segmenter_fallbacks = processed.segmenter_fallbacks,
            matches = matches.len(),
            "content_lookup"
        );

        Ok(ContentRecommendations {
            source_product,
            processed_query: processed.text,
            matches,
        })
    }

    /// Catalog row for a product.
    pub fn product_info(&self, product: ProductId) -> Result<&Product, MatchError> {
        self.tables
            .catalog
            .get(product)
            .ok_or(MatchError::UnknownProduct(product))
    }

    /// Every catalog product as `"id - name"`, in catalog order.
    pub fn product_choices(&self) -> Vec<Choice> {
        self.tables
            .catalog
            .iter()
            .map(|p| Choice::new(p.product_id.0, &p.product_name))
            .collect()
    }

    /// Users with precomputed recommendations and a known name, by id.
    pub fn user_choices(&self) -> Vec<Choice> {
        let history = &self.tables.rating_history;
        self.tables
            .user_recommendations
            .user_ids()
            .into_iter()
            .filter_map(|user| history.user_name(user).map(|name| Choice::new(user.0, name)))
            .collect()
    }

    /// Items with precomputed audiences that exist in the catalog, by id.
    pub fn item_choices(&self) -> Vec<Choice> {
        let catalog = &self.tables.catalog;
        self.tables
            .item_recommendations
            .product_ids()
            .into_iter()
            .filter_map(|item| {
                catalog
                    .get(item)
                    .map(|p| Choice::new(item.0, &p.product_name))
            })
            .collect()
    }

    /// Top recommended products for a user: rating descending, at least
    /// `threshold`, at most `count`.
    pub fn user_recommendations(
        &self,
        user: UserId,
        count: usize,
        threshold: f32,
    ) -> Result<Vec<RatedItem>, MatchError> {
        let start = Instant::now();
        let table = &self.tables.user_recommendations;
        let result = if table.contains_user(user) {
            let items: Vec<RatedItem> = top_rated(table.for_user(user), threshold, count)
                .into_iter()
                .map(|row| self.rated_item(row))
                .collect();
            debug!(user = user.0, items = items.len(), "user_recommendations");
            Ok(items)
        } else {
            Err(MatchError::UnknownUser(user))
        };
        self.observe(
            LookupKind::UserRecommendations,
            start,
            result.as_ref().map_or(0, Vec::len),
        );
        result
    }

    /// Users most likely to rate an item highly, each with their name and
    /// their own top-rated items from the rating history.
    pub fn item_audience(
        &self,
        item: ProductId,
        count: usize,
        threshold: f32,
    ) -> Result<Vec<AudienceMember>, MatchError> {
        let start = Instant::now();
        let table = &self.tables.item_recommendations;
        let result = if table.contains_product(item) {
            let members: Vec<AudienceMember> = top_rated(table.for_product(item), threshold, count)
                .into_iter()
                .map(|row| AudienceMember {
                    user_id: row.user_id,
                    user: self.user_name(row.user_id),
                    rating: row.rating,
                    top_items: self.history_items(row.user_id, self.config.audience_history),
                })
                .collect();
            debug!(item = item.0, members = members.len(), "item_audience");
            Ok(members)
        } else {
            Err(MatchError::UnknownProduct(item))
        };
        self.observe(
            LookupKind::ItemAudience,
            start,
            result.as_ref().map_or(0, Vec::len),
        );
        result
    }

    /// A user's observed ratings, highest first, at most `limit` rows.
    pub fn user_rating_history(
        &self,
        user: UserId,
        limit: usize,
    ) -> Result<Vec<RatedItem>, MatchError> {
        let start = Instant::now();
        let result = if self.tables.rating_history.contains_user(user) {
            Ok(self.history_items(user, limit))
        } else {
            Err(MatchError::UnknownUser(user))
        };
        self.observe(
            LookupKind::RatingHistory,
            start,
            result.as_ref().map_or(0, Vec::len),
        );
        result
    }

    /// Users ranked by how many ratings they left; ties by user id.
    pub fn top_raters(&self, limit: usize) -> Vec<RaterCount> {
        let start = Instant::now();
        let history = &self.tables.rating_history;
        let mut counts: Vec<(UserId, usize)> = history.rating_counts().collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        let raters: Vec<RaterCount> = counts
            .into_iter()
            .take(limit)
            .map(|(user_id, ratings)| RaterCount {
                user_id,
                user: self.user_name(user_id),
                ratings,
            })
            .collect();
        self.observe(LookupKind::TopRaters, start, raters.len());
        raters
    }

    fn history_items(&self, user: UserId, limit: usize) -> Vec<RatedItem> {
        by_rating_desc(self.tables.rating_history.for_user(user))
            .into_iter()
            .take(limit)
            .map(|row| self.rated_item(row))
            .collect()
    }

    fn rated_item(&self, row: &RatingRecord) -> RatedItem {
        let product = self.tables.catalog.get(row.product_id);
        RatedItem {
            product_id: row.product_id,
            rating: row.rating,
            product_name: product.map(|p| p.product_name.clone()),
            link: product.and_then(|p| p.link.clone()),
        }
    }

    fn user_name(&self, user: UserId) -> Option<String> {
        self.tables.rating_history.user_name(user).map(str::to_string)
    }

    fn observe(&self, kind: LookupKind, start: Instant, results: usize) {
        if let Some(metrics) = &self.metrics {
            metrics.record_lookup(kind, start.elapsed(), results);
        }
    }
}

fn product_match(product: &Product, score: f32) -> ProductMatch {
    ProductMatch {
        product_id: product.product_id,
        product_name: product.product_name.clone(),
        image: product.image.clone(),
        link: product.link.clone(),
        processed_description: product.processed_description.clone(),
        score,
    }
}
