use crate::error::{ServerError, ServerResult};
use crate::state::ServerState;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use std::sync::Arc;

/// Preprocess request
#[derive(Debug, Deserialize)]
pub struct PreprocessRequest {
    /// Raw product description
    pub text: String,
}

/// Content recommendation request
#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    /// Raw description, or a product id written as digits
    pub query: String,

    /// Maximum results; defaults to the configured content result count
    #[serde(default)]
    pub count: Option<usize>,

    /// Minimum cosine similarity; defaults to the configured threshold
    #[serde(default)]
    pub threshold: Option<f32>,
}

/// Run the preprocessing pipeline over a description.
///
/// Returns the processed text, its tokens, the config version and how many
/// sentences fell back to unsegmented text.
pub async fn preprocess(
    State(state): State<Arc<ServerState>>,
    Json(request): Json<PreprocessRequest>,
) -> ServerResult<impl IntoResponse> {
    Ok(Json(state.recommender.preprocess(&request.text)))
}

/// Content-based recommendations.
///
/// A digit-only query looks up that product's stored description first. A
/// blank query is a 400, an unknown product id a 404; a query with no known
/// vocabulary returns an empty `matches` list.
pub async fn recommend(
    State(state): State<Arc<ServerState>>,
    Json(request): Json<RecommendRequest>,
) -> ServerResult<impl IntoResponse> {
    let defaults = state.recommender.config();
    let count = request.count.unwrap_or(defaults.content_results);
    let threshold = request.threshold.unwrap_or(defaults.similarity_threshold);
    if !(0.0..=1.0).contains(&threshold) {
        return Err(ServerError::BadRequest(
            "threshold must be between 0.0 and 1.0".into(),
        ));
    }

    let result = state
        .recommender
        .recommend_products(&request.query, count, threshold)?;
    Ok(Json(result))
}
