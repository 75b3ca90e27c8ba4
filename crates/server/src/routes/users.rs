use crate::error::ServerResult;
use crate::state::ServerState;
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use ingest::UserId;
use serde::Deserialize;
use std::sync::Arc;

/// `count` / `threshold` query parameters for collaborative lookups
#[derive(Debug, Default, Deserialize)]
pub struct RankParams {
    #[serde(default)]
    pub count: Option<usize>,
    #[serde(default)]
    pub threshold: Option<f32>,
}

/// `limit` query parameter
#[derive(Debug, Default, Deserialize)]
pub struct LimitParams {
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Users with recommendations and a known name
pub async fn list_users(State(state): State<Arc<ServerState>>) -> impl IntoResponse {
    Json(state.recommender.user_choices())
}

/// Users ranked by number of ratings
pub async fn top_raters(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<LimitParams>,
) -> impl IntoResponse {
    let limit = params
        .limit
        .unwrap_or(state.recommender.config().top_raters_limit);
    Json(state.recommender.top_raters(limit))
}

/// Precomputed recommendations for a user
pub async fn user_recommendations(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<u64>,
    Query(params): Query<RankParams>,
) -> ServerResult<impl IntoResponse> {
    let defaults = state.recommender.config();
    let items = state.recommender.user_recommendations(
        UserId(id),
        params.count.unwrap_or(defaults.collaborative_results),
        params.threshold.unwrap_or(defaults.rating_threshold),
    )?;
    Ok(Json(items))
}

/// A user's observed ratings, highest first
pub async fn rating_history(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<u64>,
    Query(params): Query<LimitParams>,
) -> ServerResult<impl IntoResponse> {
    let limit = params
        .limit
        .unwrap_or(state.recommender.config().history_limit);
    let items = state.recommender.user_rating_history(UserId(id), limit)?;
    Ok(Json(items))
}
