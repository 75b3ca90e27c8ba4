use crate::error::ServerResult;
use crate::routes::users::RankParams;
use crate::state::ServerState;
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use ingest::ProductId;
use std::sync::Arc;

/// Items with a precomputed audience that exist in the catalog
pub async fn list_items(State(state): State<Arc<ServerState>>) -> impl IntoResponse {
    Json(state.recommender.item_choices())
}

/// Users most likely to rate an item highly, with their own top items
pub async fn item_audience(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<u64>,
    Query(params): Query<RankParams>,
) -> ServerResult<impl IntoResponse> {
    let defaults = state.recommender.config();
    let members = state.recommender.item_audience(
        ProductId(id),
        params.count.unwrap_or(defaults.collaborative_results),
        params.threshold.unwrap_or(defaults.rating_threshold),
    )?;
    Ok(Json(members))
}
