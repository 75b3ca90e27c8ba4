use crate::error::ServerResult;
use crate::state::ServerState;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use ingest::ProductId;
use std::sync::Arc;

/// Every catalog product as an `"id - name"` choice, in catalog order
pub async fn list_products(State(state): State<Arc<ServerState>>) -> impl IntoResponse {
    Json(state.recommender.product_choices())
}

/// Catalog row for one product
pub async fn get_product(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<u64>,
) -> ServerResult<impl IntoResponse> {
    let product = state.recommender.product_info(ProductId(id))?;
    Ok(Json(product.clone()))
}
