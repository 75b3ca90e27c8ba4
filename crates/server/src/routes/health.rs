use crate::error::ServerResult;
use crate::state::{ServerMetadata, ServerState};
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use std::sync::Arc;

/// Health check endpoint (liveness)
/// Returns 200 if server is running
pub async fn health_check(State(state): State<Arc<ServerState>>) -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "service": "shoprec-server",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "uptime_seconds": state.uptime_seconds(),
    }))
}

/// Readiness check endpoint
///
/// The recommender is loaded before the listener binds, so a running server
/// is ready; the response reports what was loaded.
pub async fn readiness_check(
    State(state): State<Arc<ServerState>>,
) -> ServerResult<impl IntoResponse> {
    let recommender = &state.recommender;
    let tables = recommender.tables();

    Ok(Json(json!({
        "status": "ready",
        "service": "shoprec-server",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "uptime_seconds": state.uptime_seconds(),
        "components": {
            "products": tables.catalog.len(),
            "indexed_documents": recommender.artifacts().num_documents(),
            "terms": recommender.artifacts().dictionary().len(),
            "user_recommendations": tables.user_recommendations.len(),
            "item_recommendations": tables.item_recommendations.len(),
            "ratings": tables.rating_history.len(),
            "segmenter": recommender.preprocessor().segmenter_name(),
        }
    })))
}

/// Lookup counters endpoint
pub async fn metrics(State(state): State<Arc<ServerState>>) -> ServerResult<impl IntoResponse> {
    Ok(Json(json!({
        "uptime_seconds": state.uptime_seconds(),
        "lookups": state.stats.snapshot(),
    })))
}

/// Server metadata endpoint
pub async fn server_metadata(
    State(state): State<Arc<ServerState>>,
) -> ServerResult<impl IntoResponse> {
    Ok(Json(ServerMetadata {
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime_seconds(),
    }))
}
