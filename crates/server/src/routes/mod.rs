//! API route handlers
//!
//! Routes are organized by functionality:
//!
//! - `health`: liveness, readiness and lookup counters
//! - `content`: preprocessing and content-based recommendations
//! - `products`: catalog browsing
//! - `users`: per-user recommendations, rating history, top raters
//! - `items`: item audiences

pub mod content;
pub mod health;
pub mod items;
pub mod products;
pub mod users;

use crate::error::{ServerError, ServerResult};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

/// API version and base info
///
/// Returns server information including version and available endpoints.
/// This is the root endpoint (GET /).
pub async fn api_info() -> ServerResult<impl IntoResponse> {
    Ok(Json(json!({
        "name": "ShopRec Server",
        "version": env!("CARGO_PKG_VERSION"),
        "api_version": "v1",
        "endpoints": [
            "/api/v1/preprocess",
            "/api/v1/content/recommend",
            "/api/v1/products",
            "/api/v1/products/{id}",
            "/api/v1/users",
            "/api/v1/users/top",
            "/api/v1/users/{id}/recommendations",
            "/api/v1/users/{id}/ratings",
            "/api/v1/items",
            "/api/v1/items/{id}/audience",
            "/health",
            "/ready",
            "/metrics"
        ]
    })))
}

/// 404 Not Found handler
///
/// Returns a standardized error response for undefined routes.
pub async fn not_found() -> ServerError {
    ServerError::NotFound
}
