//! ShopRec Server - HTTP REST API for the fashion catalog recommender
//!
//! This crate exposes the read-only lookups of [`matcher::Recommender`] over
//! HTTP. The recommender (artifacts, tables, preprocessing config) is loaded
//! once at startup from the YAML app config and shared by every request.
//!
//! # Features
//!
//! - **Middleware**: Compression, CORS, request ID tracking, structured logging
//! - **Configuration**: Environment variable and file-based configuration
//! - **Error Handling**: JSON error bodies with error codes; unknown ids are
//!   404, blank or invalid queries 400
//! - **Graceful Shutdown**: SIGTERM and Ctrl+C
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use server::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::load()?;
//!     server::start_server(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! # API Endpoints
//!
//! - `GET /` - API information
//! - `GET /health` - Liveness probe
//! - `GET /ready` - Readiness probe with loaded table sizes
//! - `GET /metrics` - Per-lookup counters
//! - `POST /api/v1/preprocess` - Run the preprocessing pipeline
//! - `POST /api/v1/content/recommend` - Content-based recommendations
//! - `GET /api/v1/products` - Product choices
//! - `GET /api/v1/products/{id}` - Product info
//! - `GET /api/v1/users` - User choices
//! - `GET /api/v1/users/top` - Most active raters
//! - `GET /api/v1/users/{id}/recommendations` - Recommendations for a user
//! - `GET /api/v1/users/{id}/ratings` - A user's rating history
//! - `GET /api/v1/items` - Item choices
//! - `GET /api/v1/items/{id}/audience` - Likely buyers of an item
//! - `GET /api/v1/metadata` - Server metadata

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::{build_router, start_server};
pub use state::ServerState;
