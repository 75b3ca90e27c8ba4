use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use matcher::MatchError;
use serde::{Deserialize, Serialize};
use serde_json::json;

pub type ServerResult<T> = Result<T, ServerError>;

/// Server error types
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Lookup failed: {0}")]
    Match(#[from] MatchError),

    #[error("Startup failed: {0}")]
    Pipeline(#[from] shoprec::PipelineError),

    #[error("Invalid app config: {0}")]
    AppConfig(#[from] shoprec::ConfigLoadError),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found")]
    NotFound,
}

/// API error response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl ServerError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::NotFound => StatusCode::NOT_FOUND,
            ServerError::Match(err) => match err {
                MatchError::UnknownProduct(_) | MatchError::UnknownUser(_) => {
                    StatusCode::NOT_FOUND
                }
                MatchError::EmptyQuery | MatchError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ServerError::Pipeline(_)
            | ServerError::AppConfig(_)
            | ServerError::Internal(_)
            | ServerError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error code string
    pub fn error_code(&self) -> &'static str {
        match self {
            ServerError::BadRequest(_) => "BAD_REQUEST",
            ServerError::Match(err) => match err {
                MatchError::EmptyQuery => "EMPTY_QUERY",
                MatchError::InvalidQuery(_) => "INVALID_QUERY",
                MatchError::UnknownProduct(_) => "UNKNOWN_PRODUCT",
                MatchError::UnknownUser(_) => "UNKNOWN_USER",
                _ => "MATCH_ERROR",
            },
            ServerError::Pipeline(_) => "PIPELINE_ERROR",
            ServerError::AppConfig(_) => "APP_CONFIG_ERROR",
            ServerError::Internal(_) => "INTERNAL_ERROR",
            ServerError::Config(_) => "CONFIG_ERROR",
            ServerError::NotFound => "NOT_FOUND",
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let body = Json(json!({
            "error": {
                "code": self.error_code(),
                "message": self.to_string(),
            }
        }));

        (status, body).into_response()
    }
}

impl From<std::net::AddrParseError> for ServerError {
    fn from(err: std::net::AddrParseError) -> Self {
        ServerError::Config(format!("Invalid address: {err}"))
    }
}

impl From<std::io::Error> for ServerError {
    fn from(err: std::io::Error) -> Self {
        ServerError::Internal(format!("IO error: {err}"))
    }
}

impl From<anyhow::Error> for ServerError {
    fn from(err: anyhow::Error) -> Self {
        ServerError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ingest::{ProductId, UserId};

    #[test]
    fn test_not_found_lookups_map_to_404() {
        let err = ServerError::from(MatchError::UnknownUser(UserId(7)));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.error_code(), "UNKNOWN_USER");

        let err = ServerError::from(MatchError::UnknownProduct(ProductId(1)));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_empty_query_is_a_client_error() {
        let err = ServerError::from(MatchError::EmptyQuery);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), "EMPTY_QUERY");
    }

    #[test]
    fn test_startup_errors_are_server_errors() {
        let err = ServerError::from(MatchError::ArtifactMismatch {
            documents: 1,
            products: 2,
        });
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
