use axum::extract::Request;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;
use std::time::Instant;

/// Request id header, accepted from the client or generated
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Request id stored in the request extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

/// Tag every request with an id and echo it on the response.
pub async fn request_id(mut request: Request, next: Next) -> Response {
    let id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    request.extensions_mut().insert(RequestId(id.clone()));
    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(&id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

/// One log line per request. Probe endpoints log at debug, server errors
/// at warn.
pub async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let request_id = request
        .extensions()
        .get::<RequestId>()
        .map(|id| id.0.clone())
        .unwrap_or_default();
    let start = Instant::now();

    let response = next.run(request).await;
    let status = response.status();
    let elapsed_micros = start.elapsed().as_micros();

    if status.is_server_error() {
        tracing::warn!(%method, %path, %status, elapsed_micros, %request_id, "request_failed");
    } else if matches!(path.as_str(), "/health" | "/ready" | "/metrics") {
        tracing::debug!(%method, %path, %status, elapsed_micros, %request_id, "probe");
    } else {
        tracing::info!(%method, %path, %status, elapsed_micros, %request_id, "request");
    }
    response
}
