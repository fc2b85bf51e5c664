use axum::{body::Body, http::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::warn;

/// Logs method, uri, status, and latency whenever a handler returns an HTTP
/// status in the 4xx or 5xx range.
pub async fn log_error_responses(req: Request<Body>, next: Next) -> Response {
    let method = req.method().to_string();
    let uri = req.uri().to_string();
    let start = Instant::now();

    let response = next.run(req).await;
    let status = response.status();

    if status.is_client_error() || status.is_server_error() {
        warn!(
            status = status.as_u16(),
            method = %method,
            uri = %uri,
            latency_ms = start.elapsed().as_millis() as u64,
            "request failed"
        );
    }

    response
}
