use super::correlation::CorrelationId;
use axum::body::Body;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;
use std::time::Instant;
use tracing::{debug, error, trace, warn};

pub async fn logging_middleware(req: Request<Body>, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let correlation_id = req
        .extensions()
        .get::<CorrelationId>()
        .map(|id| id.0.clone())
        .unwrap_or_default();
    let start = Instant::now();

    let response = next.run(req).await;

    let status = response.status().as_u16();
    let duration_ms = start.elapsed().as_millis() as u64;

    if path == "/health" {
        trace!(
            target: "http",
            %correlation_id, %method, %path, status, duration_ms,
            "health check"
        );
    } else if response.status().is_server_error() {
        error!(
            target: "http",
            %correlation_id, %method, %path, status, duration_ms,
            "request failed"
        );
    } else if response.status().is_client_error() {
        warn!(
            target: "http",
            %correlation_id, %method, %path, status, duration_ms,
            "request rejected"
        );
    } else {
        debug!(
            target: "http",
            %correlation_id, %method, %path, status, duration_ms,
            "request"
        );
    }

    response
}
