//! Access logging middleware.
//!
//! Logs every request with method, path, response status and latency.
//! Query strings are left out since they carry patient search terms.

use std::time::Instant;

use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;

pub async fn log_request(req: Request<axum::body::Body>, next: Next) -> Response {
    let method = req.method().to_string();
    let path = req.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(req).await;

    let status = response.status().as_u16();
    let latency_ms = started.elapsed().as_millis() as u64;
    if response.status().is_server_error() {
        tracing::warn!(method, path, status, latency_ms, "Request failed");
    } else {
        tracing::info!(method, path, status, latency_ms, "Request served");
    }
    response
}
