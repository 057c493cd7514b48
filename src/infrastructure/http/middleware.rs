//! HTTP Middleware
//!
//! 按状态码分级记录请求日志

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;

/// 4xx 记 warn，5xx 记 error，成功请求记 debug
pub async fn status_logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;
    let status = response.status();
    let elapsed_ms = started.elapsed().as_millis() as u64;

    if status.is_server_error() {
        tracing::error!(method = %method, path = %path, status = status.as_u16(), elapsed_ms, "HTTP server error");
    } else if status.is_client_error() {
        tracing::warn!(method = %method, path = %path, status = status.as_u16(), elapsed_ms, "HTTP client error");
    } else {
        tracing::debug!(method = %method, path = %path, status = status.as_u16(), elapsed_ms, "HTTP request completed");
    }

    response
}
