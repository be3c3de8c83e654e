use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;

/// Middleware that logs each route access with its result.
/// Proxied calls are tagged so upstream traffic can be told apart from the site's own routes.
pub async fn log_route_access(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let proxied = path.starts_with("/proxy/");
    let start = Instant::now();

    let response = next.run(request).await;

    let duration_ms = start.elapsed().as_millis() as u64;
    let status = response.status().as_u16();

    match status {
        400..=499 => tracing::warn!(%method, %path, status, proxied, duration_ms),
        500..=599 => tracing::error!(%method, %path, status, proxied, duration_ms),
        _ => tracing::info!(%method, %path, status, proxied, duration_ms),
    }

    response
}
