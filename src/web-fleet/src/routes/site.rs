use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
};
use core_fleet::{CLIENT_API_PROXY_PATH, ExecutionContext};

use crate::state::SharedState;

pub async fn health_check() -> (StatusCode, &'static str) {
    (StatusCode::OK, "healthy")
}

/// GET /robots.txt - crawl everything public, point crawlers at the sitemap index.
pub async fn get_robots_txt(State(state): State<SharedState>) -> impl IntoResponse {
    let body = format!(
        "User-agent: *\nAllow: /\nDisallow: /dashboard\nDisallow: {}/\n\nSitemap: {}/sitemap.xml\n",
        CLIENT_API_PROXY_PATH, state.config.site_url
    );
    ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], body)
}

/// GET /client-config.json - the base URLs browser code must use.
pub async fn get_client_config(State(state): State<SharedState>) -> impl IntoResponse {
    Json(state.config.endpoints(ExecutionContext::Client).clone())
}
