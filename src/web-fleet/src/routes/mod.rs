use axum::{
    Router,
    extract::State,
    middleware,
    routing::{any, get},
};
use core_fleet::CORE_PAGES;
use tower_http::trace::TraceLayer;

use crate::state::SharedState;

pub mod logging_middleware;
pub mod proxy;
pub mod site;
pub mod sitemaps;

//
// Router
//

pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/health", get(site::health_check))
        .route("/robots.txt", get(site::get_robots_txt))
        .route("/client-config.json", get(site::get_client_config))
        // SEO artifacts
        .route("/sitemap.xml", get(sitemaps::get_sitemap_index))
        .route("/sitemap_core_pages.xml", get(sitemaps::get_core_pages_sitemap))
        .route("/sitemap_products.xml", get(sitemaps::get_products_sitemap))
        .route("/sitemap_posts.xml", get(sitemaps::get_posts_sitemap))
        .merge(page_sitemap_routes())
        // Browser-side API calls, forwarded to the upstream backend
        .route("/proxy/{*path}", any(proxy::forward))
        // Custom route access logging
        .layer(middleware::from_fn(logging_middleware::log_route_access))
        // Tracing middleware
        .layer(TraceLayer::new_for_http())
}

/// One `/{page}.xml` route per core page except home. Unknown pages fall through to 404.
fn page_sitemap_routes() -> Router<SharedState> {
    CORE_PAGES
        .iter()
        .filter(|page| !page.is_home())
        .fold(Router::new(), |router, page| {
            router.route(
                &format!("/{}.xml", page.name),
                get(move |State(state): State<SharedState>| async move { sitemaps::page_sitemap_response(&state, page) }),
            )
        })
}
