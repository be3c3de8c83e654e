use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use core_fleet::sitemap::{self, today};
use core_fleet::{CORE_PAGES, SitePage};

use crate::catalog::{self, CatalogKind};
use crate::state::{AppState, SharedState};

pub const XML_CONTENT_TYPE: &str = "application/xml";

fn xml_response(body: String) -> Response {
    ([(header::CONTENT_TYPE, XML_CONTENT_TYPE)], body).into_response()
}

// GET /sitemap.xml
pub async fn get_sitemap_index(State(state): State<SharedState>) -> Response {
    xml_response(sitemap::sitemap_index(&state.config.site_url, today()))
}

// GET /sitemap_core_pages.xml
pub async fn get_core_pages_sitemap(State(state): State<SharedState>) -> Response {
    xml_response(sitemap::core_pages_sitemap(&state.config.site_url, CORE_PAGES, today()))
}

// GET /sitemap_products.xml
pub async fn get_products_sitemap(State(state): State<SharedState>) -> Response {
    catalog_sitemap(&state, CatalogKind::Products).await
}

// GET /sitemap_posts.xml
pub async fn get_posts_sitemap(State(state): State<SharedState>) -> Response {
    catalog_sitemap(&state, CatalogKind::Posts).await
}

/// GET /{page}.xml - single-URL sitemap of one core page (e.g. /about.xml)
pub fn page_sitemap_response(state: &AppState, page: &SitePage) -> Response {
    xml_response(sitemap::page_sitemap(&state.config.site_url, page, today()))
}

/// Lists the upstream catalogue. When the upstream can't be read the sitemap is
/// still served, just empty, so crawlers never see an error here.
async fn catalog_sitemap(state: &AppState, kind: CatalogKind) -> Response {
    let entries = match catalog::fetch_items(&state.http, &state.config.server, kind).await {
        Ok(items) => {
            let entries = catalog::url_entries(&state.config.site_url, kind, &items);
            state
                .logger
                .debug(&[&kind, &"sitemap:", &entries.len(), &"of", &items.len(), &"items listed"]);
            entries
        }
        Err(e) => {
            state.logger.error(&[&kind, &"sitemap: upstream catalogue unavailable:", &e]);
            Vec::new()
        }
    };
    xml_response(sitemap::urlset(&entries, today()))
}
