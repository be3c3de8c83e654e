use std::sync::Arc;
use std::time::Duration;

use core_fleet::{SiteConfig, get_bind_address, setup_logging};

use web_fleet::{AppState, routes};

#[tokio::main]
async fn main() {
    // Load environment variables from .env file, if it exists
    dotenvy::dotenv().ok();

    let config = SiteConfig::from_env();
    setup_logging(config.mode);

    tracing::info!(
        mode = ?config.mode,
        site_url = %config.site_url,
        upstream_api = %config.server.api_base_url,
        images = %config.server.image_base_url,
        "Resolved site configuration"
    );

    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .expect("Failed to build HTTP client");

    let state = Arc::new(AppState::new(config, http));
    let app = routes::router().with_state(state);

    let addr = get_bind_address().expect("Invalid HOST or PORT");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .unwrap_or_else(|e| panic!("Failed to bind to address {}: {}", addr, e));

    tracing::info!("Listening on {}", addr);
    axum::serve(listener, app).await.expect("Server error");
}
