use std::sync::Arc;

use core_fleet::{Logger, SiteConfig};

/// Immutable per-process state shared by every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: SiteConfig,
    /// Pooled client used for all upstream calls.
    pub http: reqwest::Client,
    pub logger: Logger,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(config: SiteConfig, http: reqwest::Client) -> Self {
        let logger = Logger::for_mode(config.mode);
        Self { config, http, logger }
    }

    pub fn with_logger(self, logger: Logger) -> Self {
        Self { logger, ..self }
    }
}
