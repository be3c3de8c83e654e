use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::BuildMode;

/// Sets the logging (tracing) level using RUST_LOG, falling back to the build mode's default filter.
pub fn setup_logging(mode: BuildMode) {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| mode.default_log_filter().into()))
        .with(tracing_subscriber::fmt::layer())
        .init()
}
