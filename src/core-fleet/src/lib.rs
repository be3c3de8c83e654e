pub mod common;
pub mod config;
pub mod logger;
pub mod pages;
pub mod placeholder;
pub mod sitemap;
pub mod slug;

pub use common::env_check::env_value;
pub use common::hostname::{HostPortError, bind_address, get_bind_address};
pub use common::logging::setup_logging;
pub use config::{
    API_PREFIX, BuildMode, CLIENT_API_PROXY_PATH, Endpoints, EnvOverrides, ExecutionContext, SiteConfig,
    resolve_endpoints,
};
pub use logger::{LogSink, Logger, Severity, TracingSink};
pub use pages::{CORE_PAGES, SitePage, find_page};
pub use placeholder::{DEFAULT_PLACEHOLDER_TEXT, generate_placeholder_image};
pub use sitemap::{ChangeFreq, UrlEntry};
pub use slug::{generate_slug, is_object_id};
