//! Upstream endpoint resolution.
//!
//! Everything here is computed once at start-up into a [`SiteConfig`] and handed
//! to whoever needs it. Nothing downstream inspects the environment or guesses
//! whether it runs on the server or in the browser.

use serde::{Deserialize, Serialize};

use crate::common::env_check::{env_value, non_blank};

/// Upstream API used by server-side code in development.
pub const DEV_API_BASE_URL: &str = "http://localhost:5000";
/// Upstream API used by server-side code in production.
pub const PROD_API_BASE_URL: &str = "https://api.fleetsite.com";
pub const DEV_IMAGE_BASE_URL: &str = "http://localhost:5000";
pub const PROD_IMAGE_BASE_URL: &str = "https://api.fleetsite.com";

/// Browser code always talks to the upstream API through this relative path on the site itself.
pub const CLIENT_API_PROXY_PATH: &str = "/proxy";

/// Path prefix of the upstream REST API.
pub const API_PREFIX: &str = "/api/v1";

pub const DEFAULT_SITE_URL: &str = "https://www.fleetsite.com";

pub const BUILD_MODE_ENV: &str = "APP_ENV";
pub const API_URL_ENV: &str = "API_URL";
pub const IMAGE_URL_ENV: &str = "IMAGE_URL";
pub const SITE_URL_ENV: &str = "SITE_URL";

/// Development vs. production. Controls default endpoints and logging verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    Development,
    #[default]
    Production,
}

impl BuildMode {
    /// Only `development` (or `dev`) selects development; anything else, including nothing, is production.
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_lowercase()).as_deref() {
            Some("development") | Some("dev") => Self::Development,
            _ => Self::Production,
        }
    }

    /// Reads the build mode from the env var APP_ENV.
    pub fn from_env() -> Self {
        Self::parse(env_value(BUILD_MODE_ENV).as_deref())
    }

    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    /// Tracing filter used when RUST_LOG is not set.
    pub fn default_log_filter(&self) -> &'static str {
        match self {
            Self::Development => "core_fleet=debug,web_fleet=debug,tower_http=debug",
            Self::Production => "error",
        }
    }

    fn default_api_base_url(&self) -> &'static str {
        match self {
            Self::Development => DEV_API_BASE_URL,
            Self::Production => PROD_API_BASE_URL,
        }
    }

    fn default_image_base_url(&self) -> &'static str {
        match self {
            Self::Development => DEV_IMAGE_BASE_URL,
            Self::Production => PROD_IMAGE_BASE_URL,
        }
    }
}

/// Where the consumer of the resolved endpoints runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionContext {
    Server,
    Client,
}

/// Optional overrides for the upstream targets. Blank values count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvOverrides {
    pub api_url: Option<String>,
    pub image_url: Option<String>,
}

impl EnvOverrides {
    pub fn new(api_url: Option<String>, image_url: Option<String>) -> Self {
        Self {
            api_url: non_blank(api_url),
            image_url: non_blank(image_url),
        }
    }

    /// Reads the env vars API_URL and IMAGE_URL.
    pub fn from_env() -> Self {
        Self::new(env_value(API_URL_ENV), env_value(IMAGE_URL_ENV))
    }
}

/// Resolved base URLs for one execution context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoints {
    pub api_base_url: String,
    pub image_base_url: String,
}

impl Endpoints {
    /// URL of an upstream REST resource, e.g. `api_url("/cars")`.
    pub fn api_url(&self, resource: &str) -> String {
        format!("{}{}{}", self.api_base_url.trim_end_matches('/'), API_PREFIX, resource)
    }
}

/// Decides which upstream API and image base URLs to use.
///
/// Server-side code goes straight to the upstream: the override if there is one,
/// else the build mode's default. Client-side code always goes through the
/// site's own proxy path. Images resolve the same way in both contexts.
pub fn resolve_endpoints(context: ExecutionContext, mode: BuildMode, overrides: &EnvOverrides) -> Endpoints {
    let api_base_url = match context {
        ExecutionContext::Server => overrides
            .api_url
            .clone()
            .unwrap_or_else(|| mode.default_api_base_url().to_string()),
        ExecutionContext::Client => CLIENT_API_PROXY_PATH.to_string(),
    };

    let image_base_url = overrides
        .image_url
        .clone()
        .unwrap_or_else(|| mode.default_image_base_url().to_string());

    Endpoints {
        api_base_url,
        image_base_url,
    }
}

/// Site-wide configuration, resolved once per process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    pub mode: BuildMode,
    /// Public origin of the site, without a trailing slash.
    pub site_url: String,
    pub server: Endpoints,
    pub client: Endpoints,
}

impl SiteConfig {
    pub fn resolve(mode: BuildMode, overrides: &EnvOverrides, site_url: Option<&str>) -> Self {
        let site_url = site_url
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_SITE_URL)
            .trim_end_matches('/')
            .to_string();

        Self {
            mode,
            site_url,
            server: resolve_endpoints(ExecutionContext::Server, mode, overrides),
            client: resolve_endpoints(ExecutionContext::Client, mode, overrides),
        }
    }

    /// Reads APP_ENV, API_URL, IMAGE_URL and SITE_URL.
    pub fn from_env() -> Self {
        Self::resolve(
            BuildMode::from_env(),
            &EnvOverrides::from_env(),
            env_value(SITE_URL_ENV).as_deref(),
        )
    }

    pub fn endpoints(&self, context: ExecutionContext) -> &Endpoints {
        match context {
            ExecutionContext::Server => &self.server,
            ExecutionContext::Client => &self.client,
        }
    }
}
