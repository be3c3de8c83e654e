//! Vehicles and blog posts listed by the upstream API, turned into sitemap entries.

use std::collections::HashSet;
use std::fmt;

use core_fleet::sitemap::absolute_url;
use core_fleet::{ChangeFreq, Endpoints, UrlEntry, generate_slug, is_object_id};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    /// Upstream unreachable, timed out, or answered with something that isn't JSON.
    #[error("upstream request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("upstream answered {0}")]
    UnexpectedStatus(reqwest::StatusCode),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogKind {
    Products,
    Posts,
}

impl CatalogKind {
    /// Upstream REST resource, relative to the API prefix.
    pub fn resource(&self) -> &'static str {
        match self {
            Self::Products => "/cars",
            Self::Posts => "/blogs",
        }
    }

    /// Public path under which the site renders one item.
    pub fn site_prefix(&self) -> &'static str {
        match self {
            Self::Products => "/fleet",
            Self::Posts => "/blog",
        }
    }

    fn changefreq(&self) -> ChangeFreq {
        match self {
            Self::Products => ChangeFreq::Weekly,
            Self::Posts => ChangeFreq::Monthly,
        }
    }

    fn priority(&self) -> f32 {
        match self {
            Self::Products => 0.7,
            Self::Posts => 0.6,
        }
    }

    /// Field holding the human-readable label that a slug can be derived from.
    fn label_fields(&self) -> &'static [&'static str] {
        match self {
            Self::Products => &["name", "title"],
            Self::Posts => &["title", "name"],
        }
    }
}

impl fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Products => write!(f, "products"),
            Self::Posts => write!(f, "posts"),
        }
    }
}

/// Fetches the raw item list of one catalogue from the upstream API.
pub async fn fetch_items(
    http: &reqwest::Client,
    endpoints: &Endpoints,
    kind: CatalogKind,
) -> Result<Vec<Value>, CatalogError> {
    let url = endpoints.api_url(kind.resource());
    tracing::debug!("Fetching {} catalogue from {}", kind, url);

    let response = http.get(&url).send().await?;
    if !response.status().is_success() {
        return Err(CatalogError::UnexpectedStatus(response.status()));
    }

    let body: Value = response.json().await?;
    Ok(item_list(body))
}

/// Extracts the item array from an upstream payload.
///
/// Accepts a bare array, or an object wrapping it under `data`, `items` or
/// `results` (possibly nested). Failing those, the array-valued field with the
/// alphabetically smallest key is taken, whatever order the payload used.
pub fn item_list(body: Value) -> Vec<Value> {
    match body {
        Value::Array(items) => items,
        Value::Object(mut map) => {
            for key in ["data", "items", "results"] {
                if let Some(inner) = map.remove(key) {
                    return item_list(inner);
                }
            }
            map.into_iter()
                .filter_map(|(k, v)| match v {
                    Value::Array(items) => Some((k, items)),
                    _ => None,
                })
                .min_by(|(a, _), (b, _)| a.cmp(b))
                .map(|(_, items)| items)
                .unwrap_or_default()
        }
        _ => Vec::new(),
    }
}

fn str_field<'a>(item: &'a Value, name: &str) -> Option<&'a str> {
    item.get(name).and_then(Value::as_str)
}

/// Path segment of one item: its `slug`, else a slug of its label, else an ObjectId-shaped id.
pub fn path_segment(item: &Value, kind: CatalogKind) -> Option<String> {
    let slug = str_field(item, "slug").map(|s| generate_slug(s)).unwrap_or_default();
    if !slug.is_empty() {
        return Some(slug);
    }

    let from_label = kind
        .label_fields()
        .iter()
        .copied()
        .filter_map(|name| str_field(item, name))
        .map(|label| generate_slug(label))
        .find(|s| !s.is_empty());
    if from_label.is_some() {
        return from_label;
    }

    ["_id", "id"]
        .iter()
        .copied()
        .filter_map(|name| str_field(item, name))
        .find(|id| is_object_id(*id))
        .map(str::to_lowercase)
}

/// Sitemap entries for the items, skipping ones without a usable segment and duplicates.
pub fn url_entries(site_url: &str, kind: CatalogKind, items: &[Value]) -> Vec<UrlEntry> {
    let mut seen = HashSet::new();
    items
        .iter()
        .filter_map(|item| path_segment(item, kind))
        .filter(|segment| seen.insert(segment.clone()))
        .map(|segment| {
            let path = format!("{}/{}", kind.site_prefix(), segment);
            UrlEntry::new(absolute_url(site_url, &path), kind.changefreq(), kind.priority())
        })
        .collect()
}
