//! Forwards browser API calls made against the site's proxy path to the upstream backend.

use axum::{
    Json,
    body::{Body, Bytes, to_bytes},
    extract::{Request, State},
    http::{HeaderMap, HeaderName, StatusCode, header},
    response::{IntoResponse, Response},
};
use core_fleet::CLIENT_API_PROXY_PATH;
use http_body_util::LengthLimitError;
use serde_json::json;
use thiserror::Error;

use crate::state::SharedState;

/// Largest request body forwarded upstream.
pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Connection-scoped headers that must not cross the proxy (RFC 9110 §7.6.1),
/// plus the ones the proxy recomputes itself.
static SKIPPED_HEADERS: [HeaderName; 10] = [
    header::CONNECTION,
    HeaderName::from_static("keep-alive"),
    header::PROXY_AUTHENTICATE,
    header::PROXY_AUTHORIZATION,
    header::TE,
    header::TRAILER,
    header::TRANSFER_ENCODING,
    header::UPGRADE,
    header::HOST,
    header::CONTENT_LENGTH,
];

#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("request body exceeds {MAX_BODY_BYTES} bytes")]
    BodyTooLarge,

    #[error("request body could not be read: {0}")]
    RequestBody(axum::Error),

    #[error("upstream unavailable: {0}")]
    Upstream(#[from] reqwest::Error),

    #[error("could not relay upstream response: {0}")]
    Relay(#[from] axum::http::Error),
}

impl ProxyError {
    fn code(&self) -> &'static str {
        match self {
            Self::BodyTooLarge => "request_body_too_large",
            Self::RequestBody(_) => "request_body_rejected",
            Self::Upstream(_) => "upstream_unavailable",
            Self::Relay(_) => "relay_failure",
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::BodyTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::RequestBody(_) => StatusCode::BAD_REQUEST,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
            Self::Relay(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = Json(json!({
            "error": self.code(),
            "details": self.to_string(),
        }));
        (status, body).into_response()
    }
}

/// Only hitting the body limit is the client's size problem; anything else is a broken read.
fn request_body_error(err: axum::Error) -> ProxyError {
    let mut source: Option<&(dyn std::error::Error + 'static)> = Some(&err);
    while let Some(e) = source {
        if e.is::<LengthLimitError>() {
            return ProxyError::BodyTooLarge;
        }
        source = e.source();
    }
    ProxyError::RequestBody(err)
}

fn is_forwardable(name: &HeaderName) -> bool {
    !SKIPPED_HEADERS.contains(name)
}

fn forwardable_headers(headers: &HeaderMap) -> HeaderMap {
    let mut forwarded = HeaderMap::new();
    for (name, value) in headers.iter().filter(|(name, _)| is_forwardable(name)) {
        forwarded.append(name.clone(), value.clone());
    }
    forwarded
}

/// Upstream URL for a proxied path, keeping the query string untouched.
pub fn upstream_url(api_base_url: &str, path: &str, query: Option<&str>) -> String {
    let mut url = format!("{}/{}", api_base_url.trim_end_matches('/'), path.trim_start_matches('/'));
    if let Some(query) = query.filter(|q| !q.is_empty()) {
        url.push('?');
        url.push_str(query);
    }
    url
}

/// The proxied path exactly as the client sent it, percent-encoding intact.
fn raw_proxied_path(path: &str) -> &str {
    path.strip_prefix(CLIENT_API_PROXY_PATH).unwrap_or(path)
}

// ANY /proxy/{*path}
pub async fn forward(State(state): State<SharedState>, request: Request) -> Result<Response, ProxyError> {
    let (parts, body) = request.into_parts();
    let body = to_bytes(body, MAX_BODY_BYTES).await.map_err(request_body_error)?;

    let target = upstream_url(
        &state.config.server.api_base_url,
        raw_proxied_path(parts.uri.path()),
        parts.uri.query(),
    );
    state.logger.debug(&[&"proxy:", &parts.method, &target]);

    let exchange = async {
        let upstream = state
            .http
            .request(parts.method.clone(), &target)
            .headers(forwardable_headers(&parts.headers))
            .body(body)
            .send()
            .await?;
        let status = upstream.status();
        let headers = forwardable_headers(upstream.headers());
        let bytes = upstream.bytes().await?;
        Ok::<(StatusCode, HeaderMap, Bytes), reqwest::Error>((status, headers, bytes))
    };
    let (status, headers, bytes) = exchange
        .await
        .inspect_err(|e| state.logger.error(&[&"proxy:", &target, &"failed:", e]))?;

    let mut response = Response::builder().status(status).body(Body::from(bytes))?;
    *response.headers_mut() = headers;
    Ok(response)
}
