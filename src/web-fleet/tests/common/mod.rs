//! Shared helpers for the web-fleet integration tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use core_fleet::{BuildMode, EnvOverrides, LogSink, Logger, Severity, SiteConfig};
use http_body_util::BodyExt;
use quick_xml::{Reader, events::Event};
use tower::ServiceExt;

use web_fleet::{AppState, routes::router};

pub const SITE_URL: &str = "https://www.example.com";

/// Production-mode state pointing the server-side API base at `api_url` (if any).
pub fn test_state(api_url: Option<&str>) -> AppState {
    let overrides = EnvOverrides::new(api_url.map(str::to_string), None);
    let config = SiteConfig::resolve(BuildMode::Production, &overrides, Some(SITE_URL));
    // Upstreams in these tests are local; never route them through an env-configured proxy.
    let http = reqwest::Client::builder().no_proxy().build().unwrap();
    AppState::new(config, http)
}

pub fn test_router(state: AppState) -> Router {
    router().with_state(Arc::new(state))
}

pub struct TestResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub headers: axum::http::HeaderMap,
    pub body: String,
}

pub async fn send(app: Router, request: Request<Body>) -> TestResponse {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    TestResponse {
        status,
        content_type,
        headers,
        body: String::from_utf8(bytes.to_vec()).unwrap(),
    }
}

pub async fn get(app: Router, uri: &str) -> TestResponse {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

/// Serves `app` on an ephemeral local port and returns its origin.
pub async fn spawn_upstream(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Origin of a local port nothing listens on.
pub async fn unreachable_upstream() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

/// Text content of every element with the given local name, in document order.
pub fn element_texts(xml: &str, name: &str) -> Vec<String> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut texts = Vec::new();
    let mut inside = false;
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.name().as_ref() == name.as_bytes() => inside = true,
            Ok(Event::End(e)) if e.name().as_ref() == name.as_bytes() => inside = false,
            Ok(Event::Text(t)) if inside => texts.push(t.unescape().unwrap().into_owned()),
            Ok(Event::Eof) => break,
            Err(e) => panic!("malformed XML: {}", e),
            _ => {}
        }
    }
    texts
}

/// Number of elements with the given name.
pub fn element_count(xml: &str, name: &str) -> usize {
    let mut reader = Reader::from_str(xml);
    let mut count = 0;
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) if e.name().as_ref() == name.as_bytes() => count += 1,
            Ok(Event::Eof) => break,
            Err(e) => panic!("malformed XML: {}", e),
            _ => {}
        }
    }
    count
}

/// Name and `xmlns` of the document's root element.
pub fn root_element(xml: &str) -> (String, Option<String>) {
    let mut reader = Reader::from_str(xml);
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = String::from_utf8(e.name().as_ref().to_vec()).unwrap();
                let xmlns = e
                    .try_get_attribute("xmlns")
                    .unwrap()
                    .map(|a| String::from_utf8(a.value.into_owned()).unwrap());
                return (name, xmlns);
            }
            Ok(Event::Eof) => panic!("document has no root element"),
            Err(e) => panic!("malformed XML: {}", e),
            _ => {}
        }
    }
}

#[derive(Default)]
pub struct RecordingSink {
    pub lines: Mutex<Vec<(Severity, String)>>,
}

impl LogSink for RecordingSink {
    fn write(&self, severity: Severity, message: &str) {
        self.lines.lock().unwrap().push((severity, message.to_string()));
    }
}

/// Logger with production gating that records what it lets through.
pub fn recording_logger() -> (Logger, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink::default());
    let logger = Logger::new(Severity::minimum_for(BuildMode::Production), sink.clone());
    (logger, sink)
}
