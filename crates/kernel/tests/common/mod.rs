#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Common test utilities for integration tests.
//!
//! Each [`TestApp`] owns a fresh in-memory [`AppState`] and the real
//! kernel router, so tests never share data and can run in parallel.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use axum::response::Response;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use muse_kernel::{AppState, Config, routes};

/// Token accepted on the protected prefix in tests.
pub const ADMIN_TOKEN: &str = "test-admin-token";

/// Test application wrapper using the real kernel routes and state.
pub struct TestApp {
    router: Router,
    pub state: AppState,
}

impl TestApp {
    /// Create an app with no fixture data.
    pub fn new() -> Self {
        Self::with_config(Config {
            seed_data: false,
            ..test_config()
        })
    }

    /// Create an app that seeds fixture data on the first API call.
    pub fn seeded() -> Self {
        Self::with_config(test_config())
    }

    /// Create an app from an explicit configuration.
    pub fn with_config(config: Config) -> Self {
        let state = AppState::in_memory(&config);
        let router = routes::router(state.clone());
        Self { router, state }
    }

    /// Send a request to the test application.
    pub async fn request(&self, request: Request<Body>) -> Response {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request")
    }

    /// Send a request and decode the JSON response body.
    pub async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = self.request(request).await;
        let status = response.status();
        (status, json_body(response).await)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::PUT, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::DELETE, uri, None).await
    }

    /// Register a content type, asserting success.
    pub async fn create_content_type(&self, body: Value) -> Value {
        let (status, body) = self.post("/api/content-types", body).await;
        assert_eq!(status, StatusCode::OK, "create content type failed: {body}");
        body["data"].clone()
    }

    /// Create an entry, asserting success.
    pub async fn create_entry(&self, body: Value) -> Value {
        let (status, body) = self.post("/api/entries", body).await;
        assert_eq!(status, StatusCode::OK, "create entry failed: {body}");
        body["data"].clone()
    }
}

/// Configuration used by tests: one known bearer token, small page cap.
pub fn test_config() -> Config {
    Config {
        api_tokens: muse_kernel::config::parse_api_tokens(&format!("{ADMIN_TOKEN}:admin")),
        max_page_limit: 50,
        ..Config::default()
    }
}

/// Read a response body as JSON.
pub async fn json_body(response: Response) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes();
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(&bytes).expect("Response body is not JSON")
}

/// Read a response body as text.
pub async fn text_body(response: Response) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("Response body is not UTF-8")
}
