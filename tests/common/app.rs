//! Test application factory for integration tests.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower::ServiceExt;

use wallpaint::models::AppConfig;
use wallpaint::server::{build_router, AppState};
use wallpaint::services::{SegmentationClient, Session};

use super::fixtures;

/// Test application with router and direct access to the session
pub struct TestApp {
    router: axum::Router,
    pub session: Arc<Mutex<Session>>,
}

impl TestApp {
    /// Create a test application talking to the given segmentation endpoint
    pub fn new(endpoint: &str) -> Self {
        Self::with_config(fixtures::config_for(endpoint))
    }

    /// Create a test application from an explicit config
    pub fn with_config(config: AppConfig) -> Self {
        let client = SegmentationClient::new(&config.segmentation, config.mask)
            .expect("Failed to create segmentation client");
        let state = AppState::new(config, Arc::new(client));

        // Keep a reference for test assertions
        let session = state.session.clone();

        // Build router using shared server module (same as production)
        let router = build_router(state);

        Self { router, session }
    }

    /// Make a GET request to the given path
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request(Request::get(path).body(Body::empty()).unwrap())
            .await
    }

    /// Make a POST request with a raw body
    pub async fn post_bytes(&self, path: &str, body: Vec<u8>) -> TestResponse {
        self.request(
            Request::post(path)
                .header("Content-Type", "application/octet-stream")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
    }

    /// Make a POST request with JSON body
    pub async fn post_json(&self, path: &str, body: &str) -> TestResponse {
        self.request(
            Request::post(path)
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    /// Send a request to the router
    async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes()
            .to_vec();

        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// Upload a photo and assert it was accepted
    pub async fn upload(&self, photo: Vec<u8>) -> serde_json::Value {
        let response = self.post_bytes("/api/image", photo).await;
        assert_eq!(response.status, StatusCode::OK, "{}", response.text());
        response.json()
    }

    /// Request a mask for the given scene
    pub async fn mask(&self, scene: &str) -> TestResponse {
        self.post_json("/api/mask", &format!(r#"{{"scene":"{scene}"}}"#))
            .await
    }

    /// Current session state name as reported by the API
    pub async fn state(&self) -> String {
        let json: serde_json::Value = self.get("/api/session").await.json();
        json["state"].as_str().unwrap_or_default().to_string()
    }
}

/// Test response with convenience methods
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Parse body as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).expect("Failed to parse JSON response")
    }

    /// Get body as string
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }

    /// Check if response is a PNG image
    pub fn is_png(&self) -> bool {
        self.body.len() >= 8 && &self.body[0..8] == b"\x89PNG\r\n\x1a\n"
    }
}
