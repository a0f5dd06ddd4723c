//! Mock segmentation service built on wiremock.

use serde_json::json;
use std::time::Duration;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, Request, ResponseTemplate,
};

/// Path the mock answers mask requests on
pub const SEGMENT_PATH: &str = "/segment";

/// Wrapper around wiremock MockServer with segmentation-specific responses
pub struct MockSegmentationServer {
    pub server: MockServer,
}

impl MockSegmentationServer {
    /// Start a new mock server
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        Self { server }
    }

    /// Endpoint URL to configure the client with
    pub fn endpoint(&self) -> String {
        format!("{}{}", self.server.uri(), SEGMENT_PATH)
    }

    /// Answer with a mask
    pub async fn mock_mask(&self, mask_png_base64: &str) {
        self.mock_json(json!({ "maskPngBase64": mask_png_base64 }))
            .await;
    }

    /// Answer with a mask after a delay, like a slow segmentation model
    pub async fn mock_mask_delayed(&self, mask_png_base64: &str, delay: Duration) {
        Mock::given(method("POST"))
            .and(path(SEGMENT_PATH))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "maskPngBase64": mask_png_base64 }))
                    .set_delay(delay),
            )
            .mount(&self.server)
            .await;
    }

    /// Answer 200 with arbitrary JSON
    pub async fn mock_json(&self, body: serde_json::Value) {
        Mock::given(method("POST"))
            .and(path(SEGMENT_PATH))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(body)
                    .insert_header("content-type", "application/json"),
            )
            .mount(&self.server)
            .await;
    }

    /// Answer with an error status
    pub async fn mock_error(&self, status: u16) {
        Mock::given(method("POST"))
            .and(path(SEGMENT_PATH))
            .respond_with(ResponseTemplate::new(status).set_body_string("model crashed"))
            .mount(&self.server)
            .await;
    }

    /// Answer 200 with a body that is not JSON
    pub async fn mock_html(&self) {
        Mock::given(method("POST"))
            .and(path(SEGMENT_PATH))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("<html>maintenance</html>")
                    .insert_header("content-type", "text/html"),
            )
            .mount(&self.server)
            .await;
    }

    /// Requests received so far
    pub async fn requests(&self) -> Vec<Request> {
        self.server.received_requests().await.unwrap_or_default()
    }

    /// Remove all mounted mocks
    pub async fn reset(&self) {
        self.server.reset().await;
    }
}
