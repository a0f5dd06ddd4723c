//! Segmentation client tests against a mock service.
//!
//! Run with: cargo test --test segmentation_client_test

mod common;

use common::{fixtures, MockSegmentationServer};
use pretty_assertions::assert_eq;
use wiremock::{
    matchers::{body_string_contains, header_regex, method, path},
    Mock, ResponseTemplate,
};

use wallpaint::error::MaskError;
use wallpaint::models::{MaskOptions, SceneType, SegmentationConfig};
use wallpaint::services::{MaskProvider, SegmentationClient};

fn client_for(endpoint: &str) -> SegmentationClient {
    let config = SegmentationConfig {
        endpoint: endpoint.to_string(),
        timeout_secs: 5,
    };
    let options = fixtures::config_for(endpoint).mask;
    SegmentationClient::new(&config, options).expect("Failed to create client")
}

#[tokio::test]
async fn test_sends_multipart_fields() {
    let server = MockSegmentationServer::start().await;
    let encoded = fixtures::uniform_mask_b64(2, 2, 255);

    Mock::given(method("POST"))
        .and(path("/segment"))
        .and(header_regex("content-type", "^multipart/form-data"))
        .and(body_string_contains(r#"name="image""#))
        .and(body_string_contains("fake-photo-bytes"))
        .and(body_string_contains(r#"name="scene""#))
        .and(body_string_contains("interior"))
        .and(body_string_contains(r#"name="mode""#))
        .and(body_string_contains("auto"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "maskPngBase64": encoded })),
        )
        .expect(1)
        .mount(&server.server)
        .await;

    let client = client_for(&server.endpoint());
    let result = client
        .fetch_mask_base64(b"fake-photo-bytes", SceneType::Interior)
        .await
        .unwrap();

    assert_eq!(result, encoded);
}

#[tokio::test]
async fn test_request_mask_decodes_and_resizes() {
    let server = MockSegmentationServer::start().await;
    server.mock_mask(&fixtures::half_mask_b64(4, 4)).await;

    let client = client_for(&server.endpoint());
    let mask = client
        .request_mask(b"photo", SceneType::Exterior, 16, 8)
        .await
        .unwrap();

    assert_eq!(mask.dimensions(), (16, 8));
    assert_eq!(mask.get(0, 0), 0);
    assert_eq!(mask.get(15, 7), 255);
}

#[tokio::test]
async fn test_missing_mask_field_is_invalid_response() {
    let server = MockSegmentationServer::start().await;
    server.mock_json(serde_json::json!({ "status": "ok" })).await;

    let client = client_for(&server.endpoint());
    let err = client
        .request_mask(b"photo", SceneType::Exterior, 2, 2)
        .await
        .unwrap_err();

    assert!(matches!(err, MaskError::InvalidResponse(_)), "got {err:?}");
    assert!(err.to_string().contains("maskPngBase64"));
}

#[tokio::test]
async fn test_null_mask_field_is_invalid_response() {
    let server = MockSegmentationServer::start().await;
    server
        .mock_json(serde_json::json!({ "maskPngBase64": null }))
        .await;

    let client = client_for(&server.endpoint());
    let err = client
        .request_mask(b"photo", SceneType::Exterior, 2, 2)
        .await
        .unwrap_err();

    assert!(matches!(err, MaskError::InvalidResponse(_)), "got {err:?}");
}

#[tokio::test]
async fn test_http_error_is_service_error() {
    let server = MockSegmentationServer::start().await;
    server.mock_error(500).await;

    let client = client_for(&server.endpoint());
    let err = client
        .request_mask(b"photo", SceneType::Exterior, 2, 2)
        .await
        .unwrap_err();

    match err {
        MaskError::Service(status) => assert!(status.starts_with("500"), "status: {status}"),
        other => panic!("expected Service error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_non_json_body_is_invalid_response() {
    let server = MockSegmentationServer::start().await;
    server.mock_html().await;

    let client = client_for(&server.endpoint());
    let err = client
        .request_mask(b"photo", SceneType::Exterior, 2, 2)
        .await
        .unwrap_err();

    assert!(matches!(err, MaskError::InvalidResponse(_)), "got {err:?}");
}

#[tokio::test]
async fn test_undecodable_mask_is_decode_error() {
    let server = MockSegmentationServer::start().await;
    server.mock_mask("this is not base64 at all!").await;

    let client = client_for(&server.endpoint());
    let err = client
        .request_mask(b"photo", SceneType::Exterior, 2, 2)
        .await
        .unwrap_err();

    assert!(matches!(err, MaskError::Decode(_)), "got {err:?}");
}

#[tokio::test]
async fn test_unreachable_service_is_transport_error() {
    let client = client_for("http://127.0.0.1:1/segment");
    let err = client
        .request_mask(b"photo", SceneType::Exterior, 2, 2)
        .await
        .unwrap_err();

    assert!(matches!(err, MaskError::Transport(_)), "got {err:?}");
}

#[test]
fn test_default_mask_options_feather() {
    assert_eq!(MaskOptions::default().feather_sigma, 2.0);
}
