//! HTTP client for the external segmentation service.
//!
//! One multipart POST per mask: the original upload as `image`, the scene
//! hint as `scene`, and `mode=auto`. The service answers with JSON holding a
//! base64 PNG under `maskPngBase64`.

use async_trait::async_trait;
use paint_recolor::Mask;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use std::time::Duration;

use crate::error::MaskError;
use crate::models::{MaskOptions, SceneType, SegmentationConfig};
use crate::services::imaging;
use crate::services::MaskProvider;

/// Segmentation mode sent with every request. Only automatic detection exists.
const SEGMENTATION_MODE: &str = "auto";

#[derive(Debug, Deserialize)]
struct SegmentationResponse {
    #[serde(rename = "maskPngBase64")]
    mask_png_base64: Option<String>,
}

/// [`MaskProvider`] backed by the segmentation HTTP endpoint
pub struct SegmentationClient {
    client: reqwest::Client,
    endpoint: String,
    mask_options: MaskOptions,
}

impl SegmentationClient {
    pub fn new(config: &SegmentationConfig, mask_options: MaskOptions) -> Result<Self, MaskError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| MaskError::Transport(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            mask_options,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send the image and return the base64 mask PNG from the response.
    pub async fn fetch_mask_base64(
        &self,
        image: &[u8],
        scene: SceneType,
    ) -> Result<String, MaskError> {
        let form = Form::new()
            .part("image", Part::bytes(image.to_vec()).file_name("upload"))
            .text("scene", scene.as_str())
            .text("mode", SEGMENTATION_MODE);

        tracing::debug!(
            endpoint = %self.endpoint,
            %scene,
            image_bytes = image.len(),
            "Requesting mask"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| MaskError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = %status, "Segmentation service returned an error");
            return Err(MaskError::Service(status.to_string()));
        }

        let body: SegmentationResponse = response
            .json()
            .await
            .map_err(|e| MaskError::InvalidResponse(format!("body is not valid JSON: {e}")))?;

        body.mask_png_base64
            .ok_or_else(|| MaskError::InvalidResponse("missing maskPngBase64".to_string()))
    }
}

#[async_trait]
impl MaskProvider for SegmentationClient {
    async fn request_mask(
        &self,
        image: &[u8],
        scene: SceneType,
        width: u32,
        height: u32,
    ) -> Result<Mask, MaskError> {
        let encoded = self.fetch_mask_base64(image, scene).await?;
        let options = self.mask_options;

        // Resize and blur are CPU-bound; keep them off the async workers
        let mask = tokio::task::spawn_blocking(move || {
            imaging::decode_mask(&encoded, width, height, &options)
        })
        .await
        .map_err(|e| MaskError::Decode(format!("mask task failed: {e}")))??;

        tracing::info!(
            %scene,
            width,
            height,
            coverage = mask.coverage(),
            "Mask received"
        );

        Ok(mask)
    }
}
