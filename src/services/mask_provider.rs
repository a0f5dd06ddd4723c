use async_trait::async_trait;
use paint_recolor::Mask;

use crate::error::MaskError;
use crate::models::SceneType;

/// Source of paintability masks for an uploaded photo.
///
/// Implementations receive the original upload bytes (not the resized
/// canvas) and must return a mask of exactly `width` x `height`.
#[async_trait]
pub trait MaskProvider: Send + Sync {
    async fn request_mask(
        &self,
        image: &[u8],
        scene: SceneType,
        width: u32,
        height: u32,
    ) -> Result<Mask, MaskError>;
}
