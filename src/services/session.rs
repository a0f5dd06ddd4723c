//! Paint preview session: one photo, at most one mask.
//!
//! ```text
//! Empty ──load_image──> ImageLoaded ──request_mask──> Masked
//!                           ^                            │
//!                           └────────load_image──────────┘
//! ```
//!
//! Loading a photo always discards the previous mask. Recoloring is only
//! possible in `Masked`, and always starts from the pristine decoded photo.
//! A failed operation leaves the session exactly as it was.

use paint_recolor::{Mask, PixelBuffer, Recolorer, Rgb8};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::error::{MaskError, SessionError};
use crate::models::{CanvasOptions, SceneType};
use crate::services::{imaging, MaskProvider};

/// Lifecycle state of a [`Session`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Empty,
    ImageLoaded,
    Masked,
}

/// A decoded upload together with its original bytes.
#[derive(Debug, Clone)]
pub struct LoadedImage {
    /// Bytes exactly as uploaded; these go to the segmentation service
    bytes: Arc<[u8]>,
    /// Decoded pixels fitted to the canvas; the recoloring source
    pixels: Arc<PixelBuffer>,
    digest: String,
}

impl LoadedImage {
    /// Decode an upload and fit it to the canvas.
    pub fn decode(bytes: Vec<u8>, canvas: &CanvasOptions) -> Result<Self, SessionError> {
        let pixels = imaging::decode_to_canvas(&bytes, canvas)?;
        let digest = imaging::digest(&bytes);
        Ok(Self {
            bytes: bytes.into(),
            pixels: Arc::new(pixels),
            digest,
        })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn pixels(&self) -> &PixelBuffer {
        &self.pixels
    }

    pub fn digest(&self) -> &str {
        &self.digest
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }
}

/// Everything needed to recolor, detached from the session so it can run
/// on a blocking thread.
#[derive(Debug, Clone)]
pub struct PaintJob {
    source: Arc<PixelBuffer>,
    mask: Arc<Mask>,
    recolorer: Recolorer,
}

impl PaintJob {
    pub fn color(&self) -> Rgb8 {
        self.recolorer.target()
    }

    pub fn run(&self) -> PixelBuffer {
        self.recolorer.apply(&self.source, &self.mask)
    }
}

/// The photo a mask is being requested for.
///
/// Holds shared handles only, so the session can be released while the
/// segmentation service works.
#[derive(Debug, Clone)]
pub struct MaskTarget {
    image: LoadedImage,
    generation: u64,
}

impl MaskTarget {
    pub fn image(&self) -> &LoadedImage {
        &self.image
    }

    /// Request the mask and check it covers the photo's canvas.
    pub async fn fetch(
        &self,
        provider: &dyn MaskProvider,
        scene: SceneType,
    ) -> Result<Mask, SessionError> {
        let (width, height) = self.image.dimensions();
        let mask = provider
            .request_mask(self.image.bytes(), scene, width, height)
            .await?;

        if mask.dimensions() != (width, height) {
            return Err(MaskError::InvalidResponse(format!(
                "mask is {}x{}, image is {width}x{height}",
                mask.width(),
                mask.height()
            ))
            .into());
        }
        Ok(mask)
    }
}

#[derive(Debug, Default)]
pub struct Session {
    image: Option<LoadedImage>,
    mask: Option<Arc<Mask>>,
    scene: Option<SceneType>,
    /// Bumped on every photo load, so late masks for an old photo are refused
    generation: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        match (&self.image, &self.mask) {
            (None, _) => SessionState::Empty,
            (Some(_), None) => SessionState::ImageLoaded,
            (Some(_), Some(_)) => SessionState::Masked,
        }
    }

    pub fn image(&self) -> Option<&LoadedImage> {
        self.image.as_ref()
    }

    pub fn source(&self) -> Option<&PixelBuffer> {
        self.image.as_ref().map(LoadedImage::pixels)
    }

    pub fn mask(&self) -> Option<&Mask> {
        self.mask.as_deref()
    }

    /// Scene type of the current mask.
    pub fn scene(&self) -> Option<SceneType> {
        self.scene
    }

    /// Decode and load a new photo. Moves to `ImageLoaded` and drops any mask.
    ///
    /// On a decode failure the session keeps its previous photo and mask.
    pub fn load_image(
        &mut self,
        bytes: Vec<u8>,
        canvas: &CanvasOptions,
    ) -> Result<&LoadedImage, SessionError> {
        let loaded = LoadedImage::decode(bytes, canvas)?;
        Ok(self.replace_image(loaded))
    }

    /// Install an already decoded photo. Moves to `ImageLoaded`.
    pub fn replace_image(&mut self, loaded: LoadedImage) -> &LoadedImage {
        let (width, height) = loaded.dimensions();
        tracing::info!(
            digest = %loaded.digest,
            width,
            height,
            discarded_mask = self.mask.is_some(),
            "Image loaded"
        );
        self.mask = None;
        self.scene = None;
        self.generation += 1;
        self.image.insert(loaded)
    }

    /// Ask `provider` for a mask of the current photo. Moves to `Masked`.
    ///
    /// Fails with `InvalidState` when no photo is loaded. Provider errors
    /// are returned unchanged and leave the session as it was.
    pub async fn request_mask(
        &mut self,
        provider: &dyn MaskProvider,
        scene: SceneType,
    ) -> Result<&Mask, SessionError> {
        let target = self.mask_target()?;
        let mask = target.fetch(provider, scene).await?;
        self.install_mask(&target, scene, mask)
    }

    /// Snapshot the current photo for a mask request made without holding
    /// the session.
    pub fn mask_target(&self) -> Result<MaskTarget, SessionError> {
        let image = self
            .image
            .clone()
            .ok_or(SessionError::InvalidState("no image loaded"))?;
        Ok(MaskTarget {
            image,
            generation: self.generation,
        })
    }

    /// Install a mask fetched for `target`. Moves to `Masked`.
    ///
    /// Fails with `InvalidState` if a different photo was loaded since the
    /// snapshot was taken; the mask is dropped and the session is unchanged.
    pub fn install_mask(
        &mut self,
        target: &MaskTarget,
        scene: SceneType,
        mask: Mask,
    ) -> Result<&Mask, SessionError> {
        if target.generation != self.generation {
            tracing::warn!(
                digest = %target.image.digest,
                "Discarding mask for a replaced image"
            );
            return Err(SessionError::InvalidState(
                "image replaced while mask was requested",
            ));
        }

        self.scene = Some(scene);
        Ok(&**self.mask.insert(Arc::new(mask)))
    }

    /// Prepare a recolor of the current photo with a hex paint color.
    pub fn paint_job(&self, color: &str) -> Result<PaintJob, SessionError> {
        let (image, mask) = match (&self.image, &self.mask) {
            (Some(image), Some(mask)) => (image, mask),
            (None, _) => return Err(SessionError::InvalidState("no image loaded")),
            (Some(_), None) => return Err(SessionError::InvalidState("no mask for current image")),
        };
        let target: Rgb8 = color.parse()?;

        Ok(PaintJob {
            source: image.pixels.clone(),
            mask: mask.clone(),
            recolorer: Recolorer::new(target),
        })
    }

    /// Recolor the current photo. Requires `Masked`.
    pub fn apply_color(&self, color: &str) -> Result<PixelBuffer, SessionError> {
        let job = self.paint_job(color)?;
        tracing::debug!(color = %job.color(), "Applying paint color");
        Ok(job.run())
    }
}
