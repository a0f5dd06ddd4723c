//! Paintability mask
//!
//! A [`Mask`] holds one weight per pixel: 0 leaves the source untouched,
//! 255 paints it fully, values in between blend. It is extracted from an
//! RGBA mask image whose paintability lives either in the alpha channel or
//! in the grey level, see [`MaskChannel`].

use crate::buffer::PixelBuffer;
use crate::error::BufferError;

/// Which channel of a mask image carries the paint weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MaskChannel {
    /// Alpha channel: transparent = keep, opaque = paint.
    #[default]
    Alpha,
    /// Rec. 601 luma of the RGB channels: black = keep, white = paint.
    /// For services that return opaque greyscale masks.
    Luminance,
}

/// Per-pixel paint weights, row-major, one byte per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    alpha: Vec<u8>,
}

impl Mask {
    /// Wrap raw weights. Fails if `alpha.len() != width * height`.
    pub fn new(width: u32, height: u32, alpha: Vec<u8>) -> Result<Self, BufferError> {
        let expected = width as usize * height as usize;
        if alpha.len() != expected {
            return Err(BufferError::LengthMismatch {
                expected,
                actual: alpha.len(),
            });
        }
        Ok(Self {
            width,
            height,
            alpha,
        })
    }

    /// Extract weights from a decoded mask image.
    pub fn from_pixels(pixels: &PixelBuffer, channel: MaskChannel) -> Self {
        let alpha = pixels
            .pixels()
            .map(|p| match channel {
                MaskChannel::Alpha => p[3],
                MaskChannel::Luminance => luma(p[0], p[1], p[2]),
            })
            .collect();
        Self {
            width: pixels.width(),
            height: pixels.height(),
            alpha,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Weight at (x, y).
    pub fn get(&self, x: u32, y: u32) -> u8 {
        assert!(
            x < self.width && y < self.height,
            "mask ({x}, {y}) out of bounds for {}x{} mask",
            self.width,
            self.height
        );
        self.alpha[y as usize * self.width as usize + x as usize]
    }

    #[inline]
    pub fn as_raw(&self) -> &[u8] {
        &self.alpha
    }

    /// Fraction of pixels with a non-zero weight.
    pub fn coverage(&self) -> f64 {
        if self.alpha.is_empty() {
            return 0.0;
        }
        let painted = self.alpha.iter().filter(|&&a| a > 0).count();
        painted as f64 / self.alpha.len() as f64
    }
}

#[inline]
fn luma(r: u8, g: u8, b: u8) -> u8 {
    (0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64)
        .round()
        .clamp(0.0, 255.0) as u8
}
