//! Lightness-preserving recoloring engine
//!
//! Each masked pixel takes the paint's hue and saturation while keeping its
//! own HSL lightness, then blends with the original by the mask weight.
//! Inputs are never modified; the result is always a fresh buffer computed
//! from the untouched source, so repainting with another color never
//! accumulates drift from an earlier result.

use crate::buffer::{PixelBuffer, CHANNELS};
use crate::color::{hsl_to_rgb, rgb_to_hsl, Hsl, Rgb8};
use crate::mask::Mask;

/// A paint color prepared for repeated per-pixel use.
///
/// Holds the target's HSL so the conversion happens once per paint job
/// rather than once per pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Recolorer {
    target: Rgb8,
    hsl: Hsl,
}

impl Recolorer {
    pub fn new(target: Rgb8) -> Self {
        Self {
            target,
            hsl: rgb_to_hsl(target),
        }
    }

    #[inline]
    pub fn target(&self) -> Rgb8 {
        self.target
    }

    /// Recolor a single pixel with mask weight `weight`.
    #[inline]
    pub fn recolor_pixel(&self, source: Rgb8, weight: u8) -> Rgb8 {
        if weight == 0 {
            return source;
        }

        let l = rgb_to_hsl(source).l;
        let candidate = hsl_to_rgb(Hsl::new(self.hsl.h, self.hsl.s, l));

        let t = weight as f64 / 255.0;
        Rgb8::new(
            lerp(source.r, candidate.r, t),
            lerp(source.g, candidate.g, t),
            lerp(source.b, candidate.b, t),
        )
    }

    /// Recolor every masked pixel of `source`.
    ///
    /// # Panics
    ///
    /// Panics if `mask` and `source` differ in dimensions. Pairing a mask
    /// with the wrong image is a caller bug, not a runtime condition.
    pub fn apply(&self, source: &PixelBuffer, mask: &Mask) -> PixelBuffer {
        assert_eq!(
            source.dimensions(),
            mask.dimensions(),
            "mask dimensions must match source dimensions"
        );

        let mut out = Vec::with_capacity(source.as_raw().len());
        for (px, &weight) in source.pixels().zip(mask.as_raw()) {
            if weight == 0 {
                out.extend_from_slice(px);
                continue;
            }
            let painted = self.recolor_pixel(Rgb8::new(px[0], px[1], px[2]), weight);
            out.extend_from_slice(&[painted.r, painted.g, painted.b, px[3]]);
        }
        debug_assert_eq!(out.len(), source.len() * CHANNELS);

        PixelBuffer::from_parts(source.width(), source.height(), out)
    }
}

/// Repaint `source` with `target` wherever `mask` is non-zero.
///
/// Convenience wrapper around [`Recolorer`].
pub fn apply_color(source: &PixelBuffer, mask: &Mask, target: Rgb8) -> PixelBuffer {
    Recolorer::new(target).apply(source, mask)
}

#[inline]
fn lerp(from: u8, to: u8, t: f64) -> u8 {
    (from as f64 * (1.0 - t) + to as f64 * t)
        .round()
        .clamp(0.0, 255.0) as u8
}
