//! paint-recolor: lightness-preserving recoloring of masked image regions
//!
//! This library holds the pure pixel math behind a paint preview: an RGB/HSL
//! converter, RGBA pixel buffers, an alpha mask plane, and the recoloring
//! engine that combines them. It performs no I/O and has no dependencies.
//!
//! # Quick Start
//!
//! ```
//! use paint_recolor::{apply_color, Mask, PixelBuffer, Rgb8};
//!
//! let source = PixelBuffer::filled(2, 1, [100, 100, 100, 255]);
//! let mask = Mask::new(2, 1, vec![255, 0]).unwrap();
//! let red: Rgb8 = "#FF0000".parse().unwrap();
//!
//! let painted = apply_color(&source, &mask, red);
//! assert_eq!(painted.pixel(0, 0), [200, 0, 0, 255]);
//! assert_eq!(painted.pixel(1, 0), [100, 100, 100, 255]);
//! ```
//!
//! # Why HSL
//!
//! Paint changes the pigment of a wall, not the light falling on it. The
//! engine keeps each source pixel's HSL lightness and replaces only hue and
//! saturation with the paint color's, so shadows, highlights and texture of
//! the photographed surface survive the recolor. The mask alpha then blends
//! the repainted pixel with the original, which keeps feathered mask edges
//! soft.
//!
//! ```text
//! source RGB ──> HSL ──> keep l ─┐
//!                                ├──> hsl_to_rgb(hT, sT, l) ──> candidate
//! paint RGB  ──> HSL ──> hT, sT ─┘
//!
//! out = source * (1 - a/255) + candidate * a/255
//! ```

pub mod buffer;
pub mod color;
pub mod error;
pub mod mask;
pub mod recolor;

pub use buffer::PixelBuffer;
pub use color::{hsl_to_rgb, rgb_to_hsl, Hsl, Rgb8};
pub use error::{BufferError, ParseColorError};
pub use mask::{Mask, MaskChannel};
pub use recolor::{apply_color, Recolorer};
