//! Color types and RGB/HSL conversion
//!
//! Two representations with distinct types so channel order and value range
//! cannot be mixed up:
//!
//! - [`Rgb8`]: 8-bit red/green/blue, each `0..=255`. Used for pixels and for
//!   the paint color a user picks.
//! - [`Hsl`]: hue/saturation/lightness, each `0.0..=1.0` (hue wraps at 1.0).
//!   Used only inside the recoloring engine.
//!
//! # Example
//!
//! ```
//! use paint_recolor::{hsl_to_rgb, rgb_to_hsl, Rgb8};
//!
//! let teal = Rgb8::new(0, 128, 128);
//! let hsl = rgb_to_hsl(teal);
//! assert_eq!(hsl_to_rgb(hsl), teal);
//! ```

mod hsl;
mod rgb;

pub use hsl::{hsl_to_rgb, rgb_to_hsl, Hsl};
pub use rgb::Rgb8;
