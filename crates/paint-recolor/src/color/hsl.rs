//! HSL (Hue-Saturation-Lightness) color space conversions
//!
//! All arithmetic is f64 with no fused or platform-specific operations, so
//! identical inputs produce bit-identical outputs everywhere.

use super::rgb::Rgb8;

/// HSL color representation
/// - h (hue): 0.0..1.0 (one full turn, 0.0 = red)
/// - s (saturation): 0.0..=1.0
/// - l (lightness): 0.0..=1.0
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Hsl {
    #[inline]
    pub fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }
}

impl From<Rgb8> for Hsl {
    fn from(rgb: Rgb8) -> Self {
        rgb_to_hsl(rgb)
    }
}

impl From<Hsl> for Rgb8 {
    fn from(hsl: Hsl) -> Self {
        hsl_to_rgb(hsl)
    }
}

/// Convert RGB to HSL
///
/// Input: 8-bit channels. Output: all components in 0.0..=1.0, hue in 0.0..1.0.
/// Achromatic colors get hue 0 and saturation 0.
#[inline]
pub fn rgb_to_hsl(rgb: Rgb8) -> Hsl {
    let r = rgb.r as f64 / 255.0;
    let g = rgb.g as f64 / 255.0;
    let b = rgb.b as f64 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    // Channels come from u8, so equality is exact here
    if max == min {
        return Hsl { h: 0.0, s: 0.0, l };
    }

    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };

    let h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    Hsl { h: h / 6.0, s, l }
}

/// Convert HSL to RGB
///
/// Input: components in 0.0..=1.0. Output: channels rounded to nearest.
/// Zero saturation yields a grey of `round(l * 255)`.
#[inline]
pub fn hsl_to_rgb(hsl: Hsl) -> Rgb8 {
    let Hsl { h, s, l } = hsl;

    if s == 0.0 {
        let v = to_channel(l);
        return Rgb8::new(v, v, v);
    }

    let q = if l < 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let p = 2.0 * l - q;

    Rgb8::new(
        to_channel(hue_to_channel(p, q, h + 1.0 / 3.0)),
        to_channel(hue_to_channel(p, q, h)),
        to_channel(hue_to_channel(p, q, h - 1.0 / 3.0)),
    )
}

/// Piecewise hue ramp with period-1 wraparound of `t`
#[inline]
fn hue_to_channel(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }

    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

#[inline]
fn to_channel(v: f64) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}
