//! 8-bit RGB color type

use std::fmt;
use std::str::FromStr;

use crate::error::ParseColorError;

/// An 8-bit RGB color.
///
/// This is the unit the outside world speaks: pixel samples read from an
/// image and the paint color chosen by a user are both `Rgb8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb8 {
    /// Red channel (0..=255)
    pub r: u8,
    /// Green channel (0..=255)
    pub g: u8,
    /// Blue channel (0..=255)
    pub b: u8,
}

impl Rgb8 {
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Render as an uppercase `#RRGGBB` string.
    ///
    /// # Example
    /// ```
    /// use paint_recolor::Rgb8;
    /// assert_eq!(Rgb8::new(255, 128, 0).to_hex(), "#FF8000");
    /// ```
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgb8 {
    type Err = ParseColorError;

    /// Parse a paint color: `#RRGGBB` or `#RGB`, the `#` optional.
    ///
    /// Digits are case-insensitive and surrounding whitespace is ignored.
    /// Three-digit codes repeat each digit (`#F80` is `#FF8800`).
    ///
    /// ```
    /// use paint_recolor::Rgb8;
    ///
    /// let red: Rgb8 = "#F00".parse().unwrap();
    /// assert_eq!(red, Rgb8::new(255, 0, 0));
    ///
    /// let sage: Rgb8 = "9caf88".parse().unwrap();
    /// assert_eq!(sage, Rgb8::new(0x9c, 0xaf, 0x88));
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let digits = s.strip_prefix('#').unwrap_or(s);

        let count = digits.chars().count();
        if count != 3 && count != 6 {
            return Err(ParseColorError::InvalidLength(count));
        }

        let nibbles = digits
            .chars()
            .map(|c| {
                c.to_digit(16)
                    .map(|d| d as u8)
                    .ok_or(ParseColorError::InvalidDigit(c))
            })
            .collect::<Result<Vec<u8>, _>>()?;

        Ok(match nibbles[..] {
            [r, g, b] => Self::new(r * 17, g * 17, b * 17),
            [r1, r0, g1, g0, b1, b0] => Self::new((r1 << 4) | r0, (g1 << 4) | g0, (b1 << 4) | b0),
            _ => return Err(ParseColorError::InvalidLength(count)),
        })
    }
}
