//! Errors for paint color input and buffer construction

use std::fmt;

/// A paint color string that is not a hex code.
///
/// Accepted input is three or six hex digits with an optional leading `#`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseColorError {
    /// Digit count after the optional `#`
    InvalidLength(usize),
    /// First character that is not a hex digit
    InvalidDigit(char),
}

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseColorError::InvalidLength(n) => {
                write!(f, "paint color needs 3 or 6 hex digits, got {}", n)
            }
            ParseColorError::InvalidDigit(c) => write!(f, "'{}' is not a hex digit", c),
        }
    }
}

impl std::error::Error for ParseColorError {}

/// Error type for building pixel buffers and masks from raw samples.
#[derive(Debug, Clone, PartialEq)]
pub enum BufferError {
    /// Sample count does not match the stated dimensions
    LengthMismatch {
        /// Samples required by width * height * channels
        expected: usize,
        /// Samples actually provided
        actual: usize,
    },
}

impl fmt::Display for BufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BufferError::LengthMismatch { expected, actual } => {
                write!(
                    f,
                    "buffer length mismatch: expected {} samples, got {}",
                    expected, actual
                )
            }
        }
    }
}

impl std::error::Error for BufferError {}
