//! Color error types

use thiserror::Error;

/// Errors raised by strict color parsing
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    /// Input was empty after trimming the optional `#`
    #[error("empty color string")]
    Empty,

    /// Input length was neither 3 nor 6 hex digits
    #[error("invalid hex length {len} in {input:?} (expected 3 or 6 digits)")]
    InvalidLength { input: String, len: usize },

    /// Input contained a non-hex character
    #[error("invalid hex digit {digit:?} in {input:?}")]
    InvalidDigit { input: String, digit: char },
}

/// Result type for color operations
pub type Result<T> = std::result::Result<T, ColorError>;
