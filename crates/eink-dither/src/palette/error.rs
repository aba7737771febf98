//! Error types for palette operations
//!
//! This module provides error types for color parsing and palette validation.

use std::num::ParseIntError;

use thiserror::Error;

/// Error type for parsing hex color strings.
///
/// Returned when parsing a hex color string fails, either due to
/// invalid length or invalid hexadecimal characters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseColorError {
    /// Hex string has invalid length (must be 3 or 6 characters after stripping '#')
    #[error("invalid hex color length (expected 3 or 6 characters)")]
    InvalidLength,
    /// Invalid hexadecimal character encountered
    #[error("invalid hex character: {0}")]
    InvalidHex(#[from] ParseIntError),
}

/// Error type for palette validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PaletteError {
    /// No colors provided in palette
    #[error("palette cannot be empty")]
    EmptyPalette,
    /// A grayscale ramp needs at least two levels and at most 256
    #[error("grayscale ramp needs 2..=256 levels, got {levels}")]
    InvalidRamp {
        /// Requested number of levels
        levels: usize,
    },
    /// Invalid hex color string
    #[error("invalid color at index {index}: {source}")]
    ParseColor {
        /// Position of the offending entry
        index: usize,
        /// Underlying parse failure
        #[source]
        source: ParseColorError,
    },
}
