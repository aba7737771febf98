//! Unified error type for the eink-dither public API.

use thiserror::Error;

use crate::palette::{PaletteError, ParseColorError};

/// Unified error type for the eink-dither public API.
///
/// Wraps all error types from the crate into a single enum for
/// convenient `?` propagation in application code.
///
/// # Example
///
/// ```
/// use eink_dither::{DitherError, Palette};
///
/// fn create_palette() -> Result<Palette, DitherError> {
///     let palette = Palette::from_hex(&["#000000", "#FFFFFF"])?;
///     Ok(palette)
/// }
/// ```
#[derive(Debug, Error)]
pub enum DitherError {
    /// Level count outside `2..=256`.
    #[error("invalid level count {count}: must be between 2 and 256")]
    InvalidLevels { count: usize },

    /// Pixel buffer does not match `width * height`.
    #[error("pixel buffer has {actual} values, expected {expected}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Color table has fewer entries than there are levels.
    #[error("color table has {entries} entries but {levels} levels need colors")]
    PaletteTooSmall { entries: usize, levels: usize },

    #[error("palette error: {0}")]
    Palette(#[from] PaletteError),

    #[error("color parse error: {0}")]
    ParseColor(#[from] ParseColorError),
}
