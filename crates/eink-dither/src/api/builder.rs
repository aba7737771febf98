//! GrayQuantizer builder -- the primary entry point for the crate.
//!
//! [`GrayQuantizer`] picks the quantizer (error diffusion or flat) and wraps
//! the resulting level indices in a [`DitheredImage`].

use super::DitherError;
use crate::dither::{Dither, FloydSteinberg, GrayLevels, Threshold};
use crate::output::DitheredImage;

/// Quantizes a grey plane to N evenly spaced levels.
///
/// - Constructor validates the level count (no invalid states)
/// - Configuration methods consume and return `self`
/// - [`quantize()`](Self::quantize) takes `&self`, so one quantizer can be
///   shared across threads and reused for many images
///
/// # Example
///
/// ```
/// use eink_dither::GrayQuantizer;
///
/// let quantizer = GrayQuantizer::new(2).unwrap();
/// let result = quantizer.quantize(&[0, 255, 255, 0], 2, 2).unwrap();
///
/// assert_eq!(result.indices(), &[0, 1, 1, 0]);
/// assert_eq!(result.gray_values(), vec![0, 255, 255, 0]);
/// ```
#[derive(Debug, Clone)]
pub struct GrayQuantizer {
    levels: GrayLevels,
    dither: bool,
}

impl GrayQuantizer {
    /// Create a quantizer for `levels` levels with Floyd-Steinberg enabled.
    ///
    /// # Errors
    ///
    /// [`DitherError::InvalidLevels`] unless `2 <= levels <= 256`.
    pub fn new(levels: usize) -> Result<Self, DitherError> {
        Ok(Self {
            levels: GrayLevels::new(levels)?,
            dither: true,
        })
    }

    /// Enable or disable error diffusion.
    #[inline]
    pub fn dither(mut self, enabled: bool) -> Self {
        self.dither = enabled;
        self
    }

    /// The levels this quantizer targets.
    #[inline]
    pub fn levels(&self) -> &GrayLevels {
        &self.levels
    }

    /// Whether error diffusion is enabled.
    #[inline]
    pub fn is_dithering(&self) -> bool {
        self.dither
    }

    /// Quantize a row-major grey plane.
    ///
    /// # Errors
    ///
    /// [`DitherError::DimensionMismatch`] if `gray.len() != width * height`.
    pub fn quantize(
        &self,
        gray: &[u8],
        width: usize,
        height: usize,
    ) -> Result<DitheredImage, DitherError> {
        let expected = width * height;
        if gray.len() != expected {
            return Err(DitherError::DimensionMismatch {
                expected,
                actual: gray.len(),
            });
        }

        let indices = if self.dither {
            FloydSteinberg.dither(gray, width, height, &self.levels)
        } else {
            Threshold.dither(gray, width, height, &self.levels)
        };

        Ok(DitheredImage::new(
            indices,
            width,
            height,
            self.levels.clone(),
        ))
    }
}
