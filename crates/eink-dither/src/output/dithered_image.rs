//! DitheredImage: the level indices produced by a quantizer.
//!
//! [`DitheredImage`] wraps one level index per pixel together with the
//! [`GrayLevels`] they refer to. From there it can produce the quantized grey
//! plane or be remapped onto an explicit color table.

use crate::api::DitherError;
use crate::dither::GrayLevels;
use crate::palette::Palette;

use super::IndexedImage;

/// The canonical output of the quantizer.
///
/// # Example
///
/// ```
/// use eink_dither::{DitheredImage, GrayLevels, Palette};
///
/// let levels = GrayLevels::new(2).unwrap();
/// let image = DitheredImage::new(vec![0, 1, 1, 0], 2, 2, levels);
///
/// assert_eq!(image.gray_values(), vec![0, 255, 255, 0]);
///
/// let indexed = image.remap(&Palette::black_white()).unwrap();
/// assert_eq!(indexed.to_rgb()[3..6], [255, 255, 255]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DitheredImage {
    /// Level indices, one per pixel, row-major order.
    indices: Vec<u8>,
    width: usize,
    height: usize,
    levels: GrayLevels,
}

impl DitheredImage {
    /// Create a new `DitheredImage` from level indices.
    ///
    /// # Panics (debug only)
    ///
    /// Debug-asserts that `indices.len() == width * height`.
    pub fn new(indices: Vec<u8>, width: usize, height: usize, levels: GrayLevels) -> Self {
        debug_assert_eq!(
            indices.len(),
            width * height,
            "indices length ({}) must match width * height ({}x{}={})",
            indices.len(),
            width,
            height,
            width * height,
        );
        Self {
            indices,
            width,
            height,
            levels,
        }
    }

    /// Level index of each pixel, row-major.
    #[inline]
    pub fn indices(&self) -> &[u8] {
        &self.indices
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// The levels the indices refer to.
    #[inline]
    pub fn levels(&self) -> &GrayLevels {
        &self.levels
    }

    /// Quantized grey value of each pixel (0..=255).
    pub fn gray_values(&self) -> Vec<u8> {
        self.indices.iter().map(|&i| self.levels.value(i)).collect()
    }

    /// Map each level onto an entry of `table`.
    ///
    /// With exactly one entry per level, level `i` takes entry `i`. A longer
    /// table is sampled evenly so the darkest level takes the first entry and
    /// the lightest takes the last. The resulting image carries a palette of
    /// exactly `levels.count()` entries.
    ///
    /// # Errors
    ///
    /// [`DitherError::PaletteTooSmall`] if `table` has fewer entries than
    /// there are levels.
    pub fn remap(&self, table: &Palette) -> Result<IndexedImage, DitherError> {
        let count = self.levels.count();
        if table.len() < count {
            return Err(DitherError::PaletteTooSmall {
                entries: table.len(),
                levels: count,
            });
        }

        let max_level = count - 1;
        let last_entry = table.len() - 1;
        let selected: Vec<_> = (0..count)
            .map(|i| table.color((i * last_entry + max_level / 2) / max_level))
            .collect();
        let palette = Palette::new(&selected)?;

        Ok(IndexedImage::new(
            self.indices.clone(),
            self.width,
            self.height,
            palette,
        ))
    }
}
