//! Evenly spaced grey quantization levels.

use crate::api::DitherError;

/// Value of level `index` out of `count` evenly spaced levels on 0..=255.
///
/// Rounds to nearest, so 4 levels are 0, 85, 170, 255 and 16 levels are
/// multiples of 17.
#[inline]
pub fn level_value(index: usize, count: usize) -> u8 {
    let max_level = count - 1;
    ((index * 255 + max_level / 2) / max_level).min(255) as u8
}

/// A set of N evenly spaced grey levels with a nearest-level lookup table.
///
/// # Example
///
/// ```
/// use eink_dither::GrayLevels;
///
/// let levels = GrayLevels::new(4).unwrap();
/// assert_eq!(levels.values(), &[0, 85, 170, 255]);
/// assert_eq!(levels.nearest(100), 1);
/// assert_eq!(levels.nearest(200), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrayLevels {
    values: Vec<u8>,
    lut: Vec<u8>,
}

impl GrayLevels {
    /// Build `count` levels.
    ///
    /// # Errors
    ///
    /// [`DitherError::InvalidLevels`] unless `2 <= count <= 256`.
    pub fn new(count: usize) -> Result<Self, DitherError> {
        if !(2..=256).contains(&count) {
            return Err(DitherError::InvalidLevels { count });
        }
        let values: Vec<u8> = (0..count).map(|i| level_value(i, count)).collect();

        // Nearest level for every possible input; ties resolve to the darker level.
        let lut = (0..=255u8)
            .map(|v| {
                let mut best = 0usize;
                let mut best_dist = u8::MAX;
                for (i, &level) in values.iter().enumerate() {
                    let dist = v.abs_diff(level);
                    if dist < best_dist {
                        best = i;
                        best_dist = dist;
                    }
                }
                best as u8
            })
            .collect();

        Ok(Self { values, lut })
    }

    /// Number of levels.
    #[inline]
    pub fn count(&self) -> usize {
        self.values.len()
    }

    /// Grey value of every level, darkest first.
    #[inline]
    pub fn values(&self) -> &[u8] {
        &self.values
    }

    /// Grey value of level `index`.
    #[inline]
    pub fn value(&self, index: u8) -> u8 {
        self.values[index as usize]
    }

    /// Index of the level nearest to `value`.
    #[inline]
    pub fn nearest(&self, value: u8) -> u8 {
        self.lut[value as usize]
    }
}
