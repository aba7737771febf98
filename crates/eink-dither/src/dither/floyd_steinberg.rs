//! Floyd-Steinberg error diffusion dithering.
//!
//! The classic algorithm: pixels are visited in raster order and 100% of
//! each pixel's quantization error is pushed to the four unvisited
//! neighbors.

use super::{dither_with_kernel, Dither, GrayLevels, FLOYD_STEINBERG};

/// Floyd-Steinberg error diffusion dithering.
///
/// # Algorithm
///
/// ```text
///        X   7
///    3   5   1
/// ```
///
/// Weights: 7/16 right, 3/16 bottom-left, 5/16 bottom, 1/16 bottom-right.
/// Arithmetic is integer only, so identical input always yields identical
/// output on every platform.
///
/// # Example
///
/// ```
/// use eink_dither::{Dither, FloydSteinberg, GrayLevels};
///
/// let levels = GrayLevels::new(2).unwrap();
/// let gray = vec![128u8; 16];
/// let indices = FloydSteinberg.dither(&gray, 4, 4, &levels);
/// assert!(indices.contains(&0) && indices.contains(&1));
/// ```
pub struct FloydSteinberg;

impl Dither for FloydSteinberg {
    fn dither(&self, gray: &[u8], width: usize, height: usize, levels: &GrayLevels) -> Vec<u8> {
        dither_with_kernel(gray, width, height, levels, &FLOYD_STEINBERG)
    }
}
