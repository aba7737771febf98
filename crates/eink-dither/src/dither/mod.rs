//! Grayscale quantization with optional error diffusion.
//!
//! # Architecture
//!
//! Quantizers implement the [`Dither`] trait: they take a row-major plane of
//! 8-bit grey values and return one level index per pixel. Two are provided:
//!
//! - [`FloydSteinberg`]: error diffusion with the classic 7/3/5/1 kernel
//! - [`Threshold`]: nearest level per pixel, no error propagation
//!
//! # Example
//!
//! ```
//! use eink_dither::{Dither, GrayLevels, Threshold};
//!
//! let levels = GrayLevels::new(4).unwrap();
//! let indices = Threshold.dither(&[0, 90, 180, 250], 4, 1, &levels);
//! assert_eq!(indices, vec![0, 1, 2, 3]);
//! ```

mod floyd_steinberg;
mod kernel;
mod levels;

pub use floyd_steinberg::FloydSteinberg;
pub use kernel::*;
pub use levels::{level_value, GrayLevels};

/// Trait for quantizers that map grey values onto level indices.
pub trait Dither {
    /// Quantize a grey plane to level indices.
    ///
    /// # Arguments
    ///
    /// * `gray` - Input grey values (row-major order), `width * height` long
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    /// * `levels` - Target quantization levels
    ///
    /// # Returns
    ///
    /// One index per pixel, each in `0..levels.count()`.
    fn dither(&self, gray: &[u8], width: usize, height: usize, levels: &GrayLevels) -> Vec<u8>;
}

/// Flat nearest-level quantization without error propagation.
pub struct Threshold;

impl Dither for Threshold {
    fn dither(&self, gray: &[u8], _width: usize, _height: usize, levels: &GrayLevels) -> Vec<u8> {
        gray.iter().map(|&v| levels.nearest(v)).collect()
    }
}

/// Error buffer for integer error diffusion.
///
/// Manages a sliding window of error rows, storing only the rows that
/// the diffusion kernel can reach (determined by `max_dy`). This avoids
/// allocating a full-image error buffer.
///
/// # Usage Pattern
///
/// 1. Create buffer with `new(width, row_depth)`
/// 2. For each row:
///    a. Read accumulated error with `get_accumulated(x)`
///    b. After processing pixel, distribute error with `add_error(x, dy, error)`
///    c. After row complete, call `advance_row()`
#[derive(Debug)]
pub struct ErrorBuffer {
    /// Error rows: rows[0] is current row, rows[1] is next, etc.
    rows: Vec<Vec<i32>>,
    width: usize,
}

impl ErrorBuffer {
    /// Create a buffer tracking `row_depth` rows of `width` pixels.
    pub fn new(width: usize, row_depth: usize) -> Self {
        Self {
            rows: (0..row_depth).map(|_| vec![0; width]).collect(),
            width,
        }
    }

    /// Accumulated error for pixel `x` of the current row.
    #[inline]
    pub fn get_accumulated(&self, x: usize) -> i32 {
        self.rows[0][x]
    }

    /// Add error to a future pixel. Out-of-bounds targets are ignored.
    #[inline]
    pub fn add_error(&mut self, x: usize, row_offset: usize, error: i32) {
        if x < self.width && row_offset < self.rows.len() {
            self.rows[row_offset][x] += error;
        }
    }

    /// Advance to the next row.
    ///
    /// Rotates the row buffer: the first row is discarded, subsequent rows
    /// shift forward, and a new zeroed row is added at the end.
    pub fn advance_row(&mut self) {
        self.rows.rotate_left(1);
        if let Some(last) = self.rows.last_mut() {
            last.fill(0);
        }
    }
}

/// Shared error diffusion loop.
///
/// Scans left to right, top to bottom. Each pixel's value plus accumulated
/// error is clamped to 0..=255 before picking the nearest level; the error
/// pushed to neighbors is measured from that clamped value.
pub(crate) fn dither_with_kernel(
    gray: &[u8],
    width: usize,
    height: usize,
    levels: &GrayLevels,
    kernel: &Kernel,
) -> Vec<u8> {
    let mut output = vec![0u8; width * height];
    let mut error_buf = ErrorBuffer::new(width, kernel.max_dy + 1);

    for y in 0..height {
        for x in 0..width {
            let idx = y * width + x;
            let value = (gray[idx] as i32 + error_buf.get_accumulated(x)).clamp(0, 255);

            let level = levels.nearest(value as u8);
            output[idx] = level;

            let error = value - levels.value(level) as i32;
            if error == 0 {
                continue;
            }

            for &(dx, dy, weight) in kernel.entries {
                let nx = x as i32 + dx;
                let ny = y + dy as usize;
                if nx >= 0 && (nx as usize) < width && ny < height {
                    error_buf.add_error(nx as usize, dy as usize, error * weight / kernel.divisor);
                }
            }
        }
        error_buf.advance_row();
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_never_leaves_levels() {
        let levels = GrayLevels::new(3).unwrap();
        let gray: Vec<u8> = (0..=255u8).collect();
        let indices = Threshold.dither(&gray, 16, 16, &levels);
        assert!(indices.iter().all(|&i| i < 3));
    }

    #[test]
    fn test_error_buffer_rotation() {
        let mut buf = ErrorBuffer::new(3, 2);
        buf.add_error(1, 0, 5);
        buf.add_error(2, 1, 7);
        buf.add_error(3, 0, 9); // out of bounds, ignored
        assert_eq!(buf.get_accumulated(1), 5);

        buf.advance_row();
        assert_eq!(buf.get_accumulated(1), 0);
        assert_eq!(buf.get_accumulated(2), 7);

        buf.advance_row();
        assert_eq!(buf.get_accumulated(2), 0);
    }

    #[test]
    fn test_kernel_error_is_truncated_toward_zero() {
        // A single mid pixel: 100 -> level 0, error 100; right neighbor gets 100*7/16 = 43.
        let levels = GrayLevels::new(2).unwrap();
        let out = dither_with_kernel(&[100, 100], 2, 1, &levels, &FLOYD_STEINBERG);
        // 100 + 43 = 143 -> white
        assert_eq!(out, vec![0, 1]);
    }
}
