//! Geometry stages: best-fit resize onto a fixed canvas, offset, rotation.
//!
//! Each stage takes ownership of a [`RasterBuffer`] and returns the buffer the
//! next stage owns. Uncovered areas are always filled with white.

use image::imageops::{self, FilterType};
use image::RgbImage;
use std::fmt;

use super::raster::{RasterBuffer, WHITE};
use crate::error::PipelineError;

/// Clockwise rotation in quarter turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rotation {
    #[default]
    None,
    Rotate90,
    Rotate180,
    Rotate270,
}

impl Rotation {
    /// Validate a rotation in degrees.
    ///
    /// Any multiple of 90 is accepted and normalized into `0..360`, so -90
    /// is `Rotate270` and 450 is `Rotate90`. Other angles are invalid input.
    pub fn from_degrees(degrees: i32) -> Result<Self, PipelineError> {
        match degrees.rem_euclid(360) {
            0 => Ok(Rotation::None),
            90 => Ok(Rotation::Rotate90),
            180 => Ok(Rotation::Rotate180),
            270 => Ok(Rotation::Rotate270),
            _ => Err(PipelineError::invalid(format!(
                "rotation must be a multiple of 90 degrees, got {degrees}"
            ))),
        }
    }

    pub fn degrees(&self) -> u16 {
        match self {
            Rotation::None => 0,
            Rotation::Rotate90 => 90,
            Rotation::Rotate180 => 180,
            Rotation::Rotate270 => 270,
        }
    }

    /// True for quarter turns, which swap width and height.
    pub fn swaps_dimensions(&self) -> bool {
        matches!(self, Rotation::Rotate90 | Rotation::Rotate270)
    }
}

impl TryFrom<i32> for Rotation {
    type Error = PipelineError;

    fn try_from(degrees: i32) -> Result<Self, Self::Error> {
        Self::from_degrees(degrees)
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}

/// Scale `source` to fit inside `width` x `height` without cropping or
/// distortion, then center it on a white canvas of exactly that size.
///
/// A source that already has the target size is returned untouched. The
/// centering offset rounds half away from zero.
pub fn resize_and_center(source: RasterBuffer, width: u32, height: u32) -> RasterBuffer {
    let (src_width, src_height) = source.dimensions();
    if (src_width, src_height) == (width, height) {
        return source;
    }

    let scale = (width as f64 / src_width as f64).min(height as f64 / src_height as f64);
    let new_width = ((src_width as f64 * scale).round() as u32).clamp(1, width);
    let new_height = ((src_height as f64 * scale).round() as u32).clamp(1, height);

    tracing::debug!(
        "Scaling {}x{} -> {}x{} (fit into {}x{})",
        src_width,
        src_height,
        new_width,
        new_height,
        width,
        height
    );

    let source = source.into_image();
    let scaled = if (new_width, new_height) == (src_width, src_height) {
        source
    } else {
        imageops::resize(&source, new_width, new_height, FilterType::Lanczos3)
    };

    let offset_x = center_offset(width, new_width);
    let offset_y = center_offset(height, new_height);

    let mut canvas = RgbImage::from_pixel(width, height, WHITE);
    imageops::overlay(&mut canvas, &scaled, offset_x, offset_y);
    into_buffer(canvas)
}

/// round((target - inner) / 2), halves away from zero
fn center_offset(target: u32, inner: u32) -> i64 {
    ((target as f64 - inner as f64) / 2.0).round() as i64
}

/// Shift contents right/down by (dx, dy); negative values shift left/up.
///
/// Pixels pushed past the edge are dropped and the uncovered area is white.
pub fn translate(source: RasterBuffer, dx: i32, dy: i32) -> RasterBuffer {
    if dx == 0 && dy == 0 {
        return source;
    }
    tracing::debug!(dx, dy, "Applying offset");

    let (width, height) = source.dimensions();
    let mut canvas = RgbImage::from_pixel(width, height, WHITE);
    imageops::overlay(&mut canvas, source.as_image(), dx as i64, dy as i64);
    into_buffer(canvas)
}

/// Rotate clockwise by whole quarter turns; exact, no resampling.
pub fn rotate(source: RasterBuffer, rotation: Rotation) -> RasterBuffer {
    let image = match rotation {
        Rotation::None => return source,
        Rotation::Rotate90 => imageops::rotate90(source.as_image()),
        Rotation::Rotate180 => imageops::rotate180(source.as_image()),
        Rotation::Rotate270 => imageops::rotate270(source.as_image()),
    };
    tracing::debug!(%rotation, "Rotated");
    into_buffer(image)
}

// Stage outputs keep the non-zero size of their input.
fn into_buffer(image: RgbImage) -> RasterBuffer {
    RasterBuffer::from_stage_output(image)
}
