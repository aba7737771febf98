use image::{Rgb, RgbImage, RgbaImage};
use std::path::Path;

use crate::error::{PipelineError, Stage};

pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

/// Owned RGB pixel grid that every geometry stage consumes and produces.
///
/// Never zero-sized: all constructors reject empty dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterBuffer {
    image: RgbImage,
}

impl RasterBuffer {
    /// A canvas of the given size filled with white.
    pub fn white(width: u32, height: u32) -> Result<Self, PipelineError> {
        check_dimensions(width, height)?;
        Ok(Self {
            image: RgbImage::from_pixel(width, height, WHITE),
        })
    }

    /// Wrap row-major `[R, G, B, ...]` bytes.
    pub fn from_rgb(width: u32, height: u32, data: Vec<u8>) -> Result<Self, PipelineError> {
        check_dimensions(width, height)?;
        let expected = width as usize * height as usize * 3;
        let actual = data.len();
        RgbImage::from_raw(width, height, data)
            .map(|image| Self { image })
            .ok_or_else(|| {
                PipelineError::invalid(format!(
                    "pixel data has {actual} bytes, expected {expected} for {width}x{height}"
                ))
            })
    }

    pub fn from_image(image: RgbImage) -> Result<Self, PipelineError> {
        check_dimensions(image.width(), image.height())?;
        Ok(Self { image })
    }

    /// Wrap the output of a stage whose input was already non-empty.
    pub(super) fn from_stage_output(image: RgbImage) -> Self {
        debug_assert!(image.width() > 0 && image.height() > 0);
        Self { image }
    }

    /// Decode an encoded image (PNG, JPEG, BMP) and flatten it to RGB.
    ///
    /// Sources with an alpha channel are composited over white.
    pub fn decode(bytes: &[u8]) -> Result<Self, PipelineError> {
        if bytes.is_empty() {
            return Err(PipelineError::invalid("source image is empty"));
        }
        let decoded = image::load_from_memory(bytes)
            .map_err(|e| PipelineError::transform(Stage::Decode, "source bytes", e))?;
        if decoded.color().has_alpha() {
            Self::from_image(flatten_on_white(&decoded.to_rgba8()))
        } else {
            Self::from_image(decoded.to_rgb8())
        }
    }

    /// Read and decode an image file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, PipelineError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| {
            PipelineError::invalid(format!(
                "Invalid or missing image file: {} ({e})",
                path.display()
            ))
        })?;
        Self::decode(&bytes).map_err(|e| match e {
            PipelineError::TransformFailure { stage, source, .. } => {
                PipelineError::TransformFailure {
                    stage,
                    context: path.display().to_string(),
                    source,
                }
            }
            other => other,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Color at (x, y) as `[R, G, B]`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        self.image.get_pixel(x, y).0
    }

    pub fn as_image(&self) -> &RgbImage {
        &self.image
    }

    pub fn into_image(self) -> RgbImage {
        self.image
    }

    /// Raw row-major RGB bytes.
    pub fn as_raw(&self) -> &[u8] {
        self.image.as_raw()
    }
}

/// Blend every pixel over an opaque white background.
fn flatten_on_white(source: &RgbaImage) -> RgbImage {
    let mut canvas = RgbImage::from_pixel(source.width(), source.height(), WHITE);
    for (dst, src) in canvas.pixels_mut().zip(source.pixels()) {
        let [r, g, b, a] = src.0;
        let alpha = a as u32;
        let blend = |c: u8| ((c as u32 * alpha + 255 * (255 - alpha) + 127) / 255) as u8;
        *dst = Rgb([blend(r), blend(g), blend(b)]);
    }
    canvas
}

fn check_dimensions(width: u32, height: u32) -> Result<(), PipelineError> {
    if width == 0 || height == 0 {
        return Err(PipelineError::invalid(format!(
            "zero-size raster buffer ({width}x{height})"
        )));
    }
    Ok(())
}
