//! Test fixtures and constants.

use image::{ImageFormat, Rgb, RgbImage};
use std::io::Cursor;
use std::path::{Path, PathBuf};

use trmnl_pipeline::services::Catalog;
use trmnl_pipeline::RasterBuffer;

/// Catalog model names used across tests
pub mod models {
    /// 800x480, 1-bit PNG
    pub const OG_PNG: &str = "og_png";

    /// 800x480, 1-bit BMP
    pub const OG_BMP: &str = "og_bmp";

    /// 800x480, 2-bit PNG
    pub const OG_PLUS: &str = "og_plus";

    /// 1400x840, 8-bit, rotated 90 with offsets 75/25
    pub const KINDLE_2024: &str = "amazon_kindle_2024";

    /// 1872x1404, 4-bit
    pub const V2: &str = "v2";
}

pub const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

pub fn embedded_catalog() -> Catalog {
    Catalog::embedded().expect("embedded catalog loads")
}

/// Solid white image
pub fn white(width: u32, height: u32) -> RgbImage {
    RgbImage::from_pixel(width, height, WHITE)
}

/// White image with a black `size`x`size` square at the top-left corner
pub fn black_square(width: u32, height: u32, size: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        if x < size && y < size {
            BLACK
        } else {
            WHITE
        }
    })
}

/// Horizontal grey ramp from black on the left to white on the right
pub fn gradient(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, _| {
        let v = (x * 255 / (width - 1).max(1)) as u8;
        Rgb([v, v, v])
    })
}

pub fn raster(image: RgbImage) -> RasterBuffer {
    RasterBuffer::from_image(image).expect("non-empty fixture")
}

/// Encode a fixture as PNG bytes
pub fn png_bytes(image: &RgbImage) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    image
        .write_to(&mut out, ImageFormat::Png)
        .expect("fixture encodes");
    out.into_inner()
}

/// Write a fixture as PNG into `dir` and return its path
pub fn write_png(dir: &Path, name: &str, image: &RgbImage) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, png_bytes(image)).expect("fixture written");
    path
}
