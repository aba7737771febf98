//! Assertion helpers for tests.

use image::RgbImage;
use pretty_assertions::assert_eq;

use trmnl_pipeline::EncodedImage;

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Assert the bytes are a PNG stream
pub fn assert_png(encoded: &EncodedImage) {
    assert!(
        encoded.bytes.starts_with(&PNG_SIGNATURE),
        "Expected PNG image, got {} bytes starting with {:?}",
        encoded.bytes.len(),
        &encoded.bytes[..8.min(encoded.bytes.len())]
    );
    assert_eq!(encoded.mime_type(), "image/png");
}

/// Assert the bytes are a BMP stream
pub fn assert_bmp(encoded: &EncodedImage) {
    assert!(
        encoded.bytes.starts_with(b"BM"),
        "Expected BMP image, got {} bytes starting with {:?}",
        encoded.bytes.len(),
        &encoded.bytes[..2.min(encoded.bytes.len())]
    );
    assert_eq!(encoded.mime_type(), "image/bmp");
}

/// PNG IHDR bit depth and color type
pub fn png_header(bytes: &[u8]) -> (png::BitDepth, png::ColorType) {
    let decoder = png::Decoder::new(bytes);
    let reader = decoder.read_info().expect("valid PNG");
    let info = reader.info();
    (info.bit_depth, info.color_type)
}

/// Decode any supported output back to RGB
pub fn decode_rgb(encoded: &EncodedImage) -> RgbImage {
    image::load_from_memory(&encoded.bytes)
        .expect("output decodes")
        .to_rgb8()
}

/// Assert every pixel of the decoded output has the same color
pub fn assert_uniform(image: &RgbImage, expected: [u8; 3]) {
    if let Some((x, y, p)) = image.enumerate_pixels().find(|(_, _, p)| p.0 != expected) {
        panic!("pixel ({x}, {y}) is {:?}, expected {:?}", p.0, expected);
    }
}

/// Distinct colors present in the decoded output
pub fn distinct_colors(image: &RgbImage) -> Vec<[u8; 3]> {
    let mut colors: Vec<[u8; 3]> = image.pixels().map(|p| p.0).collect();
    colors.sort_unstable();
    colors.dedup();
    colors
}
