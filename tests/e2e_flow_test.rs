//! End-to-end flows: source file or bytes in, device image out.

mod common;

use image::{ImageFormat, Rgba, RgbaImage};
use pretty_assertions::assert_eq;
use std::io::Cursor;
use tempfile::TempDir;

use common::fixtures::{self, models};
use common::{assert_png, assert_uniform, decode_rgb};
use trmnl_pipeline::models::{OutputFormat, TransformOverrides};
use trmnl_pipeline::services::TransformPipeline;
use trmnl_pipeline::PipelineError;

#[test]
fn test_small_white_source_fills_default_canvas() {
    let pipeline = TransformPipeline::resolve(&TransformOverrides::default(), None).unwrap();
    let encoded = pipeline
        .process_bytes(&fixtures::png_bytes(&fixtures::white(100, 100)))
        .unwrap();

    assert_png(&encoded);
    let decoded = decode_rgb(&encoded);
    assert_eq!(decoded.dimensions(), (800, 480));
    assert_uniform(&decoded, [255, 255, 255]);
}

#[test]
fn test_offset_moves_content() {
    let overrides = TransformOverrides {
        offset_x: Some(30),
        offset_y: Some(30),
        ..Default::default()
    };
    let pipeline = TransformPipeline::resolve(&overrides, None).unwrap();
    let encoded = pipeline
        .process_bytes(&fixtures::png_bytes(&fixtures::black_square(800, 480, 20)))
        .unwrap();

    let decoded = decode_rgb(&encoded);
    assert_eq!(decoded.get_pixel(0, 0).0, [255, 255, 255]);
    assert_eq!(decoded.get_pixel(29, 29).0, [255, 255, 255]);
    assert_eq!(decoded.get_pixel(30, 30).0, [0, 0, 0]);
    assert_eq!(decoded.get_pixel(49, 49).0, [0, 0, 0]);
    assert_eq!(decoded.get_pixel(50, 50).0, [255, 255, 255]);
}

#[test]
fn test_negative_offset_clips() {
    let overrides = TransformOverrides {
        offset_x: Some(-10),
        offset_y: Some(-10),
        ..Default::default()
    };
    let pipeline = TransformPipeline::resolve(&overrides, None).unwrap();
    let encoded = pipeline
        .process_bytes(&fixtures::png_bytes(&fixtures::black_square(800, 480, 20)))
        .unwrap();

    let decoded = decode_rgb(&encoded);
    assert_eq!(decoded.get_pixel(0, 0).0, [0, 0, 0]);
    assert_eq!(decoded.get_pixel(9, 9).0, [0, 0, 0]);
    assert_eq!(decoded.get_pixel(10, 10).0, [255, 255, 255]);
}

#[test]
fn test_rotation_moves_corner() {
    // A top-left mark ends up top-right after a clockwise quarter turn
    let overrides = TransformOverrides {
        rotation: Some(90),
        ..Default::default()
    };
    let pipeline = TransformPipeline::resolve(&overrides, None).unwrap();
    let encoded = pipeline
        .process_bytes(&fixtures::png_bytes(&fixtures::black_square(800, 480, 20)))
        .unwrap();

    let decoded = decode_rgb(&encoded);
    assert_eq!(decoded.dimensions(), (480, 800));
    assert_eq!(decoded.get_pixel(479, 0).0, [0, 0, 0]);
    assert_eq!(decoded.get_pixel(0, 0).0, [255, 255, 255]);
}

#[test]
fn test_offset_applies_before_rotation() {
    let overrides = TransformOverrides {
        offset_x: Some(30),
        offset_y: Some(30),
        rotation: Some(90),
        ..Default::default()
    };
    let pipeline = TransformPipeline::resolve(&overrides, None).unwrap();
    let encoded = pipeline
        .process_bytes(&fixtures::png_bytes(&fixtures::black_square(800, 480, 20)))
        .unwrap();

    // Square shifted to (30..50, 30..50), then turned clockwise on a 480-high canvas
    let decoded = decode_rgb(&encoded);
    assert_eq!(decoded.dimensions(), (480, 800));
    assert_eq!(decoded.get_pixel(449, 30).0, [0, 0, 0]);
    assert_eq!(decoded.get_pixel(430, 49).0, [0, 0, 0]);
    assert_eq!(decoded.get_pixel(450, 30).0, [255, 255, 255]);
    assert_eq!(decoded.get_pixel(449, 29).0, [255, 255, 255]);
    assert_eq!(decoded.get_pixel(479, 0).0, [255, 255, 255]);
}

#[test]
fn test_transparent_source_renders_white() {
    let source = RgbaImage::from_pixel(100, 100, Rgba([0, 0, 0, 0]));
    let mut bytes = Cursor::new(Vec::new());
    source.write_to(&mut bytes, ImageFormat::Png).unwrap();

    let pipeline = TransformPipeline::resolve(&TransformOverrides::default(), None).unwrap();
    let encoded = pipeline.process_bytes(&bytes.into_inner()).unwrap();

    let decoded = decode_rgb(&encoded);
    assert_eq!(decoded.get_pixel(400, 240).0, [255, 255, 255]);
    assert_uniform(&decoded, [255, 255, 255]);
}

#[test]
fn test_file_round_trip_default_output_name() {
    let dir = TempDir::new().unwrap();
    let input = fixtures::write_png(dir.path(), "screen.png", &fixtures::white(200, 120));

    let pipeline = TransformPipeline::for_model(
        &fixtures::embedded_catalog(),
        models::OG_BMP,
        &TransformOverrides::default(),
    )
    .unwrap();
    let (path, encoded) = pipeline.process_file(&input, None).unwrap();

    assert_eq!(path, dir.path().join("screen_processed.bmp"));
    assert_eq!(encoded.format, OutputFormat::Bmp);
    assert_eq!(std::fs::read(&path).unwrap(), encoded.bytes);
}

#[test]
fn test_file_round_trip_explicit_output() {
    let dir = TempDir::new().unwrap();
    let input = fixtures::write_png(dir.path(), "in.png", &fixtures::gradient(64, 64));
    let output = dir.path().join("out.png");

    let pipeline = TransformPipeline::for_model(
        &fixtures::embedded_catalog(),
        models::OG_PLUS,
        &TransformOverrides::default(),
    )
    .unwrap();
    let (path, encoded) = pipeline.process_file(&input, Some(&output)).unwrap();

    assert_eq!(path, output);
    let written = image::open(&output).unwrap().to_rgb8();
    assert_eq!(written, decode_rgb(&encoded));
}

#[test]
fn test_missing_input_file() {
    let dir = TempDir::new().unwrap();
    let pipeline = TransformPipeline::resolve(&TransformOverrides::default(), None).unwrap();

    let err = pipeline
        .process_file(&dir.path().join("missing.png"), None)
        .unwrap_err();
    assert!(matches!(err, PipelineError::InvalidInput(_)), "{err}");
    assert!(!dir.path().join("missing_processed.png").exists());
}
