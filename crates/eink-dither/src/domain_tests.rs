//! Domain-critical regression tests for eink-dither.
//!
//! These tests pin exact output patterns. Each one documents the regression
//! it guards against.

use pretty_assertions::assert_eq;

use crate::api::GrayQuantizer;
use crate::dither::{Dither, FloydSteinberg, GrayLevels, Threshold};
use crate::palette::Palette;

// ========================================================================
// Golden patterns: exact Floyd-Steinberg output
// ========================================================================

/// If this breaks, it means: the scan order, kernel weights, or error
/// rounding changed. 50% grey on a 4x4 two-level grid is a checkerboard.
#[test]
fn test_golden_midtone_checkerboard() {
    let levels = GrayLevels::new(2).unwrap();
    let result = FloydSteinberg.dither(&[128; 16], 4, 4, &levels);
    #[rustfmt::skip]
    let expected = vec![
        1, 0, 1, 0,
        0, 1, 0, 1,
        1, 0, 1, 0,
        0, 1, 0, 1,
    ];
    assert_eq!(result, expected);
}

/// If this breaks, it means: the error from a dark quarter-tone is no
/// longer accumulated exactly as `error * weight / 16` truncated.
#[test]
fn test_golden_quarter_tone() {
    let levels = GrayLevels::new(2).unwrap();
    let result = FloydSteinberg.dither(&[64; 16], 4, 4, &levels);
    #[rustfmt::skip]
    let expected = vec![
        0, 0, 0, 0,
        0, 1, 0, 1,
        0, 0, 0, 0,
        0, 1, 0, 0,
    ];
    assert_eq!(result, expected);
}

/// If this breaks, it means: the serpentine scan crept in, or bright
/// pixels no longer saturate correctly under accumulated negative error.
#[test]
fn test_golden_three_quarter_tone() {
    let levels = GrayLevels::new(2).unwrap();
    let result = FloydSteinberg.dither(&[191; 16], 4, 4, &levels);
    #[rustfmt::skip]
    let expected = vec![
        1, 1, 1, 1,
        1, 0, 1, 0,
        1, 1, 1, 1,
        1, 0, 1, 1,
    ];
    assert_eq!(result, expected);
}

/// If this breaks, it means: a horizontal ramp no longer dithers row by row
/// in raster order.
#[test]
fn test_golden_ramp() {
    let levels = GrayLevels::new(2).unwrap();
    let ramp: Vec<u8> = [0, 36, 72, 109, 145, 182, 218, 255].repeat(2);
    let result = FloydSteinberg.dither(&ramp, 8, 2, &levels);
    #[rustfmt::skip]
    let expected = vec![
        0, 0, 0, 1, 0, 1, 1, 1,
        0, 0, 0, 1, 0, 1, 1, 1,
    ];
    assert_eq!(result, expected);
}

/// If this breaks, it means: the vertical-only path (width 1) stopped
/// receiving the 5/16 share from the pixel above.
#[test]
fn test_golden_single_column() {
    let levels = GrayLevels::new(2).unwrap();
    let result = FloydSteinberg.dither(&[100; 5], 1, 5, &levels);
    assert_eq!(result, vec![0, 1, 0, 0, 1]);
}

// ========================================================================
// Tone preservation
// ========================================================================

/// If this breaks, it means: error diffusion lost or amplified energy.
/// The fraction of white pixels must track the input grey.
#[test]
fn test_tone_preserved_for_midtones() {
    let levels = GrayLevels::new(2).unwrap();
    let size = 32;
    for gray in [32u8, 77, 128, 200] {
        let result = FloydSteinberg.dither(&vec![gray; size * size], size, size, &levels);
        let ratio = result.iter().filter(|&&i| i == 1).count() as f64 / (size * size) as f64;
        let expected = gray as f64 / 255.0;
        assert!(
            (ratio - expected).abs() < 0.06,
            "grey {gray}: white ratio {ratio:.3}, expected ~{expected:.3}"
        );
    }
}

/// If this breaks, it means: a pixel already on a level picked up error it
/// should not have. Flat level images pass through untouched.
#[test]
fn test_levels_are_fixed_points() {
    for count in [2usize, 4, 16, 256] {
        let levels = GrayLevels::new(count).unwrap();
        for &value in levels.values() {
            let result = FloydSteinberg.dither(&[value; 25], 5, 5, &levels);
            assert!(
                result.iter().all(|&i| levels.value(i) == value),
                "count {count}, level {value}"
            );
        }
    }
}

// ========================================================================
// Flat quantization
// ========================================================================

/// If this breaks, it means: threshold mode started propagating error.
#[test]
fn test_threshold_is_per_pixel() {
    let levels = GrayLevels::new(4).unwrap();
    let result = Threshold.dither(&[42, 43, 127, 128, 212, 213], 6, 1, &levels);
    assert_eq!(result, vec![0, 1, 1, 2, 2, 3]);
}

// ========================================================================
// End to end through the builder and remap
// ========================================================================

/// If this breaks, it means: two-bit output no longer lands on the default
/// four-grey table.
#[test]
fn test_quantize_and_remap_gray_4() {
    let quantizer = GrayQuantizer::new(4).unwrap().dither(false);
    let result = quantizer.quantize(&[0, 90, 180, 250], 4, 1).unwrap();
    let indexed = result.remap(&Palette::gray_4()).unwrap();

    assert_eq!(indexed.indices(), &[0, 1, 2, 3]);
    assert_eq!(
        indexed.to_rgb(),
        vec![0, 0, 0, 0x55, 0x55, 0x55, 0xAA, 0xAA, 0xAA, 255, 255, 255]
    );
}

/// If this breaks, it means: a table with more entries than levels is no
/// longer sampled at its ends.
#[test]
fn test_remap_two_levels_onto_four_colors() {
    let quantizer = GrayQuantizer::new(2).unwrap();
    let result = quantizer.quantize(&[0, 255], 2, 1).unwrap();
    let table = Palette::from_hex(&["#000000", "#FF0000", "#00FF00", "#FFFFFF"]).unwrap();
    let indexed = result.remap(&table).unwrap();

    assert_eq!(indexed.palette().to_hex(), vec!["#000000", "#FFFFFF"]);
}
