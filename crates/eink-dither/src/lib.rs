#![allow(clippy::module_inception)]

//! eink-dither: grey-level quantization for e-ink displays
//!
//! This library reduces an 8-bit grey plane to N evenly spaced levels, with
//! or without Floyd-Steinberg error diffusion, and maps the resulting levels
//! onto a device color table.
//!
//! # Quick Start
//!
//! The [`GrayQuantizer`] builder is the primary entry point:
//!
//! ```
//! use eink_dither::{GrayQuantizer, Palette};
//!
//! let quantizer = GrayQuantizer::new(4).unwrap();
//! let gray = vec![128u8; 16];
//! let result = quantizer.quantize(&gray, 4, 4).unwrap();
//!
//! assert_eq!(result.width(), 4);
//! assert!(result.indices().iter().all(|&i| i < 4));
//!
//! let indexed = result.remap(&Palette::gray_4()).unwrap();
//! assert_eq!(indexed.palette().len(), 4);
//! ```
//!
//! # Levels
//!
//! Level `i` of `n` has the grey value `round(i * 255 / (n - 1))`, computed
//! in integers. Four levels are 0, 85, 170, 255; sixteen are the multiples
//! of 17. A pixel picks the nearest level, the darker one on a tie.
//!
//! # Determinism
//!
//! All arithmetic is integer. Error diffusion scans in raster order and
//! divides each neighbor's share with truncation toward zero, so the same
//! input produces the same indices on every platform and every run.

pub mod api;
pub mod color;
pub mod dither;
pub mod output;
pub mod palette;

#[cfg(test)]
mod domain_tests;

pub use api::{DitherError, GrayQuantizer};
pub use color::Srgb;
pub use dither::{level_value, Dither, FloydSteinberg, GrayLevels, Kernel, Threshold, FLOYD_STEINBERG};
pub use output::{DitheredImage, IndexedImage};
pub use palette::{Palette, PaletteError, ParseColorError};
