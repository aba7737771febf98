//! Color types
//!
//! Only 8-bit sRGB is needed: device palettes are defined in sRGB hex codes,
//! and quantization works on the integer luma of each pixel.
//!
//! # Example
//!
//! ```
//! use eink_dither::Srgb;
//!
//! let pixel = Srgb::from_u8(128, 64, 32);
//! let luma = pixel.luma();
//! assert!(luma > 32 && luma < 128);
//! ```

mod srgb;

pub use srgb::Srgb;
