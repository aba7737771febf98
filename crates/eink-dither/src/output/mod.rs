//! Output types of the quantizer.
//!
//! - [`DitheredImage`]: level indices plus the levels they refer to
//! - [`IndexedImage`]: indices into an explicit color table, produced by
//!   [`DitheredImage::remap`]

mod dithered_image;
mod indexed_image;

pub use dithered_image::DitheredImage;
pub use indexed_image::IndexedImage;
