//! Public API for the eink-dither crate.
//!
//! This module provides the high-level API: [`GrayQuantizer`] builder and
//! [`DitherError`] unified error type.

mod builder;
mod error;

pub use builder::GrayQuantizer;
pub use error::DitherError;
