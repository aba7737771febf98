//! TRMNL pipeline
//!
//! Turns an arbitrary rendered screen into device-ready output for TRMNL and
//! other e-ink displays: best-fit resize onto the panel canvas, offset,
//! rotation, grey quantization with Floyd-Steinberg dithering, palette remap
//! and PNG/BMP encoding, parameterized by a catalog of device profiles.
//! This library exposes modules for integration testing.

pub mod assets;
pub mod error;
pub mod models;
pub mod rendering;
pub mod services;

pub use error::{CatalogLoadError, PipelineError, Stage};
pub use models::{DeviceProfile, Model, OutputFormat, PaletteSpec};
pub use models::{TransformOverrides, TransformParameters};
pub use rendering::{EncodedImage, RasterBuffer, Rotation};
pub use services::{Catalog, CatalogStore, TransformPipeline};
