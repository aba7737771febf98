pub mod catalog;
pub mod pipeline;

pub use catalog::{Catalog, CatalogStore};
pub use pipeline::{BlankBackend, ImagingBackend, TransformBackend, TransformPipeline};
