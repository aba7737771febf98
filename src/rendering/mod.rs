pub mod encode;
pub mod geometry;
pub mod quantize;
pub mod raster;

pub use encode::{encode, packed_depth, processed_path_for, EncodedImage};
pub use geometry::{resize_and_center, rotate, translate, Rotation};
pub use quantize::{default_colormap, luma_plane, quantize, remap, QuantizedRaster};
pub use raster::RasterBuffer;
