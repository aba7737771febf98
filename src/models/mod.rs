pub mod device_profile;
pub mod model;
pub mod palette_spec;
pub mod params;

pub use device_profile::{DeviceKind, DeviceProfile, OutputFormat};
pub use model::{resolve_alias, Model, ALIASES};
pub use palette_spec::PaletteSpec;
pub use params::{
    TransformOverrides, TransformParameters, DEFAULT_BIT_DEPTH, DEFAULT_COLORS, DEFAULT_HEIGHT,
    DEFAULT_WIDTH,
};
