use eink_dither::Palette;

use super::{DeviceProfile, OutputFormat, PaletteSpec};
use crate::error::PipelineError;
use crate::rendering::{packed_depth, Rotation};

pub const DEFAULT_WIDTH: u32 = 800;
pub const DEFAULT_HEIGHT: u32 = 480;
pub const DEFAULT_COLORS: u32 = 2;
pub const DEFAULT_BIT_DEPTH: u32 = 1;

/// Values the caller sets explicitly for one invocation.
///
/// `None` means "take it from the device profile, else the default".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransformOverrides {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub colors: Option<u32>,
    pub bit_depth: Option<u32>,
    pub rotation: Option<i32>,
    pub offset_x: Option<i32>,
    pub offset_y: Option<i32>,
    pub format: Option<OutputFormat>,
    /// Explicit color table as hex strings, darkest level first.
    pub colormap: Option<Vec<String>>,
    pub dither: Option<bool>,
}

impl TransformOverrides {
    /// Use a catalog palette as the explicit color table.
    ///
    /// A palette without explicit colors contributes its grey ramp.
    pub fn with_palette(mut self, spec: &PaletteSpec) -> Result<Self, PipelineError> {
        let palette = spec
            .palette()
            .map_err(|e| PipelineError::invalid(format!("palette '{}': {e}", spec.id)))?;
        self.colormap = Some(palette.to_hex());
        Ok(self)
    }
}

/// Fully resolved, validated parameters for one pipeline run.
///
/// Built once by [`TransformParameters::resolve`] and never changed after.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformParameters {
    width: u32,
    height: u32,
    colors: u32,
    bit_depth: u8,
    rotation: Rotation,
    offset_x: i32,
    offset_y: i32,
    format: OutputFormat,
    colormap: Option<Palette>,
    dither: bool,
}

impl Default for TransformParameters {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            colors: DEFAULT_COLORS,
            bit_depth: DEFAULT_BIT_DEPTH as u8,
            rotation: Rotation::None,
            offset_x: 0,
            offset_y: 0,
            format: OutputFormat::Png,
            colormap: None,
            dither: true,
        }
    }
}

/// override > profile (if non-zero) > default
fn pick_dimension(explicit: Option<u32>, from_profile: Option<u32>, default: u32) -> u32 {
    explicit
        .or(from_profile.filter(|&v| v != 0))
        .unwrap_or(default)
}

impl TransformParameters {
    /// Resolve every field: explicit override, then the bound profile, then
    /// the built-in default. Profile sizes, colors and bit depth of 0 count
    /// as unset.
    ///
    /// # Errors
    ///
    /// [`PipelineError::InvalidInput`] for zero dimensions, colors outside
    /// `2..=256`, bit depth outside `1..=8`, more colors than the bit depth
    /// can hold, a rotation that is not a multiple of 90, or an unparsable
    /// colormap.
    pub fn resolve(
        overrides: &TransformOverrides,
        profile: Option<&DeviceProfile>,
    ) -> Result<Self, PipelineError> {
        let width = pick_dimension(overrides.width, profile.map(|p| p.width), DEFAULT_WIDTH);
        let height = pick_dimension(overrides.height, profile.map(|p| p.height), DEFAULT_HEIGHT);
        let colors = pick_dimension(overrides.colors, profile.map(|p| p.colors), DEFAULT_COLORS);
        let bit_depth = pick_dimension(
            overrides.bit_depth,
            profile.map(|p| p.bit_depth),
            DEFAULT_BIT_DEPTH,
        );
        let rotation = overrides
            .rotation
            .or(profile.map(|p| p.rotation))
            .unwrap_or(0);
        let offset_x = overrides
            .offset_x
            .or(profile.map(|p| p.offset_x))
            .unwrap_or(0);
        let offset_y = overrides
            .offset_y
            .or(profile.map(|p| p.offset_y))
            .unwrap_or(0);
        let format = overrides
            .format
            .or(profile.map(DeviceProfile::output_format))
            .unwrap_or_default();

        if width == 0 || height == 0 {
            return Err(PipelineError::invalid(format!(
                "target size must be non-zero, got {width}x{height}"
            )));
        }
        if !(2..=256).contains(&colors) {
            return Err(PipelineError::invalid(format!(
                "colors must be between 2 and 256, got {colors}"
            )));
        }
        if !(1..=8).contains(&bit_depth) {
            return Err(PipelineError::invalid(format!(
                "bit depth must be between 1 and 8, got {bit_depth}"
            )));
        }
        let bit_depth = bit_depth as u8;
        let capacity = 1u32 << packed_depth(bit_depth);
        if colors > capacity {
            return Err(PipelineError::invalid(format!(
                "{colors} colors do not fit in bit depth {bit_depth}"
            )));
        }

        let rotation = Rotation::from_degrees(rotation)?;
        let colormap = overrides
            .colormap
            .as_deref()
            .map(Palette::from_hex)
            .transpose()
            .map_err(|e| PipelineError::invalid(format!("colormap: {e}")))?;

        let params = Self {
            width,
            height,
            colors,
            bit_depth,
            rotation,
            offset_x,
            offset_y,
            format,
            colormap,
            dither: overrides.dither.unwrap_or(true),
        };
        tracing::debug!(
            profile = profile.map(|p| p.name.as_str()),
            params = %params.describe(),
            "Resolved transform parameters"
        );
        Ok(params)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn colors(&self) -> u32 {
        self.colors
    }

    /// Number of quantization levels.
    pub fn levels(&self) -> usize {
        self.colors as usize
    }

    pub fn bit_depth(&self) -> u8 {
        self.bit_depth
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn offset_x(&self) -> i32 {
        self.offset_x
    }

    pub fn offset_y(&self) -> i32 {
        self.offset_y
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn colormap(&self) -> Option<&Palette> {
        self.colormap.as_ref()
    }

    pub fn dither(&self) -> bool {
        self.dither
    }

    /// Canvas size after rotation.
    pub fn output_dimensions(&self) -> (u32, u32) {
        if self.rotation.swaps_dimensions() {
            (self.height, self.width)
        } else {
            (self.width, self.height)
        }
    }

    /// One-line summary used as error context.
    pub fn describe(&self) -> String {
        format!(
            "{}x{} colors={} bit_depth={} rotation={} offset={},{} format={} dither={}",
            self.width,
            self.height,
            self.colors,
            self.bit_depth,
            self.rotation.degrees(),
            self.offset_x,
            self.offset_y,
            self.format,
            self.dither
        )
    }
}
