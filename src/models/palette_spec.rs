use eink_dither::{Palette, PaletteError};
use serde::{Deserialize, Serialize};

/// A named color table from the palettes catalog.
///
/// Without explicit `colors` the palette is a grey ramp of `grays` levels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteSpec {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub grays: u32,
    #[serde(default)]
    pub colors: Option<Vec<String>>,
    #[serde(default)]
    pub framework_class: String,
}

impl PaletteSpec {
    /// True if the palette carries an explicit color list.
    pub fn has_explicit_colors(&self) -> bool {
        self.colors.as_ref().is_some_and(|c| !c.is_empty())
    }

    /// Build the color table this spec describes.
    pub fn palette(&self) -> Result<Palette, PaletteError> {
        match &self.colors {
            Some(colors) if !colors.is_empty() => Palette::from_hex(colors),
            _ => Palette::grayscale(self.grays as usize),
        }
    }
}
