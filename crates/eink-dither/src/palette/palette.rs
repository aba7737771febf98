//! Ordered color table used to give quantization levels their final colors.
//!
//! A [`Palette`] is the indexed-color table written into the output image.
//! Entry order matters: the darkest quantization level selects the first
//! entry and the lightest level selects the last.

use std::str::FromStr;

use super::error::PaletteError;
use crate::color::Srgb;
use crate::dither::level_value;

/// A non-empty, ordered table of colors.
///
/// # Example
///
/// ```
/// use eink_dither::{Palette, Srgb};
///
/// let palette = Palette::from_hex(&["#000000", "#FFFFFF"]).unwrap();
/// assert_eq!(palette.len(), 2);
/// assert_eq!(palette.color(1), Srgb::WHITE);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Srgb>,
}

impl Palette {
    /// Create a palette from an ordered list of colors.
    ///
    /// Duplicates are allowed; a table may legitimately repeat an entry
    /// (for example two levels that the panel renders identically).
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::EmptyPalette`] if `colors` is empty.
    pub fn new(colors: &[Srgb]) -> Result<Self, PaletteError> {
        if colors.is_empty() {
            return Err(PaletteError::EmptyPalette);
        }
        Ok(Self {
            colors: colors.to_vec(),
        })
    }

    /// Create a palette from hex color strings.
    ///
    /// Accepts anything [`Srgb::from_str`] accepts (`#RRGGBB`, `#RGB`, with or
    /// without the hash).
    pub fn from_hex<S: AsRef<str>>(colors: &[S]) -> Result<Self, PaletteError> {
        let parsed = colors
            .iter()
            .enumerate()
            .map(|(index, s)| {
                Srgb::from_str(s.as_ref()).map_err(|source| PaletteError::ParseColor { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(&parsed)
    }

    /// An evenly spaced grey ramp from black to white.
    ///
    /// ```
    /// use eink_dither::{Palette, Srgb};
    ///
    /// let ramp = Palette::grayscale(4).unwrap();
    /// assert_eq!(ramp.color(1), Srgb::grey(85));
    /// assert_eq!(ramp.color(3), Srgb::WHITE);
    /// ```
    pub fn grayscale(levels: usize) -> Result<Self, PaletteError> {
        if !(2..=256).contains(&levels) {
            return Err(PaletteError::InvalidRamp { levels });
        }
        let colors: Vec<Srgb> = (0..levels)
            .map(|i| Srgb::grey(level_value(i, levels)))
            .collect();
        Self::new(&colors)
    }

    /// The default 1-bit table: black, white.
    pub fn black_white() -> Self {
        Self {
            colors: vec![Srgb::BLACK, Srgb::WHITE],
        }
    }

    /// The default 2-bit table: black, dark grey, light grey, white.
    pub fn gray_4() -> Self {
        Self {
            colors: vec![
                Srgb::BLACK,
                Srgb::grey(0x55),
                Srgb::grey(0xAA),
                Srgb::WHITE,
            ],
        }
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false; kept for API symmetry with `len()`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Color at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    #[inline]
    pub fn color(&self, index: usize) -> Srgb {
        self.colors[index]
    }

    /// All entries in order.
    #[inline]
    pub fn colors(&self) -> &[Srgb] {
        &self.colors
    }

    /// True if every entry is a neutral grey.
    pub fn is_grey(&self) -> bool {
        self.colors.iter().all(|c| c.is_grey())
    }

    /// Entries as `[R, G, B]` triples, e.g. for a PNG `PLTE` chunk.
    pub fn to_rgb_table(&self) -> Vec<[u8; 3]> {
        self.colors.iter().map(|c| c.to_bytes()).collect()
    }

    /// Entries as uppercase `#RRGGBB` strings.
    pub fn to_hex(&self) -> Vec<String> {
        self.colors.iter().map(|c| c.to_string()).collect()
    }
}
