//! sRGB color type
//!
//! Colors are stored as 8-bit gamma-encoded channels, exactly as they appear
//! in image files and in device palette definitions. All quantization in this
//! crate happens on the integer luma derived from these bytes, so no float
//! conversion is involved and results are bit-for-bit reproducible.

use std::fmt;
use std::str::FromStr;

use crate::palette::ParseColorError;

/// A color in sRGB color space with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Srgb {
    /// Red channel (0..=255)
    pub r: u8,
    /// Green channel (0..=255)
    pub g: u8,
    /// Blue channel (0..=255)
    pub b: u8,
}

impl Srgb {
    /// Pure black.
    pub const BLACK: Srgb = Srgb::from_u8(0, 0, 0);

    /// Pure white.
    pub const WHITE: Srgb = Srgb::from_u8(255, 255, 255);

    /// Create an Srgb color from 8-bit channel values.
    ///
    /// # Example
    /// ```
    /// use eink_dither::Srgb;
    /// let red = Srgb::from_u8(255, 0, 0);
    /// assert_eq!(red.r, 255);
    /// ```
    #[inline]
    pub const fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create an Srgb color from a byte array [R, G, B].
    #[inline]
    pub const fn from_bytes(bytes: [u8; 3]) -> Self {
        Self::from_u8(bytes[0], bytes[1], bytes[2])
    }

    /// Create a neutral grey with all channels set to `value`.
    #[inline]
    pub const fn grey(value: u8) -> Self {
        Self::from_u8(value, value, value)
    }

    /// Convert to a byte array [R, G, B].
    #[inline]
    pub const fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Integer Rec.601 luma, rounded to nearest.
    ///
    /// Neutral greys map to themselves: `Srgb::grey(v).luma() == v`.
    ///
    /// ```
    /// use eink_dither::Srgb;
    /// assert_eq!(Srgb::grey(77).luma(), 77);
    /// assert_eq!(Srgb::from_u8(255, 0, 0).luma(), 76);
    /// ```
    #[inline]
    pub fn luma(self) -> u8 {
        let weighted = 299 * self.r as u32 + 587 * self.g as u32 + 114 * self.b as u32;
        ((weighted + 500) / 1000) as u8
    }

    /// True if all three channels are equal.
    #[inline]
    pub fn is_grey(self) -> bool {
        self.r == self.g && self.g == self.b
    }
}

impl fmt::Display for Srgb {
    /// Formats as uppercase `#RRGGBB`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for Srgb {
    type Err = ParseColorError;

    /// Parse an sRGB color from a hex string.
    ///
    /// Supports the following formats:
    /// - `#RRGGBB` - standard 6-digit hex with hash
    /// - `RRGGBB` - standard 6-digit hex without hash
    /// - `#RGB` - shorthand 3-digit hex with hash (expands to RRGGBB)
    /// - `RGB` - shorthand 3-digit hex without hash
    ///
    /// Parsing is case-insensitive. Leading and trailing whitespace is trimmed.
    ///
    /// ```
    /// use eink_dither::Srgb;
    ///
    /// let white: Srgb = "#FFFFFF".parse().unwrap();
    /// assert_eq!(white, Srgb::WHITE);
    ///
    /// let grey: Srgb = "#555".parse().unwrap();
    /// assert_eq!(grey, Srgb::grey(0x55));
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);
        if !s.is_ascii() {
            return Err(ParseColorError::InvalidLength);
        }

        match s.len() {
            3 => {
                // Shorthand: expand each digit by multiplying by 17 (0xF -> 0xFF)
                let r = u8::from_str_radix(&s[0..1], 16)? * 17;
                let g = u8::from_str_radix(&s[1..2], 16)? * 17;
                let b = u8::from_str_radix(&s[2..3], 16)? * 17;
                Ok(Self::from_u8(r, g, b))
            }
            6 => {
                let r = u8::from_str_radix(&s[0..2], 16)?;
                let g = u8::from_str_radix(&s[2..4], 16)?;
                let b = u8::from_str_radix(&s[4..6], 16)?;
                Ok(Self::from_u8(r, g, b))
            }
            _ => Err(ParseColorError::InvalidLength),
        }
    }
}
