use serde::{Deserialize, Serialize};
use std::fmt;

/// Device category tag from the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
    Trmnl,
    Kindle,
    Byod,
    #[default]
    #[serde(other)]
    Unknown,
}

impl DeviceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceKind::Trmnl => "trmnl",
            DeviceKind::Kindle => "kindle",
            DeviceKind::Byod => "byod",
            DeviceKind::Unknown => "unknown",
        }
    }

    /// Parse a category tag; unrecognized tags map to `Unknown`.
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "trmnl" => DeviceKind::Trmnl,
            "kindle" => DeviceKind::Kindle,
            "byod" => DeviceKind::Byod,
            _ => DeviceKind::Unknown,
        }
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output container format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputFormat {
    #[default]
    Png,
    Bmp,
}

impl OutputFormat {
    /// Map a MIME type (or bare extension) to a format; anything not BMP is PNG.
    pub fn from_mime(mime: &str) -> Self {
        match mime.trim().to_lowercase().as_str() {
            "image/bmp" | "image/x-bmp" | "image/x-ms-bmp" | "bmp" => OutputFormat::Bmp,
            _ => OutputFormat::Png,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Bmp => "bmp",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::Png => "image/png",
            OutputFormat::Bmp => "image/bmp",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Static attributes of one target display, as declared in the models catalog.
///
/// Numeric fields missing from the catalog deserialize to 0 and are treated
/// as "unset" by parameter resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceProfile {
    pub name: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub colors: u32,
    #[serde(default)]
    pub bit_depth: u32,
    #[serde(default = "default_scale_factor")]
    pub scale_factor: f64,
    #[serde(default)]
    pub rotation: i32,
    #[serde(default = "default_mime_type")]
    pub mime_type: String,
    #[serde(default)]
    pub offset_x: i32,
    #[serde(default)]
    pub offset_y: i32,
    #[serde(default)]
    pub published_at: String,
    #[serde(default)]
    pub kind: DeviceKind,
    #[serde(default)]
    pub palette_ids: Vec<String>,
}

fn default_scale_factor() -> f64 {
    1.0
}

fn default_mime_type() -> String {
    "image/png".to_string()
}

impl DeviceProfile {
    pub fn output_format(&self) -> OutputFormat {
        OutputFormat::from_mime(&self.mime_type)
    }
}
