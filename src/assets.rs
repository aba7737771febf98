//! Catalog data loading with embedded fallbacks
//!
//! - If an override path is NOT set: use the embedded catalog files only
//! - If an override path IS set and exists: read it from the filesystem
//! - If an override path IS set but missing: warn and fall back to embedded

use rust_embed::RustEmbed;
use std::borrow::Cow;
use std::fs;
use std::path::PathBuf;

use crate::error::CatalogLoadError;

/// Embedded default catalog (device models and palettes)
#[derive(RustEmbed)]
#[folder = "data/"]
#[include = "*.json"]
struct EmbeddedCatalog;

pub const MODELS_FILE: &str = "models.json";
pub const PALETTES_FILE: &str = "palettes.json";

/// Catalog file category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFile {
    Models,
    Palettes,
}

impl CatalogFile {
    pub fn file_name(&self) -> &'static str {
        match self {
            CatalogFile::Models => MODELS_FILE,
            CatalogFile::Palettes => PALETTES_FILE,
        }
    }

    /// Environment variable that overrides the embedded file.
    pub fn env_var(&self) -> &'static str {
        match self {
            CatalogFile::Models => "MODELS_FILE",
            CatalogFile::Palettes => "PALETTES_FILE",
        }
    }
}

/// Catalog source with optional filesystem overrides
#[derive(Debug, Clone, Default)]
pub struct AssetLoader {
    /// External models file (from MODELS_FILE env var)
    models_file: Option<PathBuf>,
    /// External palettes file (from PALETTES_FILE env var)
    palettes_file: Option<PathBuf>,
}

impl AssetLoader {
    /// Create a loader.
    ///
    /// Paths should be `Some` only if the corresponding override was given.
    /// If `None`, the embedded catalog is used exclusively.
    pub fn new(models_file: Option<PathBuf>, palettes_file: Option<PathBuf>) -> Self {
        Self {
            models_file,
            palettes_file,
        }
    }

    /// Loader configured from `MODELS_FILE` / `PALETTES_FILE`.
    pub fn from_env() -> Self {
        Self::new(
            std::env::var(CatalogFile::Models.env_var())
                .ok()
                .map(PathBuf::from),
            std::env::var(CatalogFile::Palettes.env_var())
                .ok()
                .map(PathBuf::from),
        )
    }

    fn override_path(&self, file: CatalogFile) -> Option<&PathBuf> {
        match file {
            CatalogFile::Models => self.models_file.as_ref(),
            CatalogFile::Palettes => self.palettes_file.as_ref(),
        }
    }

    /// Read a catalog file, preferring the configured override.
    pub fn read(&self, file: CatalogFile) -> Result<Cow<'static, [u8]>, CatalogLoadError> {
        if let Some(path) = self.override_path(file) {
            if path.exists() {
                tracing::debug!(path = %path.display(), "Loading catalog from filesystem");
                return fs::read(path).map(Cow::Owned).map_err(|source| {
                    CatalogLoadError::Unreadable {
                        source_name: path.display().to_string(),
                        source,
                    }
                });
            }
            tracing::warn!(
                path = %path.display(),
                "Catalog override not found, using embedded {}",
                file.file_name()
            );
        }

        EmbeddedCatalog::get(file.file_name())
            .map(|f| {
                tracing::trace!(file = file.file_name(), "Loading catalog from embedded assets");
                f.data
            })
            .ok_or_else(|| CatalogLoadError::Unreadable {
                source_name: file.file_name().to_string(),
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("Embedded {} not found", file.file_name()),
                ),
            })
    }

    /// Name used in error messages for a catalog file.
    pub fn source_name(&self, file: CatalogFile) -> String {
        match self.override_path(file) {
            Some(path) if path.exists() => path.display().to_string(),
            _ => file.file_name().to_string(),
        }
    }

    /// List embedded catalog files (for display)
    pub fn list_embedded() -> Vec<String> {
        EmbeddedCatalog::iter().map(|s| s.to_string()).collect()
    }
}
