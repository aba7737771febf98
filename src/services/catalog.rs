use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::assets::{AssetLoader, CatalogFile};
use crate::error::{CatalogLoadError, PipelineError};
use crate::models::{resolve_alias, DeviceKind, DeviceProfile, Model, PaletteSpec};

/// Immutable set of device profiles and palettes, keyed by identifier.
///
/// Declaration order from the source files is preserved for listing and
/// filtering.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    profiles: Vec<DeviceProfile>,
    profile_index: HashMap<String, usize>,
    palettes: Vec<PaletteSpec>,
    palette_index: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog from already parsed records.
    ///
    /// Fails with [`CatalogLoadError::DuplicateKey`] if an identifier repeats.
    pub fn new(
        profiles: Vec<DeviceProfile>,
        palettes: Vec<PaletteSpec>,
    ) -> Result<Self, CatalogLoadError> {
        let profile_index = index_by(&profiles, "models", "name", |p| &p.name)?;
        let palette_index = index_by(&palettes, "palettes", "id", |p| &p.id)?;
        Ok(Self {
            profiles,
            profile_index,
            palettes,
            palette_index,
        })
    }

    /// Parse `{"data": [...]}` documents for models and palettes.
    pub fn from_json(models: &[u8], palettes: &[u8]) -> Result<Self, CatalogLoadError> {
        Self::new(
            parse_records(models, "models", "name")?,
            parse_records(palettes, "palettes", "id")?,
        )
    }

    /// Load through an [`AssetLoader`] (embedded data or overrides).
    pub fn load(loader: &AssetLoader) -> Result<Self, CatalogLoadError> {
        let models = loader.read(CatalogFile::Models)?;
        let palettes = loader.read(CatalogFile::Palettes)?;
        let catalog = Self::new(
            parse_records(&models, &loader.source_name(CatalogFile::Models), "name")?,
            parse_records(&palettes, &loader.source_name(CatalogFile::Palettes), "id")?,
        )?;
        tracing::info!(
            models = catalog.profiles.len(),
            palettes = catalog.palettes.len(),
            "Loaded catalog"
        );
        Ok(catalog)
    }

    /// The catalog shipped with the crate.
    pub fn embedded() -> Result<Self, CatalogLoadError> {
        Self::load(&AssetLoader::default())
    }

    /// Look up a profile by identifier, following the alias table first.
    pub fn profile_by_name(&self, name: &str) -> Result<&DeviceProfile, PipelineError> {
        self.profile_index
            .get(resolve_alias(name))
            .map(|&i| &self.profiles[i])
            .ok_or_else(|| PipelineError::NotFound(name.to_string()))
    }

    pub fn profile_for(&self, model: Model) -> Result<&DeviceProfile, PipelineError> {
        self.profile_by_name(model.as_str())
    }

    /// Profiles of one category, in declaration order.
    pub fn profiles_by_kind(&self, kind: DeviceKind) -> Vec<&DeviceProfile> {
        self.profiles.iter().filter(|p| p.kind == kind).collect()
    }

    /// Known models whose own record has the given category.
    pub fn models_by_kind(&self, kind: DeviceKind) -> Vec<Model> {
        Model::ALL
            .into_iter()
            .filter(|m| {
                self.profile_index
                    .get(m.as_str())
                    .is_some_and(|&i| self.profiles[i].kind == kind)
            })
            .collect()
    }

    /// Look up a palette; an unknown id is `None`, not an error.
    pub fn palette_by_id(&self, id: &str) -> Option<&PaletteSpec> {
        self.palette_index.get(id).map(|&i| &self.palettes[i])
    }

    /// Compatible palettes of a profile that exist in the catalog, in profile order.
    pub fn palettes_for(&self, profile: &DeviceProfile) -> Vec<&PaletteSpec> {
        profile
            .palette_ids
            .iter()
            .filter_map(|id| self.palette_by_id(id))
            .collect()
    }

    pub fn profiles(&self) -> &[DeviceProfile] {
        &self.profiles
    }

    pub fn palettes(&self) -> &[PaletteSpec] {
        &self.palettes
    }

    pub fn profile_names(&self) -> Vec<&str> {
        self.profiles.iter().map(|p| p.name.as_str()).collect()
    }

    pub fn palette_ids(&self) -> Vec<&str> {
        self.palettes.iter().map(|p| p.id.as_str()).collect()
    }
}

fn index_by<T>(
    records: &[T],
    source_name: &str,
    key: &'static str,
    id: impl Fn(&T) -> &String,
) -> Result<HashMap<String, usize>, CatalogLoadError> {
    let mut index = HashMap::with_capacity(records.len());
    for (i, record) in records.iter().enumerate() {
        if index.insert(id(record).clone(), i).is_some() {
            return Err(CatalogLoadError::DuplicateKey {
                source_name: source_name.to_string(),
                key,
                value: id(record).clone(),
            });
        }
    }
    Ok(index)
}

/// Parse the `data` array of a catalog document into typed records.
///
/// Each record must be an object carrying `key`; the first violation aborts.
fn parse_records<T: DeserializeOwned>(
    bytes: &[u8],
    source_name: &str,
    key: &'static str,
) -> Result<Vec<T>, CatalogLoadError> {
    let malformed = |reason: String| CatalogLoadError::Malformed {
        source_name: source_name.to_string(),
        reason,
    };

    let mut document: Value =
        serde_json::from_slice(bytes).map_err(|e| malformed(format!("invalid JSON: {e}")))?;

    let records = match document.get_mut("data").map(Value::take) {
        Some(Value::Array(records)) => records,
        _ => return Err(malformed("missing 'data' array".to_string())),
    };

    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            if !record.is_object() {
                return Err(malformed(format!("record {index} is not an object")));
            }
            if record.get(key).map_or(true, Value::is_null) {
                return Err(CatalogLoadError::MissingKey {
                    source_name: source_name.to_string(),
                    index,
                    key,
                });
            }
            serde_json::from_value(record).map_err(|e| malformed(format!("record {index}: {e}")))
        })
        .collect()
}

/// Process-wide holder of the current catalog snapshot.
///
/// Readers take an `Arc` snapshot and keep using it even if a reload swaps
/// in a new catalog meanwhile; a snapshot is never mutated.
#[derive(Debug)]
pub struct CatalogStore {
    current: RwLock<Arc<Catalog>>,
}

impl CatalogStore {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            current: RwLock::new(Arc::new(catalog)),
        }
    }

    /// The catalog currently in effect.
    pub fn snapshot(&self) -> Arc<Catalog> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Swap in a new catalog, returning the previous snapshot.
    pub fn replace(&self, catalog: Catalog) -> Arc<Catalog> {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *current, Arc::new(catalog))
    }

    /// Load a fresh catalog and swap it in. On failure the current one stays.
    pub fn reload(&self, loader: &AssetLoader) -> Result<Arc<Catalog>, CatalogLoadError> {
        let catalog = Arc::new(Catalog::load(loader)?);
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *current = Arc::clone(&catalog);
        Ok(catalog)
    }
}
