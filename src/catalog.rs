use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

mod entities;

pub use entities::{Catalog, FieldInfo, StructCatalogEntry, StructInfo};

/// File holding the canonical key aliases
pub const KEYS_FILE: &str = "log-keys.json";
/// File holding the struct definitions
pub const STRUCTS_FILE: &str = "sorbet-log-structs.json";

const ENUM_SINGLE: &str = "enum_single";
const ENUM_UNION: &str = "enum_union";

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog export '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse catalog export '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("struct {struct_name}: {reason}")]
    InvalidEventField { struct_name: String, reason: String },
}

/// Load the catalog from an export directory using the default file names
pub fn load_catalog(dir: impl AsRef<Path>) -> Result<Catalog, CatalogError> {
    let dir = dir.as_ref();
    load_catalog_from_files(&dir.join(KEYS_FILE), &dir.join(STRUCTS_FILE))
}

pub fn load_catalog_from_files(
    keys_path: &Path,
    structs_path: &Path,
) -> Result<Catalog, CatalogError> {
    let keys_raw = read_export(keys_path)?;
    let structs_raw = read_export(structs_path)?;

    let keys: BTreeMap<String, String> =
        serde_json::from_str(&keys_raw).map_err(|source| CatalogError::Parse {
            path: keys_path.display().to_string(),
            source,
        })?;
    let structs: BTreeMap<String, StructInfo> =
        serde_json::from_str(&structs_raw).map_err(|source| CatalogError::Parse {
            path: structs_path.display().to_string(),
            source,
        })?;

    let catalog = build_catalog(keys, structs)?;
    debug!(
        keys = catalog.keys().len(),
        structs = catalog.len(),
        path = %structs_path.display(),
        "loaded log catalog"
    );
    Ok(catalog)
}

/// Build a catalog from already-parsed exports
pub fn build_catalog(
    keys: BTreeMap<String, String>,
    structs: BTreeMap<String, StructInfo>,
) -> Result<Catalog, CatalogError> {
    let mut entries = Vec::with_capacity(structs.len());
    for (name, info) in &structs {
        entries.push((name.clone(), struct_entry(name, info)?));
    }
    Ok(Catalog::new(keys, entries))
}

fn read_export(path: &Path) -> Result<String, CatalogError> {
    fs::read_to_string(path).map_err(|source| CatalogError::Read {
        path: path.display().to_string(),
        source,
    })
}

fn struct_entry(name: &str, info: &StructInfo) -> Result<StructCatalogEntry, CatalogError> {
    let event = info
        .fields
        .get("event")
        .ok_or_else(|| CatalogError::InvalidEventField {
            struct_name: name.to_string(),
            reason: "missing event field".to_string(),
        })?;

    // Empty enumerations are kept as-is; the resolver reports them on use.
    let allowed_events = match event.field_type.as_str() {
        ENUM_SINGLE => event
            .enum_value
            .iter()
            .filter(|value| !value.is_empty())
            .cloned()
            .collect(),
        ENUM_UNION => {
            let mut seen = BTreeSet::new();
            event
                .enum_values
                .iter()
                .filter(|value| seen.insert(value.as_str()))
                .cloned()
                .collect()
        }
        other => {
            return Err(CatalogError::InvalidEventField {
                struct_name: name.to_string(),
                reason: format!("event field not enum: {}", other),
            });
        }
    };

    let fixed_source = info
        .fields
        .get("source")
        .filter(|field| field.field_type == ENUM_SINGLE)
        .and_then(|field| field.enum_value.clone())
        .filter(|value| !value.is_empty());

    Ok(StructCatalogEntry {
        allowed_events,
        fixed_source,
    })
}
