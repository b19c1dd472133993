use serde::Deserialize;
use std::collections::BTreeMap;

/// Metadata for one registered struct
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructCatalogEntry {
    /// Legal values of the struct's `event` field, in export order
    pub allowed_events: Vec<String>,
    /// Source value carried by every log line of this struct, if constant
    pub fixed_source: Option<String>,
}

impl StructCatalogEntry {
    pub fn new<I, S>(allowed_events: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed_events: allowed_events.into_iter().map(Into::into).collect(),
            fixed_source: None,
        }
    }

    pub fn with_fixed_source(mut self, source: impl Into<String>) -> Self {
        self.fixed_source = Some(source.into());
        self
    }
}

/// Immutable view of the exported log metadata.
///
/// Both maps are ordered so every scan over the catalog, and anything
/// serialized from it, comes out in lexicographic order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    keys: BTreeMap<String, String>,
    structs: BTreeMap<String, StructCatalogEntry>,
}

impl Catalog {
    pub fn new<K, V, N>(
        keys: impl IntoIterator<Item = (K, V)>,
        structs: impl IntoIterator<Item = (N, StructCatalogEntry)>,
    ) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        N: Into<String>,
    {
        Self {
            keys: keys
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            structs: structs
                .into_iter()
                .map(|(name, entry)| (name.into(), entry))
                .collect(),
        }
    }

    /// Canonical field name -> path used inside emitted log lines
    pub fn keys(&self) -> &BTreeMap<String, String> {
        &self.keys
    }

    pub fn key_alias(&self, canonical: &str) -> Option<&str> {
        self.keys.get(canonical).map(String::as_str)
    }

    pub fn get(&self, struct_name: &str) -> Option<&StructCatalogEntry> {
        self.structs.get(struct_name)
    }

    /// Iterate registered structs in lexicographic name order
    pub fn structs(&self) -> impl Iterator<Item = (&str, &StructCatalogEntry)> {
        self.structs
            .iter()
            .map(|(name, entry)| (name.as_str(), entry))
    }

    pub fn struct_names(&self) -> impl Iterator<Item = &str> {
        self.structs.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.structs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.structs.is_empty()
    }
}

/// One field as described in `sorbet-log-structs.json`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FieldInfo {
    pub optional: bool,
    #[serde(rename = "type")]
    pub field_type: String,
    pub base_enum: Option<String>,
    pub enum_value: Option<String>,
    pub enum_values: Vec<String>,
}

/// One struct as described in `sorbet-log-structs.json`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StructInfo {
    pub name: String,
    pub fields: BTreeMap<String, FieldInfo>,
}
