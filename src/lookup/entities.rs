use crate::pattern::PredicateSet;
use serde::Serialize;
use std::collections::BTreeMap;

/// Everything known about one struct
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructDetail {
    #[serde(rename = "struct")]
    pub struct_name: String,
    pub allowed_events: Vec<String>,
    /// True when the struct declares exactly one event
    pub single_valued: bool,
    pub fixed_source: Option<String>,
    pub keys: BTreeMap<String, String>,
}

/// A compiled pattern together with the request that produced it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterPattern {
    #[serde(rename = "struct")]
    pub struct_name: String,
    pub event: String,
    #[serde(skip_serializing_if = "PredicateSet::is_empty")]
    pub predicates: PredicateSet,
    pub pattern: String,
}

/// Result of resolving a (source, event) pair back to a struct
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceMatch {
    pub source: String,
    pub event: String,
    #[serde(rename = "struct")]
    pub struct_name: String,
    pub pattern: String,
    /// Other structs with the same fixed source that also allow the event
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub also_matched: Vec<String>,
}

/// Structs and events sharing one fixed source
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceEvents {
    pub source: String,
    pub structs: Vec<String>,
    /// Sorted union of the structs' allowed events
    pub events: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructSnapshot {
    pub allowed_events: Vec<String>,
    pub fixed_source: Option<String>,
    /// Event -> compiled pattern, one entry per allowed event
    pub patterns: BTreeMap<String, String>,
}

/// Exhaustive enumeration of the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogSnapshot {
    pub structs: BTreeMap<String, StructSnapshot>,
    pub keys: BTreeMap<String, String>,
}

impl CatalogSnapshot {
    pub fn pattern_count(&self) -> usize {
        self.structs
            .values()
            .map(|snapshot| snapshot.patterns.len())
            .sum()
    }
}
