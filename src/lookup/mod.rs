//! Read-only query facades over the catalog

use crate::catalog::Catalog;
use crate::error::LookupError;
use crate::pattern::{PredicateSet, compile_pattern};
use crate::resolver::{allowed_events, fixed_source, structs_with_fixed_source};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, warn};

pub mod display;
mod entities;

pub use display::{
    format_filter_pattern_text, format_snapshot_text, format_source_events_text,
    format_source_match_text, format_struct_detail_text,
};
pub use entities::{
    CatalogSnapshot, FilterPattern, SourceEvents, SourceMatch, StructDetail, StructSnapshot,
};

/// Allowed events, fixed source and key aliases for one struct
pub fn struct_detail(catalog: &Catalog, struct_name: &str) -> Result<StructDetail, LookupError> {
    let (events, single_valued) = allowed_events(catalog, struct_name)?;
    let source = fixed_source(catalog, struct_name)?;

    Ok(StructDetail {
        struct_name: struct_name.to_string(),
        allowed_events: events.to_vec(),
        single_valued,
        fixed_source: source.map(str::to_string),
        keys: catalog.keys().clone(),
    })
}

/// Compile one pattern and keep the request alongside it
pub fn filter_pattern(
    catalog: &Catalog,
    struct_name: &str,
    event: &str,
    predicates: PredicateSet,
) -> Result<FilterPattern, LookupError> {
    let pattern = compile_pattern(catalog, struct_name, event, &predicates)?;
    Ok(FilterPattern {
        struct_name: struct_name.to_string(),
        event: event.to_string(),
        predicates,
        pattern,
    })
}

/// Find the struct behind a (source, event) pair and compile its pattern.
///
/// When several structs share the source and allow the event, the
/// lexicographically first one wins and the rest are listed in
/// `also_matched`.
pub fn resolve_by_source(
    catalog: &Catalog,
    source: &str,
    event: &str,
) -> Result<SourceMatch, LookupError> {
    let candidates = structs_with_fixed_source(catalog, source);
    if candidates.is_empty() {
        return Err(LookupError::UnknownSource {
            source_value: source.to_string(),
        });
    }

    let mut chosen = None;
    let mut rest = Vec::new();
    for &candidate in &candidates {
        if chosen.is_some() {
            // the winner is fixed; later candidates only feed `also_matched`
            let allows = catalog
                .get(candidate)
                .is_some_and(|entry| entry.allowed_events.iter().any(|value| value == event));
            if allows {
                rest.push(candidate);
            }
            continue;
        }

        let (events, _) = allowed_events(catalog, candidate)?;
        if events.iter().any(|value| value == event) {
            chosen = Some(candidate);
        }
    }

    let Some(chosen) = chosen else {
        return Err(LookupError::EventNotAllowedForSource {
            event: event.to_string(),
            source_value: source.to_string(),
            candidates: candidates.iter().map(|name| name.to_string()).collect(),
        });
    };

    if !rest.is_empty() {
        warn!(
            source,
            event,
            chosen,
            others = ?rest,
            "ambiguous source lookup, using first struct by name"
        );
    }

    let pattern = compile_pattern(catalog, chosen, event, &PredicateSet::new())?;
    Ok(SourceMatch {
        source: source.to_string(),
        event: event.to_string(),
        struct_name: chosen.to_string(),
        pattern,
        also_matched: rest.iter().map(|name| name.to_string()).collect(),
    })
}

/// All structs with a fixed source and the union of their events
pub fn source_events(catalog: &Catalog, source: &str) -> Result<SourceEvents, LookupError> {
    let structs = structs_with_fixed_source(catalog, source);
    if structs.is_empty() {
        return Err(LookupError::UnknownSource {
            source_value: source.to_string(),
        });
    }

    let mut events = BTreeSet::new();
    for &name in &structs {
        let (allowed, _) = allowed_events(catalog, name)?;
        events.extend(allowed.iter().cloned());
    }

    Ok(SourceEvents {
        source: source.to_string(),
        structs: structs.into_iter().map(str::to_string).collect(),
        events: events.into_iter().collect(),
    })
}

/// Compile a pattern for every event of every struct.
///
/// Fails on the first error; structs are visited in name order so the
/// reported error is the same on every run.
pub fn enumerate_all(catalog: &Catalog) -> Result<CatalogSnapshot, LookupError> {
    let no_predicates = PredicateSet::new();
    let mut structs = BTreeMap::new();

    for name in catalog.struct_names() {
        let (events, _) = allowed_events(catalog, name)?;
        let source = fixed_source(catalog, name)?;

        let mut patterns = BTreeMap::new();
        for event in events {
            let pattern = compile_pattern(catalog, name, event, &no_predicates)?;
            patterns.insert(event.clone(), pattern);
        }

        structs.insert(
            name.to_string(),
            StructSnapshot {
                allowed_events: events.to_vec(),
                fixed_source: source.map(str::to_string),
                patterns,
            },
        );
    }

    let snapshot = CatalogSnapshot {
        structs,
        keys: catalog.keys().clone(),
    };
    debug!(
        structs = snapshot.structs.len(),
        patterns = snapshot.pattern_count(),
        "enumerated catalog"
    );
    Ok(snapshot)
}
