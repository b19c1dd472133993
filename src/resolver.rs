//! Pure lookups over a [`Catalog`]
//!
//! Every function takes the catalog explicitly; nothing here caches or
//! mutates state, so a shared `&Catalog` can be queried from any thread.

use crate::catalog::{Catalog, StructCatalogEntry};
use crate::error::LookupError;

fn entry<'a>(
    catalog: &'a Catalog,
    struct_name: &str,
) -> Result<&'a StructCatalogEntry, LookupError> {
    catalog
        .get(struct_name)
        .ok_or_else(|| LookupError::UnknownStruct {
            struct_name: struct_name.to_string(),
        })
}

/// Allowed event values for a struct, and whether the event is single-valued
pub fn allowed_events<'a>(
    catalog: &'a Catalog,
    struct_name: &str,
) -> Result<(&'a [String], bool), LookupError> {
    let events = entry(catalog, struct_name)?.allowed_events.as_slice();
    if events.is_empty() {
        return Err(LookupError::NoAllowedEvents {
            struct_name: struct_name.to_string(),
        });
    }
    Ok((events, events.len() == 1))
}

/// The constant source for a struct, or `None` when its source varies
pub fn fixed_source<'a>(
    catalog: &'a Catalog,
    struct_name: &str,
) -> Result<Option<&'a str>, LookupError> {
    Ok(entry(catalog, struct_name)?.fixed_source.as_deref())
}

/// Names of the structs whose fixed source equals `source`, sorted
pub fn structs_with_fixed_source<'a>(catalog: &'a Catalog, source: &str) -> Vec<&'a str> {
    // Catalog iteration is already lexicographic.
    catalog
        .structs()
        .filter(|(_, entry)| entry.fixed_source.as_deref() == Some(source))
        .map(|(name, _)| name)
        .collect()
}
