use super::predicates::PredicateSet;
use crate::catalog::Catalog;
use crate::error::LookupError;
use crate::resolver::{allowed_events, fixed_source};
use tracing::debug;

/// Canonical key naming the event field
pub const EVENT_KEY: &str = "event";
/// Canonical key naming the source field
pub const SOURCE_KEY: &str = "source";

/// Compile a CloudWatch Logs filter pattern for one struct event.
///
/// Clause order is fixed: event, then the fixed source (if any), then
/// predicate fields sorted by name. Identical inputs always produce the
/// same string.
pub fn compile_pattern(
    catalog: &Catalog,
    struct_name: &str,
    event: &str,
    predicates: &PredicateSet,
) -> Result<String, LookupError> {
    let (allowed, _) = allowed_events(catalog, struct_name)?;
    if !allowed.iter().any(|value| value == event) {
        return Err(LookupError::EventNotAllowed {
            event: event.to_string(),
            struct_name: struct_name.to_string(),
            allowed: allowed.to_vec(),
        });
    }

    let mut clauses = Vec::with_capacity(2 + predicates.len());

    // Catalog enum literals are inserted verbatim.
    let event_path = key_path(catalog, EVENT_KEY)?;
    clauses.push(equals(&event_path, event));

    if let Some(source) = fixed_source(catalog, struct_name)? {
        let source_path = key_path(catalog, SOURCE_KEY)?;
        clauses.push(equals(&source_path, source));
    }

    for (field, values) in predicates.iter() {
        let path = format!("$.{}", field);
        match values {
            [] => continue,
            [value] => clauses.push(equals(&path, &escape(value))),
            values => {
                let alternatives: Vec<String> = values
                    .iter()
                    .map(|value| equals(&path, &escape(value)))
                    .collect();
                clauses.push(format!("({})", alternatives.join(" || ")));
            }
        }
    }

    let pattern = join_clauses(&clauses);
    debug!(struct_name, event, %pattern, "compiled filter pattern");
    Ok(pattern)
}

fn key_path(catalog: &Catalog, canonical: &str) -> Result<String, LookupError> {
    catalog
        .key_alias(canonical)
        .map(|alias| format!("$.{}", alias))
        .ok_or_else(|| LookupError::MissingKeyAlias {
            key: canonical.to_string(),
        })
}

fn equals(path: &str, literal: &str) -> String {
    format!("{} = \"{}\"", path, literal)
}

/// Escape embedded double quotes; nothing else is escaped
pub fn escape(value: &str) -> String {
    value.replace('"', "\\\"")
}

fn join_clauses(clauses: &[String]) -> String {
    if clauses.is_empty() {
        "{ }".to_string()
    } else {
        format!("{{ {} }}", clauses.join(" && "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_only_touches_quotes() {
        assert_eq!(escape(r#"He said "hi""#), r#"He said \"hi\""#);
        assert_eq!(escape(r"C:\tmp {x}"), r"C:\tmp {x}");
    }

    #[test]
    fn test_join_clauses() {
        assert_eq!(join_clauses(&[]), "{ }");
        assert_eq!(
            join_clauses(&["a".to_string(), "b".to_string()]),
            "{ a && b }"
        );
    }
}
