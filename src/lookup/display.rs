use super::entities::{CatalogSnapshot, FilterPattern, SourceEvents, SourceMatch, StructDetail};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Table};
use std::collections::BTreeMap;
use std::fmt::Write as _;

const VARIABLE_SOURCE: &str = "(variable)";

pub fn create_styled_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(headers.iter().map(|h| Cell::new(h)).collect::<Vec<_>>());
    table
}

fn keys_table(keys: &BTreeMap<String, String>) -> Table {
    let mut table = create_styled_table(&["Key", "Log field"]);
    for (canonical, path) in keys {
        table.add_row(vec![Cell::new(canonical), Cell::new(path)]);
    }
    table
}

pub fn format_struct_detail_text(detail: &StructDetail) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Struct:         {}", detail.struct_name);
    let _ = writeln!(
        out,
        "Fixed source:   {}",
        detail.fixed_source.as_deref().unwrap_or(VARIABLE_SOURCE)
    );
    let _ = writeln!(
        out,
        "Event kind:     {}",
        if detail.single_valued {
            "single"
        } else {
            "enum"
        }
    );
    let _ = writeln!(out, "Allowed events: {}", detail.allowed_events.join(", "));
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", keys_table(&detail.keys));
    out
}

pub fn format_filter_pattern_text(filter: &FilterPattern) -> String {
    format!("{}\n", filter.pattern)
}

pub fn format_source_match_text(found: &SourceMatch) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Source:  {}", found.source);
    let _ = writeln!(out, "Event:   {}", found.event);
    let _ = writeln!(out, "Struct:  {}", found.struct_name);
    if !found.also_matched.is_empty() {
        let _ = writeln!(out, "Also:    {}", found.also_matched.join(", "));
    }
    let _ = writeln!(out, "Pattern: {}", found.pattern);
    out
}

pub fn format_source_events_text(events: &SourceEvents) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Source:  {}", events.source);
    let _ = writeln!(out, "Structs: {}", events.structs.join(", "));
    let _ = writeln!(out, "Events:  {}", events.events.join(", "));
    out
}

pub fn format_snapshot_text(snapshot: &CatalogSnapshot) -> String {
    let mut out = String::new();

    let mut table = create_styled_table(&["Struct", "Source", "Event", "Pattern"]);
    for (name, entry) in &snapshot.structs {
        let source = entry.fixed_source.as_deref().unwrap_or(VARIABLE_SOURCE);
        for (event, pattern) in &entry.patterns {
            table.add_row(vec![
                Cell::new(name),
                Cell::new(source),
                Cell::new(event),
                Cell::new(pattern),
            ]);
        }
    }

    let _ = writeln!(out, "{table}");
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", keys_table(&snapshot.keys));
    let _ = writeln!(
        out,
        "{} structs, {} patterns",
        snapshot.structs.len(),
        snapshot.pattern_count()
    );
    out
}
