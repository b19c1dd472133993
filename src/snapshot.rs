//! Committed catalog snapshots and drift detection

use crate::catalog::Catalog;
use crate::error::LookupError;
use crate::lookup::{CatalogSnapshot, enumerate_all};
use colored::Colorize;
use serde::Serialize;
use similar::TextDiff;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error(transparent)]
    Lookup(#[from] LookupError),
    #[error("Failed to serialize snapshot: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Outcome of comparing a committed snapshot with the current catalog
#[derive(Debug, Clone)]
pub struct SnapshotCheck {
    pub expected: String,
    pub actual: String,
}

impl SnapshotCheck {
    /// True when the snapshot matches, ignoring trailing whitespace
    pub fn is_current(&self) -> bool {
        self.expected.trim_end() == self.actual.trim_end()
    }

    /// Unified diff from the committed snapshot to the current catalog
    pub fn diff(&self) -> String {
        TextDiff::from_lines(self.expected.trim_end(), self.actual.trim_end())
            .unified_diff()
            .context_radius(2)
            .header("snapshot", "catalog")
            .to_string()
    }
}

/// Unified diff with removals red and additions green
fn colorize_diff(diff: &str) -> String {
    let mut result = String::new();
    for line in diff.lines() {
        let styled = if line.starts_with("---") || line.starts_with("+++") {
            line.bold().to_string()
        } else if line.starts_with('-') {
            line.red().to_string()
        } else if line.starts_with('+') {
            line.green().to_string()
        } else if line.starts_with("@@") {
            line.cyan().to_string()
        } else {
            line.to_string()
        };
        result.push_str(&styled);
        result.push('\n');
    }
    result
}

/// What `check` reports about one snapshot file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnapshotReport {
    pub snapshot: String,
    pub current: bool,
    pub updated: bool,
    /// Unified diff, present only when the snapshot drifted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff: Option<String>,
}

impl SnapshotReport {
    pub fn from_check(snapshot: impl Into<String>, check: &SnapshotCheck) -> Self {
        let current = check.is_current();
        Self {
            snapshot: snapshot.into(),
            current,
            updated: false,
            diff: (!current).then(|| check.diff()),
        }
    }

    pub fn updated(snapshot: impl Into<String>) -> Self {
        Self {
            snapshot: snapshot.into(),
            current: true,
            updated: true,
            diff: None,
        }
    }
}

pub fn format_report_text(report: &SnapshotReport) -> String {
    if report.updated {
        return format!("Wrote snapshot to {}\n", report.snapshot);
    }
    match &report.diff {
        Some(diff) => colorize_diff(diff),
        None => format!("{}\n", "Snapshot is up to date.".green()),
    }
}

/// Pretty JSON rendering used for committed snapshots
pub fn render_snapshot(snapshot: &CatalogSnapshot) -> Result<String, serde_json::Error> {
    let mut json = serde_json::to_string_pretty(snapshot)?;
    json.push('\n');
    Ok(json)
}

pub fn check_snapshot(catalog: &Catalog, expected: &str) -> Result<SnapshotCheck, SnapshotError> {
    let snapshot = enumerate_all(catalog)?;
    Ok(SnapshotCheck {
        expected: expected.to_string(),
        actual: render_snapshot(&snapshot)?,
    })
}
