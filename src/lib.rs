pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod lookup;
pub mod pattern;
pub mod resolver;
pub mod snapshot;

use anyhow::{Context, bail};
use serde::Serialize;
use std::path::Path;
use tracing::info;

pub use catalog::{Catalog, CatalogError, StructCatalogEntry, load_catalog};
pub use cli::{Cli, ColorMode, Commands, OutputFormat, cli_parse};
pub use error::LookupError;
pub use lookup::{enumerate_all, filter_pattern, resolve_by_source, source_events, struct_detail};
pub use pattern::{PredicateSet, compile_pattern};
pub use resolver::{allowed_events, fixed_source, structs_with_fixed_source};
pub use snapshot::SnapshotReport;

/// Install the stderr tracing subscriber. `RUST_LOG` overrides the level
/// derived from `-v` / `-q`.
pub fn init_tracing(verbose: u8, quiet: bool) {
    use tracing_subscriber::EnvFilter;

    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, _) => "debug",
    };

    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .try_init();
}

fn apply_color_mode(mode: ColorMode) {
    match mode {
        ColorMode::Always => colored::control::set_override(true),
        ColorMode::Never => colored::control::set_override(false),
        ColorMode::Auto => {}
    }
}

fn write_output_file(path: &Path, content: &str) -> anyhow::Result<()> {
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write output file '{}'", path.display()))
}

/// Print a result in the selected format, mirroring it to `--output`
fn emit<T: Serialize>(
    cli: &Cli,
    value: &T,
    text: impl FnOnce(&T) -> String,
) -> anyhow::Result<()> {
    let rendered = match cli.format {
        OutputFormat::Text => text(value),
        OutputFormat::Json => {
            let mut json =
                serde_json::to_string_pretty(value).context("Failed to serialize output")?;
            json.push('\n');
            json
        }
    };

    print!("{rendered}");
    if let Some(path) = &cli.output {
        write_output_file(path, &rendered)?;
    }
    Ok(())
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    apply_color_mode(cli.color);

    let config = config::load_config(cli.config.as_deref())
        .context("Failed to load config")?
        .with_export_dir(cli.export_dir.as_deref());
    info!(export_dir = %config.export_dir.display(), "using export directory");

    let catalog = catalog::load_catalog_from_files(&config.keys_path(), &config.structs_path())
        .context("Failed to load log catalog")?;

    match &cli.command {
        Commands::Struct { struct_name } => {
            let detail = struct_detail(&catalog, struct_name)?;
            emit(&cli, &detail, lookup::format_struct_detail_text)?;
        }
        Commands::Filter {
            struct_name,
            event,
            predicates,
        } => {
            let predicates = PredicateSet::parse_terms(predicates.iter().map(String::as_str))
                .context("Invalid --where predicate")?;
            let filter = filter_pattern(&catalog, struct_name, event, predicates)?;
            emit(&cli, &filter, lookup::format_filter_pattern_text)?;
        }
        Commands::Pattern { source, event } => {
            let found = resolve_by_source(&catalog, source, event)?;
            emit(&cli, &found, lookup::format_source_match_text)?;
        }
        Commands::Source { source } => {
            let events = source_events(&catalog, source)?;
            emit(&cli, &events, lookup::format_source_events_text)?;
        }
        Commands::Filters => {
            let enumeration = enumerate_all(&catalog)?;
            emit(&cli, &enumeration, lookup::format_snapshot_text)?;
        }
        Commands::Check {
            snapshot: snapshot_path,
            update,
        } => {
            let location = snapshot_path.display().to_string();
            let report = if *update {
                let rendered = snapshot::render_snapshot(&enumerate_all(&catalog)?)
                    .context("Failed to serialize snapshot")?;
                write_output_file(snapshot_path, &rendered)?;
                SnapshotReport::updated(location)
            } else {
                let expected = std::fs::read_to_string(snapshot_path).with_context(|| {
                    format!("Failed to read snapshot '{}'", snapshot_path.display())
                })?;
                let check = snapshot::check_snapshot(&catalog, &expected)?;
                SnapshotReport::from_check(location, &check)
            };

            emit(&cli, &report, |report| {
                if cli.quiet && report.current {
                    String::new()
                } else {
                    snapshot::format_report_text(report)
                }
            })?;
            if !report.current {
                bail!(
                    "snapshot '{}' is out of date; rerun with --update",
                    snapshot_path.display()
                );
            }
        }
    }

    Ok(())
}
