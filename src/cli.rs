use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Generate CloudWatch Logs filter patterns from LogStruct catalog exports
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// TOML config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory containing log-keys.json and sorbet-log-structs.json
    #[arg(short = 'd', long, env = "LOGSTRUCT_EXPORT_DIR", global = true)]
    pub export_dir: Option<PathBuf>,

    /// Output format
    #[arg(short = 'F', long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,

    /// Also write the rendered output to this file
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// When to use colors
    #[arg(long, value_enum, default_value_t = ColorMode::Auto, global = true)]
    pub color: ColorMode,

    /// Increase logging verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only print results and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show allowed events, fixed source and key aliases for a struct
    Struct {
        /// Struct name (e.g. "ActionMailer")
        #[arg(value_name = "STRUCT")]
        struct_name: String,
    },
    /// Compile a filter pattern for one struct event
    Filter {
        /// Struct name (e.g. "ActionMailer")
        #[arg(value_name = "STRUCT")]
        struct_name: String,

        /// Event value, validated against the struct
        event: String,

        /// Extra equality predicate; repeat a field to OR its values
        #[arg(short = 'w', long = "where", value_name = "FIELD:VALUE")]
        predicates: Vec<String>,
    },
    /// Resolve a fixed source and event to a struct and compile its pattern
    Pattern {
        /// Fixed source value (e.g. "mailer", "job")
        source: String,

        /// Event value
        event: String,
    },
    /// List the structs and events that share a fixed source
    Source {
        /// Fixed source value
        source: String,
    },
    /// Compile a pattern for every event of every struct
    Filters,
    /// Compare the full enumeration against a committed JSON snapshot
    Check {
        /// Snapshot file
        snapshot: PathBuf,

        /// Rewrite the snapshot instead of comparing
        #[arg(long)]
        update: bool,
    },
}

pub fn cli_parse() -> Cli {
    Cli::parse()
}
