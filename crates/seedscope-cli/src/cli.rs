//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use seedscope_core::{Criteria, SortKey};
use seedscope_ingest::SourceFormat;
use seedscope_model::{EvidenceQuality, StressTolerance, StressType};

#[derive(Parser)]
#[command(
    name = "seedscope",
    version,
    about = "Explore seed variety catalogs from the terminal",
    long_about = "Explore a precompiled seed variety catalog (JSON or CSV).\n\n\
                  Filter by crop, state, stress tolerance, evidence quality and\n\
                  stress type; sort and page through the result; inspect the\n\
                  official registry and research evidence behind each variety."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format.
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Append logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Configuration file (default: the platform config directory).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show one page of the filtered, sorted catalog.
    Browse(BrowseArgs),

    /// Show the detail view of one variety.
    Show(ShowArgs),

    /// Write the filtered catalog as CSV.
    Export(ExportArgs),

    /// List the values available for each filter.
    Vocab(VocabArgs),

    /// Headline counts for the filtered catalog.
    Stats(StatsArgs),

    /// Print the effective configuration and where it came from.
    Config,
}

#[derive(Args)]
pub struct SourceArgs {
    /// Catalog file (.json or .csv).
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Source format (overrides detection by extension).
    #[arg(long = "format", value_name = "FORMAT")]
    pub format: Option<SourceFormat>,

    /// Reject sources larger than this many megabytes.
    #[arg(long = "max-file-size-mb", value_name = "MB", value_parser = clap::value_parser!(u64).range(1..))]
    pub max_file_size_mb: Option<u64>,
}

#[derive(Args)]
pub struct FilterArgs {
    /// Case-insensitive text search.
    #[arg(long = "query", value_name = "TEXT")]
    pub query: Option<String>,

    /// Crop to include (repeatable).
    #[arg(long = "crop", value_name = "CROP")]
    pub crops: Vec<String>,

    /// State name or two-letter code (repeatable).
    #[arg(long = "state", value_name = "STATE")]
    pub states: Vec<String>,

    /// Stress tolerance flag: yes or no (repeatable).
    #[arg(long = "stress", value_name = "YES|NO")]
    pub tolerance: Vec<StressTolerance>,

    /// Evidence quality: low, medium or high (repeatable).
    #[arg(long = "evidence", value_name = "LEVEL")]
    pub evidence: Vec<EvidenceQuality>,

    /// Stress type, e.g. drought or salinity (repeatable).
    #[arg(long = "stress-type", value_name = "TYPE")]
    pub stress_types: Vec<StressType>,
}

impl FilterArgs {
    pub fn criteria(&self) -> Criteria {
        let mut criteria = Criteria::new();
        if let Some(query) = &self.query {
            criteria.set_query(query.as_str());
        }
        let criteria = self
            .crops
            .iter()
            .fold(criteria, |c, crop| c.with_crop(crop.trim()));
        let criteria = self.states.iter().fold(criteria, |c, state| c.with_state(state));
        let criteria = self
            .tolerance
            .iter()
            .fold(criteria, |c, tolerance| c.with_tolerance(*tolerance));
        let criteria = self
            .evidence
            .iter()
            .fold(criteria, |c, evidence| c.with_evidence(*evidence));
        self.stress_types
            .iter()
            .fold(criteria, |c, stress| c.with_stress_type(*stress))
    }
}

#[derive(Args)]
pub struct SortArgs {
    /// Sort column: crop, variety, year, stress, attributes, states, seasons, maturity, evidence.
    #[arg(long = "sort", value_name = "KEY")]
    pub sort: Option<SortKey>,

    /// Sort descending.
    #[arg(long = "desc")]
    pub descending: bool,
}

#[derive(Args)]
pub struct BrowseArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub filters: FilterArgs,

    #[command(flatten)]
    pub sort: SortArgs,

    /// Page to show (1-based; out-of-range pages clamp).
    #[arg(long = "page", value_name = "N", default_value_t = 1)]
    pub page: usize,

    /// Rows per page.
    #[arg(long = "page-size", value_name = "N", value_parser = clap::value_parser!(u64).range(1..))]
    pub page_size: Option<u64>,

    /// Print the page as JSON.
    #[arg(long = "json", conflicts_with = "interactive")]
    pub json: bool,

    /// Read browsing commands from stdin (type 'help').
    #[arg(long = "interactive", short = 'i')]
    pub interactive: bool,
}

#[derive(Args)]
pub struct ShowArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Variety id as listed by `browse`.
    #[arg(value_name = "ID")]
    pub id: String,

    /// Print the detail view as JSON.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub filters: FilterArgs,

    #[command(flatten)]
    pub sort: SortArgs,

    /// Output file (default: stdout).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct VocabArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Only list values from varieties grown in these states (repeatable).
    #[arg(long = "within-state", value_name = "STATE")]
    pub within_states: Vec<String>,

    /// Print as JSON.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args)]
pub struct StatsArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub filters: FilterArgs,

    /// Print as JSON.
    #[arg(long = "json")]
    pub json: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
