//! CLI argument definitions for the survey cleaner.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "survey-clean",
    version,
    about = "Health survey cleaner - impute missing values, normalize dates, derive remarks",
    long_about = "Clean a comma-delimited health survey dataset row by row.\n\n\
                  Missing numeric values are replaced by the column mean, dates are\n\
                  normalized to YYYY-MM-DD, and a Remarks column is appended."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// When to colorize tables and log output.
    #[command(flatten)]
    pub color: Color,

    /// Fixed log level; takes precedence over -v/-q and `RUST_LOG`.
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log line format.
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Append logs to this file rather than stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Include survey values in log messages (redacted by default).
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Clean a dataset and write the result with a Remarks column.
    Clean(CleanArgs),

    /// Profile column types and means without cleaning.
    Profile(ProfileArgs),
}

#[derive(Parser, Debug, Default)]
pub struct CleanArgs {
    /// TOML pipeline configuration file.
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Input CSV (overrides `input` in the config file).
    #[arg(long = "input", value_name = "CSV")]
    pub input: Option<PathBuf>,

    /// Output CSV (overrides `output` in the config file).
    #[arg(long = "output", value_name = "CSV")]
    pub output: Option<PathBuf>,

    /// Reuse a profile saved by `survey-clean profile --output`.
    #[arg(long = "profile", value_name = "JSON")]
    pub profile: Option<PathBuf>,

    /// Name of the date column to normalize.
    #[arg(long = "date-column", value_name = "NAME")]
    pub date_column: Option<String>,

    /// Name of the appended remarks column.
    #[arg(long = "remarks-column", value_name = "NAME")]
    pub remarks_column: Option<String>,

    /// Worker threads for row processing (0 = one per CPU).
    #[arg(long = "jobs", short = 'j', value_name = "N")]
    pub jobs: Option<usize>,

    /// Drop rows that fail unexpectedly instead of aborting the run.
    #[arg(long = "skip-failed-rows")]
    pub skip_failed_rows: bool,

    /// Process and report without writing the output file.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Print the run summary as JSON.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser, Debug, Default)]
pub struct ProfileArgs {
    /// Input CSV to profile.
    #[arg(value_name = "CSV")]
    pub input: PathBuf,

    /// TOML pipeline configuration file (for missing-value tokens).
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Save the profile as JSON for later `clean --profile` runs.
    #[arg(long = "output", value_name = "JSON")]
    pub output: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
