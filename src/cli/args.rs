//! Command-line argument definitions for the strikers processor
//!
//! Defines the CLI interface using the clap derive API.

use crate::config::{NormalizerConfig, OutputFormat};
use crate::constants::{DEFAULT_SOURCE_TABLE, DEFAULT_TARGET_TABLE};
use crate::{Result, StrikersError};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the strikers processor
///
/// Normalizes scraped football player `INSERT` dumps into clean
/// `player_stats` SQL or CSV.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "strikers",
    version,
    about = "Normalize football player SQL dumps into clean player_stats SQL or CSV",
    long_about = "Reads SQL dumps of scraped player rows, converts heights to centimetres, \
                  weights to kilograms and market value ranges to whole-unit bounds, derives \
                  substitute appearances, and writes normalized player_stats INSERT statements \
                  or a CSV file. Malformed statements are skipped and reported."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. Overrides verbose settings and hides the progress
    /// spinner and run summary.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Normalize raw player rows into player_stats SQL or CSV
    Clean(CleanArgs),
    /// Convert normalized player_stats SQL into CSV
    Export(ExportArgs),
}

/// Output format choices for the clean command
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// INSERT statements for the target table
    Sql,
    /// Comma-separated values with a header row
    Csv,
}

impl From<FormatArg> for OutputFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Sql => OutputFormat::Sql,
            FormatArg::Csv => OutputFormat::Csv,
        }
    }
}

/// Arguments for the clean command
#[derive(Debug, Clone, Parser)]
pub struct CleanArgs {
    /// SQL dump of raw player rows
    #[arg(value_name = "INPUT")]
    pub input_path: PathBuf,

    /// Destination file, created or overwritten
    #[arg(value_name = "OUTPUT")]
    pub output_path: PathBuf,

    #[arg(
        short = 'f',
        long = "format",
        value_enum,
        default_value = "sql",
        help = "Output format"
    )]
    pub format: FormatArg,

    #[arg(
        long = "source-table",
        value_name = "NAME",
        default_value = DEFAULT_SOURCE_TABLE,
        help = "Table the input statements insert into"
    )]
    pub source_table: String,

    #[arg(
        long = "target-table",
        value_name = "NAME",
        default_value = DEFAULT_TARGET_TABLE,
        help = "Table named in the generated SQL"
    )]
    pub target_table: String,

    /// Write skipped statements here with the reason they were dropped
    #[arg(long = "rejects", value_name = "FILE")]
    pub rejects_path: Option<PathBuf>,
}

/// Arguments for the export command
#[derive(Debug, Clone, Parser)]
pub struct ExportArgs {
    /// SQL file of normalized player_stats statements
    #[arg(value_name = "INPUT")]
    pub input_path: PathBuf,

    /// Destination CSV file, created or overwritten
    #[arg(value_name = "OUTPUT")]
    pub output_path: PathBuf,

    #[arg(
        long = "table",
        value_name = "NAME",
        default_value = DEFAULT_TARGET_TABLE,
        help = "Table the input statements insert into"
    )]
    pub table: String,

    /// Write skipped statements here with the reason they were dropped
    #[arg(long = "rejects", value_name = "FILE")]
    pub rejects_path: Option<PathBuf>,
}

impl Args {
    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress and the summary (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }

    pub fn input_path(&self) -> &PathBuf {
        match &self.command {
            Commands::Clean(args) => &args.input_path,
            Commands::Export(args) => &args.input_path,
        }
    }

    /// Build the run configuration for the selected command
    pub fn to_config(&self) -> Result<NormalizerConfig> {
        let config = match &self.command {
            Commands::Clean(args) => NormalizerConfig::clean()
                .with_output_format(args.format.into())
                .with_source_table(&args.source_table)
                .with_target_table(&args.target_table)
                .with_rejects_path(args.rejects_path.clone()),
            Commands::Export(args) => NormalizerConfig::export()
                .with_source_table(&args.table)
                .with_target_table(&args.table)
                .with_rejects_path(args.rejects_path.clone()),
        }
        .with_progress(self.show_progress());

        if let Some(rejects) = &config.rejects_path {
            let output = match &self.command {
                Commands::Clean(args) => &args.output_path,
                Commands::Export(args) => &args.output_path,
            };
            if rejects == output || rejects == self.input_path() {
                return Err(StrikersError::Configuration {
                    message: format!(
                        "Reject log '{}' would overwrite the input or output file",
                        rejects.display()
                    ),
                });
            }
        }

        config.validate()?;
        Ok(config)
    }
}
