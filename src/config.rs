//! Configuration management and validation.
//!
//! Holds the settings of one normalization run: which stage of the
//! pipeline the input belongs to, which tables statements target and how
//! output is written.

use crate::constants::{DEFAULT_SOURCE_TABLE, DEFAULT_TARGET_TABLE};
use crate::error::{Result, StrikersError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use tracing::debug;

/// Which statements the input holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputStage {
    /// Scraped `players` rows with free-form heights, weights and prices
    Raw,
    /// Already normalized `player_stats` rows
    Normalized,
}

/// Output encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// `INSERT INTO <target_table>` statements
    Sql,
    /// Header row plus one comma-separated row per record
    Csv,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Sql => write!(f, "sql"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

/// Settings for one normalization run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizerConfig {
    /// Stage of the input statements
    pub stage: InputStage,

    /// Table the input statements must insert into
    pub source_table: String,

    /// Table named in rendered SQL output
    pub target_table: String,

    /// Output encoding
    pub output_format: OutputFormat,

    /// Where dropped statements are written, if anywhere
    pub rejects_path: Option<PathBuf>,

    /// Show a progress spinner while reading
    pub show_progress: bool,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self::clean()
    }
}

impl NormalizerConfig {
    /// Raw `players` statements to `player_stats` SQL
    pub fn clean() -> Self {
        Self {
            stage: InputStage::Raw,
            source_table: DEFAULT_SOURCE_TABLE.to_string(),
            target_table: DEFAULT_TARGET_TABLE.to_string(),
            output_format: OutputFormat::Sql,
            rejects_path: None,
            show_progress: false,
        }
    }

    /// Normalized `player_stats` statements to CSV
    pub fn export() -> Self {
        Self {
            stage: InputStage::Normalized,
            source_table: DEFAULT_TARGET_TABLE.to_string(),
            target_table: DEFAULT_TARGET_TABLE.to_string(),
            output_format: OutputFormat::Csv,
            rejects_path: None,
            show_progress: false,
        }
    }

    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    pub fn with_source_table(mut self, table: impl Into<String>) -> Self {
        self.source_table = table.into();
        self
    }

    pub fn with_target_table(mut self, table: impl Into<String>) -> Self {
        self.target_table = table.into();
        self
    }

    pub fn with_rejects_path(mut self, path: Option<PathBuf>) -> Self {
        self.rejects_path = path;
        self
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<()> {
        validate_identifier("source table", &self.source_table)?;
        validate_identifier("target table", &self.target_table)?;

        debug!(
            "Configuration validated: {:?} input from '{}', {} output to '{}'",
            self.stage, self.source_table, self.output_format, self.target_table
        );
        Ok(())
    }
}

fn validate_identifier(label: &str, name: &str) -> Result<()> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    };

    if valid {
        Ok(())
    } else {
        Err(StrikersError::Configuration {
            message: format!("{} '{}' is not a valid SQL identifier", label, name),
        })
    }
}
