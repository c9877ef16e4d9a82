//! Error handling for statement normalization runs.
//!
//! File-level failures (I/O, CSV serialization, bad configuration) are
//! errors. Problems with a single statement are not: they are reported as
//! a [`RejectReason`] and the run moves on to the next statement.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StrikersError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Input file not found: {path}")]
    InputNotFound { path: PathBuf },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Processing failed for file: {path} - {reason}")]
    ProcessingFailed { path: PathBuf, reason: String },
}

pub type Result<T> = std::result::Result<T, StrikersError>;

/// Why a whole statement was dropped from the output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    /// Statement does not start with `INSERT INTO <table>`
    NotAnInsert { expected_table: String },

    /// No `VALUES (...);` clause could be located
    MissingValues,

    /// Tokenizer produced the wrong number of values
    FieldCount { expected: usize, found: usize },

    /// A field that must hold a number did not parse
    InvalidRequiredField { field: &'static str, value: String },
}

impl RejectReason {
    /// Short stable label used as a statistics bucket
    pub fn label(&self) -> &'static str {
        match self {
            RejectReason::NotAnInsert { .. } => "not_an_insert",
            RejectReason::MissingValues => "missing_values",
            RejectReason::FieldCount { .. } => "field_count",
            RejectReason::InvalidRequiredField { .. } => "invalid_required_field",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::NotAnInsert { expected_table } => {
                write!(f, "not an INSERT INTO {} statement", expected_table)
            }
            RejectReason::MissingValues => write!(f, "no VALUES (...); clause found"),
            RejectReason::FieldCount { expected, found } => {
                write!(f, "expected {} values but found {}", expected, found)
            }
            RejectReason::InvalidRequiredField { field, value } => {
                write!(f, "invalid value for {}: '{}'", field, value)
            }
        }
    }
}
