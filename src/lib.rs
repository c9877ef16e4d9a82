//! Strikers Processor Library
//!
//! Normalizes SQL dumps of scraped football player rows into clean
//! `player_stats` records.
//!
//! This library provides tools for:
//! - Grouping dump lines into `INSERT` statements and extracting their values
//! - Quote-aware tokenizing of SQL value lists
//! - Parsing free-form heights, weights, market values and numeric fields
//! - Assembling fixed-schema records and rendering them as SQL or CSV
//! - Skipping malformed statements without stopping the run

pub mod assembler;
pub mod config;
pub mod constants;
pub mod error;
pub mod field_parsers;
pub mod models;
pub mod observer;
pub mod processor;
pub mod schema;
pub mod statement;
pub mod tokenizer;
pub mod writer;

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use config::{InputStage, NormalizerConfig, OutputFormat};
pub use error::{RejectReason, Result, StrikersError};
pub use models::{MarketValueRange, PlayerStatRecord, ProcessingStats};
pub use observer::{ParseObserver, TracingObserver};
pub use processor::{StatementProcessor, normalize_statement};
