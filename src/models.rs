//! Core data structures for statement normalization.
//!
//! Defines the typed field values produced by the parsers, the normalized
//! player record and the per-run processing statistics.

use crate::error::RejectReason;
use crate::observer::ParseObserver;
use crate::schema::PLAYER_STAT_COLUMNS;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Lower and upper bound of a player's market value, in whole currency units
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MarketValueRange {
    pub min: i64,
    pub max: i64,
}

impl MarketValueRange {
    pub fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    /// A single price reported as both bounds
    pub fn single(value: i64) -> Self {
        Self {
            min: value,
            max: value,
        }
    }
}

/// A typed value produced by a field parser
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    Text(String),
    Int(i64),
    Float(f64),
    Range(MarketValueRange),
}

/// One normalized player row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStatRecord {
    pub name: String,
    pub position: String,
    pub club: String,
    pub nationality: String,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub preferred_foot: String,
    pub age: i64,
    pub appearances: i64,
    pub subs: i64,
    pub starts: i64,
    pub minutes_played: i64,
    pub goals: i64,
    pub shots: i64,
    pub shots_on_target: i64,
    pub assists: i64,
    pub key_passes: i64,
    pub passes_completed: i64,
    pub market_value: MarketValueRange,
    pub dribbles_made: i64,
    pub goals_per_90: f64,
    pub shots_on_target_per_90: f64,
    pub assists_per_90: f64,
    pub key_passes_per_90: f64,
    pub passes_completed_per_90: f64,
    pub conversion_rate: f64,
    pub shot_accuracy: f64,
    pub goal_involvement_per_90: f64,
}

impl PlayerStatRecord {
    /// Look up one output column by its normalized name
    pub fn value(&self, column: &str) -> Option<FieldValue> {
        use FieldValue::{Float, Int, Text};

        let value = match column {
            "name" => Text(self.name.clone()),
            "position" => Text(self.position.clone()),
            "club" => Text(self.club.clone()),
            "nationality" => Text(self.nationality.clone()),
            "height_cm" => Float(self.height_cm),
            "weight_kg" => Float(self.weight_kg),
            "preferred_foot" => Text(self.preferred_foot.clone()),
            "age" => Int(self.age),
            "appearances" => Int(self.appearances),
            "subs" => Int(self.subs),
            "starts" => Int(self.starts),
            "minutes_played" => Int(self.minutes_played),
            "goals" => Int(self.goals),
            "shots" => Int(self.shots),
            "shots_on_target" => Int(self.shots_on_target),
            "assists" => Int(self.assists),
            "key_passes" => Int(self.key_passes),
            "passes_completed" => Int(self.passes_completed),
            "market_value_min" => Int(self.market_value.min),
            "market_value_max" => Int(self.market_value.max),
            "dribbles_made" => Int(self.dribbles_made),
            "goals_per_90" => Float(self.goals_per_90),
            "shots_on_target_per_90" => Float(self.shots_on_target_per_90),
            "assists_per_90" => Float(self.assists_per_90),
            "key_passes_per_90" => Float(self.key_passes_per_90),
            "passes_completed_per_90" => Float(self.passes_completed_per_90),
            "conversion_rate" => Float(self.conversion_rate),
            "shot_accuracy" => Float(self.shot_accuracy),
            "goal_involvement_per_90" => Float(self.goal_involvement_per_90),
            _ => return None,
        };

        Some(value)
    }

    /// All output values in normalized column order
    pub fn to_row(&self) -> Vec<FieldValue> {
        PLAYER_STAT_COLUMNS
            .iter()
            .filter_map(|column| self.value(column.name))
            .collect()
    }
}

/// Processing statistics for one batch run
#[derive(Debug, Default, Clone, Serialize)]
pub struct ProcessingStats {
    /// Logical statements read from the input
    pub statements_read: usize,

    /// Records written to the output
    pub records_written: usize,

    /// Statements dropped, bucketed by rejection label
    pub rejected: BTreeMap<&'static str, usize>,

    /// Soft fields that fell back to their zero value
    pub fields_defaulted: usize,

    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub processing_time_ms: u128,
}

impl ProcessingStats {
    /// Total statements dropped for any reason
    pub fn total_rejected(&self) -> usize {
        self.rejected.values().sum()
    }

    /// Calculate success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.statements_read == 0 {
            0.0
        } else {
            (self.records_written as f64 / self.statements_read as f64) * 100.0
        }
    }
}

impl ParseObserver for ProcessingStats {
    fn statement_rejected(&mut self, _line: usize, reason: &RejectReason) {
        *self.rejected.entry(reason.label()).or_insert(0) += 1;
    }

    fn field_defaulted(&mut self, _line: usize, _field: &'static str, _raw: &str) {
        self.fields_defaulted += 1;
    }
}
