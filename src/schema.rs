//! Ordered field schemas for the raw and normalized statements.
//!
//! Token positions live here and nowhere else: the assembler reads values
//! by name, so adding or reordering a field is a change to one table.

use crate::field_parsers::{
    try_parse_appearances, try_parse_height, try_parse_market_value, try_parse_safe_number,
    try_parse_weight,
};
use crate::models::{FieldValue, MarketValueRange};

/// How a raw token is turned into a typed value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Text with enclosing single quotes removed
    Text,
    /// Feet/inches or centimetres, soft fallback `0.0`
    Height,
    /// Pounds, soft fallback `0.0`
    Weight,
    /// Leading digits, soft fallback `0`
    Appearances,
    /// Price or price range, soft fallback `(0, 0)`
    MarketValue,
    /// Lenient float, soft fallback `0.0`
    SafeNumber,
    /// Integer that rejects the record when unparseable
    RequiredInt,
    /// Float that rejects the record when unparseable
    RequiredFloat,
}

/// Result of parsing one token
#[derive(Debug, Clone, PartialEq)]
pub enum FieldOutcome {
    Parsed(FieldValue),
    /// Unrecognised soft field replaced by its zero value
    Defaulted(FieldValue),
    /// Required field that did not parse
    Invalid,
}

impl FieldKind {
    /// True when a parse failure rejects the whole record
    pub fn is_required(self) -> bool {
        matches!(self, FieldKind::RequiredInt | FieldKind::RequiredFloat)
    }

    /// Parse a raw token according to this kind
    pub fn parse(self, raw: &str) -> FieldOutcome {
        let raw = strip_enclosing_quotes(raw);

        let soft = |value: Option<FieldValue>, fallback: FieldValue| match value {
            Some(value) => FieldOutcome::Parsed(value),
            None => FieldOutcome::Defaulted(fallback),
        };
        let required = |value: Option<FieldValue>| match value {
            Some(value) => FieldOutcome::Parsed(value),
            None => FieldOutcome::Invalid,
        };

        match self {
            FieldKind::Text => FieldOutcome::Parsed(FieldValue::Text(raw.to_string())),
            FieldKind::Height => soft(
                try_parse_height(raw).map(FieldValue::Float),
                FieldValue::Float(0.0),
            ),
            FieldKind::Weight => soft(
                try_parse_weight(raw).map(FieldValue::Float),
                FieldValue::Float(0.0),
            ),
            FieldKind::Appearances => soft(
                try_parse_appearances(raw).map(FieldValue::Int),
                FieldValue::Int(0),
            ),
            FieldKind::MarketValue => soft(
                try_parse_market_value(raw).map(FieldValue::Range),
                FieldValue::Range(MarketValueRange::default()),
            ),
            FieldKind::SafeNumber => soft(
                try_parse_safe_number(raw).map(FieldValue::Float),
                FieldValue::Float(0.0),
            ),
            FieldKind::RequiredInt => required(raw.trim().parse::<i64>().ok().map(FieldValue::Int)),
            FieldKind::RequiredFloat => {
                required(
                    raw.trim()
                        .parse::<f64>()
                        .ok()
                        .filter(|value| value.is_finite())
                        .map(FieldValue::Float),
                )
            }
        }
    }
}

/// Remove single quotes from both ends of a token
pub fn strip_enclosing_quotes(raw: &str) -> &str {
    raw.trim_matches('\'')
}

/// One position in a raw statement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
}

const fn field(name: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec { name, kind }
}

/// One column of the normalized `player_stats` table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatColumn {
    /// Snake case name, used for CSV headers and record lookup
    pub name: &'static str,
    /// Column name in rendered SQL
    pub sql_name: &'static str,
    /// Kind used when reading normalized SQL back
    pub kind: FieldKind,
}

const fn column(name: &'static str, sql_name: &'static str, kind: FieldKind) -> StatColumn {
    StatColumn {
        name,
        sql_name,
        kind,
    }
}

/// Token order of the scraped `players` statements
pub const PLAYER_FIELDS: [FieldSpec; 29] = [
    field("name", FieldKind::Text),
    field("position", FieldKind::Text),
    field("club", FieldKind::Text),
    field("nationality", FieldKind::Text),
    field("height", FieldKind::Height),
    field("weight", FieldKind::Weight),
    field("preferred_foot", FieldKind::Text),
    field("age", FieldKind::RequiredInt),
    field("appearances", FieldKind::Appearances),
    field("starts", FieldKind::RequiredInt),
    field("minutes_played", FieldKind::RequiredInt),
    field("goals", FieldKind::RequiredInt),
    field("shots", FieldKind::RequiredInt),
    field("shots_on_target", FieldKind::RequiredInt),
    field("assists", FieldKind::RequiredInt),
    field("key_passes", FieldKind::RequiredInt),
    field("passes_completed", FieldKind::RequiredInt),
    field("market_value", FieldKind::MarketValue),
    field("dribbles_made", FieldKind::RequiredInt),
    field("goals_per_90", FieldKind::SafeNumber),
    field("shots_on_target_per_90", FieldKind::SafeNumber),
    field("assists_per_90", FieldKind::SafeNumber),
    field("key_passes_per_90", FieldKind::SafeNumber),
    field("passes_completed_per_90", FieldKind::SafeNumber),
    field("conversion_rate", FieldKind::SafeNumber),
    field("shot_accuracy", FieldKind::SafeNumber),
    field("goal_involvement_per_90", FieldKind::SafeNumber),
    // Parsed for validation but not carried into player_stats
    field("rating", FieldKind::SafeNumber),
    field("normalized_rating", FieldKind::SafeNumber),
];

/// Column order of the normalized `player_stats` table
pub const PLAYER_STAT_COLUMNS: [StatColumn; 29] = [
    column("name", "Name", FieldKind::Text),
    column("position", "Position", FieldKind::Text),
    column("club", "Club", FieldKind::Text),
    column("nationality", "Nationality", FieldKind::Text),
    column("height_cm", "HeightCm", FieldKind::RequiredFloat),
    column("weight_kg", "WeightKg", FieldKind::RequiredFloat),
    column("preferred_foot", "PreferredFoot", FieldKind::Text),
    column("age", "Age", FieldKind::RequiredInt),
    column("appearances", "Appearances", FieldKind::RequiredInt),
    column("subs", "Subs", FieldKind::RequiredInt),
    column("starts", "Starts", FieldKind::RequiredInt),
    column("minutes_played", "MinutesPlayed", FieldKind::RequiredInt),
    column("goals", "Goals", FieldKind::RequiredInt),
    column("shots", "Shots", FieldKind::RequiredInt),
    column("shots_on_target", "ShotsOnTarget", FieldKind::RequiredInt),
    column("assists", "Assists", FieldKind::RequiredInt),
    column("key_passes", "KeyPasses", FieldKind::RequiredInt),
    column("passes_completed", "PassesCompleted", FieldKind::RequiredInt),
    column("market_value_min", "MarketValueMin", FieldKind::RequiredInt),
    column("market_value_max", "MarketValueMax", FieldKind::RequiredInt),
    column("dribbles_made", "DribblesMade", FieldKind::RequiredInt),
    column("goals_per_90", "GoalsPer90", FieldKind::RequiredFloat),
    column(
        "shots_on_target_per_90",
        "ShotsOnTargetPer90",
        FieldKind::RequiredFloat,
    ),
    column("assists_per_90", "AssistsPer90", FieldKind::RequiredFloat),
    column("key_passes_per_90", "KeyPassesPer90", FieldKind::RequiredFloat),
    column(
        "passes_completed_per_90",
        "PassesCompletedPer90",
        FieldKind::RequiredFloat,
    ),
    column("conversion_rate", "ConversionRate", FieldKind::RequiredFloat),
    column("shot_accuracy", "ShotAccuracy", FieldKind::RequiredFloat),
    column(
        "goal_involvement_per_90",
        "GoalInvolvementPer90",
        FieldKind::RequiredFloat,
    ),
];

/// Normalized columns viewed as an input schema
pub fn player_stat_fields() -> Vec<FieldSpec> {
    PLAYER_STAT_COLUMNS
        .iter()
        .map(|column| field(column.name, column.kind))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_schema_names_are_unique() {
        let raw: HashSet<_> = PLAYER_FIELDS.iter().map(|f| f.name).collect();
        assert_eq!(raw.len(), PLAYER_FIELDS.len());

        let normalized: HashSet<_> = PLAYER_STAT_COLUMNS.iter().map(|c| c.name).collect();
        assert_eq!(normalized.len(), PLAYER_STAT_COLUMNS.len());
    }

    #[test]
    fn test_required_fields_match_integer_columns() {
        let required: Vec<_> = PLAYER_FIELDS
            .iter()
            .filter(|f| f.kind.is_required())
            .map(|f| f.name)
            .collect();

        assert_eq!(
            required,
            vec![
                "age",
                "starts",
                "minutes_played",
                "goals",
                "shots",
                "shots_on_target",
                "assists",
                "key_passes",
                "passes_completed",
                "dribbles_made",
            ]
        );
    }

    #[test]
    fn test_parse_outcomes() {
        assert_eq!(
            FieldKind::Text.parse("'Porto'"),
            FieldOutcome::Parsed(FieldValue::Text("Porto".to_string()))
        );
        assert_eq!(
            FieldKind::Height.parse("'tall'"),
            FieldOutcome::Defaulted(FieldValue::Float(0.0))
        );
        assert_eq!(
            FieldKind::RequiredInt.parse("12"),
            FieldOutcome::Parsed(FieldValue::Int(12))
        );
        assert_eq!(FieldKind::RequiredInt.parse("12.5"), FieldOutcome::Invalid);
        assert_eq!(FieldKind::RequiredFloat.parse("x"), FieldOutcome::Invalid);
    }

    #[test]
    fn test_market_value_outcome() {
        assert_eq!(
            FieldKind::MarketValue.parse("$500K"),
            FieldOutcome::Parsed(FieldValue::Range(MarketValueRange::new(500_000, 500_000)))
        );
    }
}
