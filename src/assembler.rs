//! Record assembly and SQL rendering.
//!
//! Turns a tokenized value list into a [`PlayerStatRecord`] by running each
//! token through the parser its schema entry names, then renders records
//! back to `INSERT` statements.

use crate::constants::EXPECTED_FIELD_COUNT;
use crate::error::RejectReason;
use crate::models::{FieldValue, MarketValueRange, PlayerStatRecord};
use crate::observer::ParseObserver;
use crate::schema::{FieldOutcome, FieldSpec, PLAYER_FIELDS, PLAYER_STAT_COLUMNS, player_stat_fields};

/// Values per line in rendered column and value lists
const SQL_ITEMS_PER_LINE: usize = 8;

/// Typed values of one statement, addressed by schema name
///
/// Names missing from the schema read as the zero value of the
/// requested type.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedFields {
    values: Vec<(&'static str, FieldValue)>,
}

impl ParsedFields {
    fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| value)
    }

    pub fn text(&self, name: &str) -> String {
        match self.get(name) {
            Some(FieldValue::Text(text)) => text.clone(),
            _ => String::new(),
        }
    }

    pub fn int(&self, name: &str) -> i64 {
        match self.get(name) {
            Some(FieldValue::Int(value)) => *value,
            _ => 0,
        }
    }

    pub fn float(&self, name: &str) -> f64 {
        match self.get(name) {
            Some(FieldValue::Float(value)) => *value,
            _ => 0.0,
        }
    }

    pub fn range(&self, name: &str) -> MarketValueRange {
        match self.get(name) {
            Some(FieldValue::Range(range)) => *range,
            _ => MarketValueRange::default(),
        }
    }
}

/// Parse every token with its schema entry
///
/// Rejects on a count mismatch or the first required field that does not
/// parse. Soft failures are reported to the observer and kept as zero.
pub fn parse_fields(
    tokens: &[String],
    schema: &[FieldSpec],
    line: usize,
    observer: &mut dyn ParseObserver,
) -> Result<ParsedFields, RejectReason> {
    if tokens.len() != schema.len() {
        observer.field_count_mismatch(line, schema.len(), tokens.len());
        return Err(RejectReason::FieldCount {
            expected: schema.len(),
            found: tokens.len(),
        });
    }

    let mut values = Vec::with_capacity(schema.len());

    for (spec, raw) in schema.iter().zip(tokens) {
        match spec.kind.parse(raw) {
            FieldOutcome::Parsed(value) => values.push((spec.name, value)),
            FieldOutcome::Defaulted(value) => {
                observer.field_defaulted(line, spec.name, raw);
                values.push((spec.name, value));
            }
            FieldOutcome::Invalid => {
                observer.required_field_invalid(line, spec.name, raw);
                return Err(RejectReason::InvalidRequiredField {
                    field: spec.name,
                    value: raw.clone(),
                });
            }
        }
    }

    Ok(ParsedFields { values })
}

/// Assemble a record from the tokens of a raw `players` statement
pub fn assemble_player(
    tokens: &[String],
    line: usize,
    observer: &mut dyn ParseObserver,
) -> Result<PlayerStatRecord, RejectReason> {
    debug_assert_eq!(PLAYER_FIELDS.len(), EXPECTED_FIELD_COUNT);
    let fields = parse_fields(tokens, &PLAYER_FIELDS, line, observer)?;

    let appearances = fields.int("appearances");
    let starts = fields.int("starts");

    Ok(PlayerStatRecord {
        name: fields.text("name"),
        position: fields.text("position"),
        club: fields.text("club"),
        nationality: fields.text("nationality"),
        height_cm: fields.float("height"),
        weight_kg: fields.float("weight"),
        preferred_foot: fields.text("preferred_foot"),
        age: fields.int("age"),
        appearances,
        subs: appearances.saturating_sub(starts),
        starts,
        minutes_played: fields.int("minutes_played"),
        goals: fields.int("goals"),
        shots: fields.int("shots"),
        shots_on_target: fields.int("shots_on_target"),
        assists: fields.int("assists"),
        key_passes: fields.int("key_passes"),
        passes_completed: fields.int("passes_completed"),
        market_value: fields.range("market_value"),
        dribbles_made: fields.int("dribbles_made"),
        goals_per_90: fields.float("goals_per_90"),
        shots_on_target_per_90: fields.float("shots_on_target_per_90"),
        assists_per_90: fields.float("assists_per_90"),
        key_passes_per_90: fields.float("key_passes_per_90"),
        passes_completed_per_90: fields.float("passes_completed_per_90"),
        conversion_rate: fields.float("conversion_rate"),
        shot_accuracy: fields.float("shot_accuracy"),
        goal_involvement_per_90: fields.float("goal_involvement_per_90"),
    })
}

/// Assemble a record from the tokens of a normalized `player_stats` statement
///
/// Every numeric column is strict here; `subs` is read, not derived.
pub fn assemble_player_stat(
    tokens: &[String],
    line: usize,
    observer: &mut dyn ParseObserver,
) -> Result<PlayerStatRecord, RejectReason> {
    let schema = player_stat_fields();
    let fields = parse_fields(tokens, &schema, line, observer)?;

    Ok(PlayerStatRecord {
        name: fields.text("name"),
        position: fields.text("position"),
        club: fields.text("club"),
        nationality: fields.text("nationality"),
        height_cm: fields.float("height_cm"),
        weight_kg: fields.float("weight_kg"),
        preferred_foot: fields.text("preferred_foot"),
        age: fields.int("age"),
        appearances: fields.int("appearances"),
        subs: fields.int("subs"),
        starts: fields.int("starts"),
        minutes_played: fields.int("minutes_played"),
        goals: fields.int("goals"),
        shots: fields.int("shots"),
        shots_on_target: fields.int("shots_on_target"),
        assists: fields.int("assists"),
        key_passes: fields.int("key_passes"),
        passes_completed: fields.int("passes_completed"),
        market_value: MarketValueRange::new(
            fields.int("market_value_min"),
            fields.int("market_value_max"),
        ),
        dribbles_made: fields.int("dribbles_made"),
        goals_per_90: fields.float("goals_per_90"),
        shots_on_target_per_90: fields.float("shots_on_target_per_90"),
        assists_per_90: fields.float("assists_per_90"),
        key_passes_per_90: fields.float("key_passes_per_90"),
        passes_completed_per_90: fields.float("passes_completed_per_90"),
        conversion_rate: fields.float("conversion_rate"),
        shot_accuracy: fields.float("shot_accuracy"),
        goal_involvement_per_90: fields.float("goal_involvement_per_90"),
    })
}

/// Format a float so it always reads back as a float (`180.0`, not `180`)
pub fn format_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

/// Render one value as a SQL literal
pub fn sql_literal(value: &FieldValue) -> String {
    match value {
        FieldValue::Text(text) => format!("'{}'", text.replace('\'', "''")),
        FieldValue::Int(value) => value.to_string(),
        FieldValue::Float(value) => format_float(*value),
        FieldValue::Range(range) => format!("{}, {}", range.min, range.max),
    }
}

fn wrap_list(items: &[String]) -> String {
    items
        .chunks(SQL_ITEMS_PER_LINE)
        .map(|chunk| format!("    {}", chunk.join(", ")))
        .collect::<Vec<_>>()
        .join(",\n")
}

/// Render a record as a multi-line `INSERT` statement
pub fn render_insert(record: &PlayerStatRecord, table: &str) -> String {
    let columns: Vec<String> = PLAYER_STAT_COLUMNS
        .iter()
        .map(|column| column.sql_name.to_string())
        .collect();
    let values: Vec<String> = record.to_row().iter().map(sql_literal).collect();

    format!(
        "INSERT INTO {} (\n{}\n) VALUES (\n{}\n);",
        table,
        wrap_list(&columns),
        wrap_list(&values)
    )
}
