//! Integration tests for the export stage
//!
//! Normalized `player_stats` SQL, either produced by the clean stage or
//! written by hand, is converted to CSV.

use std::fs;
use std::io::Write;
use strikers_processor::{NormalizerConfig, StatementProcessor};
use tempfile::{NamedTempFile, tempdir};

const RAW_ROWS: &str = "\
INSERT INTO players VALUES ('Bukayo Saka', 'RW', 'Arsenal', 'England', '5''10\"', '143 lbs', 'Left', 22, '35', 34, 2900, 16, 90, 40, 9, 70, 1050, '$120M - $150M', 85, 0.5, 1.24, 0.28, 2.17, 32.59, 17.78, 44.44, 0.78, 7.6, 0.8);
INSERT INTO players VALUES ('Silva, Bernardo', 'CM', 'Manchester City', 'Portugal', '173cm', '141 lbs', 'Left', 29, '33', 30, 2600, 6, 40, 15, 7, 60, 1900, '$50M', 75, 0.21, 0.52, 0.24, 2.08, 65.77, 15.0, 37.5, 0.45, 7.3, 0.7);
";

const NORMALIZED: &str = "\
INSERT INTO player_stats (
    Name, Position, Club, Nationality, HeightCm, WeightKg, PreferredFoot, Age,
    Appearances, Subs, Starts, MinutesPlayed, Goals, Shots, ShotsOnTarget, Assists,
    KeyPasses, PassesCompleted, MarketValueMin, MarketValueMax, DribblesMade, GoalsPer90, ShotsOnTargetPer90, AssistsPer90,
    KeyPassesPer90, PassesCompletedPer90, ConversionRate, ShotAccuracy, GoalInvolvementPer90
) VALUES (
    'Jude Bellingham', 'CAM', 'Real Madrid', 'England', 186.0, 75.0, 'Right', 21,
    28, 1, 27, 2300, 19, 70, 35, 6,
    45, 1200, 150000000, 180000000, 50, 0.74, 1.37, 0.23,
    1.76, 46.96, 27.14, 50.0, 0.98
);
INSERT INTO player_stats (Name) VALUES ('Too Short');
INSERT INTO player_stats (
    Name, Position, Club, Nationality, HeightCm, WeightKg, PreferredFoot, Age,
    Appearances, Subs, Starts, MinutesPlayed, Goals, Shots, ShotsOnTarget, Assists,
    KeyPasses, PassesCompleted, MarketValueMin, MarketValueMax, DribblesMade, GoalsPer90, ShotsOnTargetPer90, AssistsPer90,
    KeyPassesPer90, PassesCompletedPer90, ConversionRate, ShotAccuracy, GoalInvolvementPer90
) VALUES (
    'Bad Height', 'ST', 'Nowhere', 'Nowhere', 'tall', 75.0, 'Right', 21,
    28, 1, 27, 2300, 19, 70, 35, 6,
    45, 1200, 0, 0, 50, 0.74, 1.37, 0.23,
    1.76, 46.96, 27.14, 50.0, 0.98
);
";

fn write_input(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// Test the full two-stage pipeline
///
/// Purpose: Raw rows cleaned to SQL and then exported keep every value
/// Benefit: The rendered SQL must be readable by the export stage
#[test]
fn test_clean_then_export() {
    let input = write_input(RAW_ROWS);
    let dir = tempdir().unwrap();
    let cleaned = dir.path().join("player_stats.sql");
    let exported = dir.path().join("player_stats.csv");

    let clean_stats = StatementProcessor::new(NormalizerConfig::clean())
        .process_file(input.path(), &cleaned)
        .unwrap();
    assert_eq!(clean_stats.records_written, 2);

    let export_stats = StatementProcessor::new(NormalizerConfig::export())
        .process_file(&cleaned, &exported)
        .unwrap();
    assert_eq!(export_stats.statements_read, 2);
    assert_eq!(export_stats.records_written, 2);
    assert_eq!(export_stats.total_rejected(), 0);

    let csv = fs::read_to_string(&exported).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains(",market_value_min,market_value_max,"));
    assert!(
        lines[1].starts_with("Bukayo Saka,RW,Arsenal,England,177.8,64.86,Left,22,35,1,34,2900,16,90,40,9,70,1050,120000000,150000000,85,")
    );
    assert!(lines[2].starts_with("\"Silva, Bernardo\",CM,Manchester City,Portugal,173.0,63.96,"));
    assert!(lines[2].contains(",1900,50000000,50000000,75,"));
}

/// Test hand-written normalized SQL with malformed statements
#[test]
fn test_export_skips_bad_statements() {
    let input = write_input(NORMALIZED);
    let dir = tempdir().unwrap();
    let output = dir.path().join("out.csv");
    let rejects = dir.path().join("rejects.sql");

    let config = NormalizerConfig::export().with_rejects_path(Some(rejects.clone()));
    let stats = StatementProcessor::new(config)
        .process_file(input.path(), &output)
        .unwrap();

    assert_eq!(stats.statements_read, 3);
    assert_eq!(stats.records_written, 1);
    assert_eq!(stats.rejected.get("field_count"), Some(&1));
    assert_eq!(stats.rejected.get("invalid_required_field"), Some(&1));

    let csv = fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[1].starts_with("Jude Bellingham,CAM,Real Madrid,England,186.0,75.0,Right,21,28,1,27,"));

    let log = fs::read_to_string(&rejects).unwrap();
    assert!(log.contains("-- line 12: expected 29 values but found 1\n"));
    assert!(log.contains("-- line 13: invalid value for height_cm: 'tall'\n"));
}

/// Test that raw rows are not accepted by the export stage
#[test]
fn test_export_rejects_raw_rows() {
    let input = write_input(RAW_ROWS);
    let dir = tempdir().unwrap();
    let output = dir.path().join("out.csv");

    let stats = StatementProcessor::new(NormalizerConfig::export())
        .process_file(input.path(), &output)
        .unwrap();

    assert_eq!(stats.records_written, 0);
    assert_eq!(stats.rejected.get("not_an_insert"), Some(&2));

    let csv = fs::read_to_string(&output).unwrap();
    assert_eq!(csv.lines().count(), 1);
    assert!(csv.starts_with("name,position,club"));
}
