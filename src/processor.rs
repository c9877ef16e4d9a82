//! Batch processing of SQL dump files.
//!
//! Reads statements one at a time, normalizes each into a record and
//! hands accepted records to the configured writer. A bad statement never
//! stops the run: it is reported, optionally written to the reject log,
//! and skipped.

use crate::assembler::{assemble_player, assemble_player_stat};
use crate::config::{InputStage, NormalizerConfig};
use crate::error::{RejectReason, Result, StrikersError};
use crate::models::{PlayerStatRecord, ProcessingStats};
use crate::observer::{ParseObserver, Tee, TracingObserver};
use crate::statement::{
    Statement, StatementReader, escape_bare_heights, extract_values, targets_table,
};
use crate::tokenizer::split_sql_values;
use crate::writer::{RecordWriter, RejectLog};

use indicatif::{ProgressBar, ProgressStyle};
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Normalize one statement into a record
///
/// Checks the target table, locates the `VALUES` clause, tokenizes it and
/// assembles the record for the configured input stage.
pub fn normalize_statement(
    statement: &Statement,
    config: &NormalizerConfig,
    observer: &mut dyn ParseObserver,
) -> std::result::Result<PlayerStatRecord, RejectReason> {
    if !targets_table(&statement.text, &config.source_table) {
        return Err(RejectReason::NotAnInsert {
            expected_table: config.source_table.clone(),
        });
    }

    let text = match config.stage {
        InputStage::Raw => escape_bare_heights(&statement.text),
        InputStage::Normalized => statement.text.as_str().into(),
    };

    let Some(values) = extract_values(&text) else {
        observer.values_not_found(statement.line);
        return Err(RejectReason::MissingValues);
    };

    let tokens = split_sql_values(values);
    match config.stage {
        InputStage::Raw => assemble_player(&tokens, statement.line, observer),
        InputStage::Normalized => assemble_player_stat(&tokens, statement.line, observer),
    }
}

/// Drives whole files through the normalizer
pub struct StatementProcessor<O: ParseObserver = TracingObserver> {
    config: NormalizerConfig,
    observer: O,
}

impl StatementProcessor<TracingObserver> {
    /// Create a processor that reports through `tracing`
    pub fn new(config: NormalizerConfig) -> Self {
        Self {
            config,
            observer: TracingObserver,
        }
    }
}

impl<O: ParseObserver> StatementProcessor<O> {
    /// Replace the event observer
    pub fn with_observer<P: ParseObserver>(self, observer: P) -> StatementProcessor<P> {
        StatementProcessor {
            config: self.config,
            observer,
        }
    }

    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn into_observer(self) -> O {
        self.observer
    }

    /// Process every statement of `input_path` into `output_path`
    pub fn process_file(&mut self, input_path: &Path, output_path: &Path) -> Result<ProcessingStats> {
        let start_time = Instant::now();
        self.config.validate()?;

        if !input_path.exists() {
            return Err(StrikersError::InputNotFound {
                path: input_path.to_path_buf(),
            });
        }

        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        info!(
            "Normalizing {} -> {} ({} output)",
            input_path.display(),
            output_path.display(),
            self.config.output_format
        );

        let input = BufReader::new(File::open(input_path)?);
        let reader = match self.config.stage {
            InputStage::Raw => StatementReader::single_line(input),
            InputStage::Normalized => StatementReader::new(input),
        };
        let mut writer = RecordWriter::create(output_path, &self.config)?;
        let mut reject_log = match &self.config.rejects_path {
            Some(path) => Some(RejectLog::create(path)?),
            None => None,
        };

        let pb = if self.config.show_progress {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} [{elapsed_precise}] {pos} statements {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            pb
        } else {
            ProgressBar::hidden()
        };

        let mut stats = ProcessingStats {
            input_path: input_path.to_path_buf(),
            output_path: output_path.to_path_buf(),
            ..ProcessingStats::default()
        };

        for statement in reader {
            let statement = statement.map_err(|e| StrikersError::ProcessingFailed {
                path: input_path.to_path_buf(),
                reason: format!("Failed to read statement: {}", e),
            })?;
            stats.statements_read += 1;
            pb.inc(1);

            let mut observer = Tee::new(&mut self.observer, &mut stats);
            match normalize_statement(&statement, &self.config, &mut observer) {
                Ok(record) => {
                    observer.record_accepted(statement.line);
                    writer.write(&record)?;
                }
                Err(reason) => {
                    observer.statement_rejected(statement.line, &reason);
                    if let Some(log) = reject_log.as_mut() {
                        log.record(&statement, &reason)?;
                    }
                }
            }
        }

        stats.records_written = writer.finish()?;
        if let Some(log) = reject_log {
            let entries = log.finish()?;
            debug!("Wrote {} rejected statements to reject log", entries);
        }

        pb.finish_and_clear();
        stats.processing_time_ms = start_time.elapsed().as_millis();

        info!(
            "Wrote {} of {} statements ({} rejected, {} fields defaulted)",
            stats.records_written,
            stats.statements_read,
            stats.total_rejected(),
            stats.fields_defaulted
        );

        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::{NullObserver, ParseEvent, RecordingObserver};

    const RAW_ROW: &str = "INSERT INTO players VALUES ('Pedri', 'CM', 'Barcelona', 'Spain', '5'9\"', \
        '132 lbs', 'Right', 21, '30', 26, 2200, 4, 30, 12, 6, 50, 1600, '$80M - $100M', 40, \
        0.16, 0.49, 0.25, 2.05, 65.45, 13.3, 40.0, 0.41, 7.4, 'null');";

    fn statement(text: &str) -> Statement {
        Statement {
            text: text.to_string(),
            line: 1,
        }
    }

    #[test]
    fn test_normalize_raw_statement_with_bare_height() {
        let config = NormalizerConfig::clean();
        let record = normalize_statement(&statement(RAW_ROW), &config, &mut NullObserver).unwrap();

        assert_eq!(record.name, "Pedri");
        assert_eq!(record.height_cm, 175.26);
        assert_eq!(record.weight_kg, 59.87);
        assert_eq!(record.subs, 4);
        assert_eq!(record.market_value.max, 100_000_000);
    }

    #[test]
    fn test_normalize_rejects_other_tables() {
        let config = NormalizerConfig::clean();
        let text = RAW_ROW.replace("INTO players", "INTO teams");

        let result = normalize_statement(&statement(&text), &config, &mut NullObserver);
        assert_eq!(
            result,
            Err(RejectReason::NotAnInsert {
                expected_table: "players".to_string()
            })
        );
    }

    #[test]
    fn test_normalize_reports_missing_values() {
        let config = NormalizerConfig::clean();
        let mut observer = RecordingObserver::default();

        let result = normalize_statement(
            &statement("INSERT INTO players SELECT * FROM staging;"),
            &config,
            &mut observer,
        );

        assert_eq!(result, Err(RejectReason::MissingValues));
        assert_eq!(observer.events, vec![ParseEvent::ValuesNotFound { line: 1 }]);
    }
}
