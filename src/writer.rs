//! Output writers for normalized records.
//!
//! SQL output is streamed statement by statement. CSV output is collected
//! into a polars `DataFrame` and written once with `CsvWriter`, which
//! quotes any value holding a delimiter.

use crate::assembler::render_insert;
use crate::config::{NormalizerConfig, OutputFormat};
use crate::error::{RejectReason, Result};
use crate::models::{FieldValue, PlayerStatRecord};
use crate::schema::{FieldKind, PLAYER_STAT_COLUMNS};
use crate::statement::Statement;
use polars::prelude::*;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// Writes one `INSERT` statement per record
pub struct SqlWriter {
    out: BufWriter<File>,
    table: String,
    written: usize,
}

impl SqlWriter {
    pub fn create(path: &Path, table: impl Into<String>) -> Result<Self> {
        Ok(Self {
            out: BufWriter::new(File::create(path)?),
            table: table.into(),
            written: 0,
        })
    }

    pub fn write(&mut self, record: &PlayerStatRecord) -> Result<()> {
        writeln!(self.out, "{}", render_insert(record, &self.table))?;
        self.written += 1;
        Ok(())
    }

    pub fn finish(mut self) -> Result<usize> {
        self.out.flush()?;
        Ok(self.written)
    }
}

/// Collects records and writes them as CSV on finish
pub struct CsvExporter {
    file: File,
    records: Vec<PlayerStatRecord>,
}

impl CsvExporter {
    pub fn create(path: &Path) -> Result<Self> {
        Ok(Self {
            file: File::create(path)?,
            records: Vec::new(),
        })
    }

    pub fn write(&mut self, record: &PlayerStatRecord) -> Result<()> {
        self.records.push(record.clone());
        Ok(())
    }

    pub fn finish(mut self) -> Result<usize> {
        let mut df = records_to_dataframe(&self.records)?;
        debug!(
            "Writing CSV with {} rows and {} columns",
            df.height(),
            df.width()
        );

        CsvWriter::new(&mut self.file)
            .include_header(true)
            .with_separator(b',')
            .finish(&mut df)?;

        Ok(df.height())
    }
}

/// Build a `DataFrame` with one column per normalized field
pub fn records_to_dataframe(records: &[PlayerStatRecord]) -> Result<DataFrame> {
    let columns: Vec<Column> = PLAYER_STAT_COLUMNS
        .iter()
        .map(|column| {
            let name: PlSmallStr = column.name.into();
            let values = records.iter().map(|record| record.value(column.name));

            match column.kind {
                FieldKind::Text => {
                    let texts: Vec<String> = values
                        .map(|value| match value {
                            Some(FieldValue::Text(text)) => text,
                            _ => String::new(),
                        })
                        .collect();
                    Column::new(name, texts)
                }
                FieldKind::RequiredInt | FieldKind::Appearances => {
                    let ints: Vec<i64> = values
                        .map(|value| match value {
                            Some(FieldValue::Int(int)) => int,
                            _ => 0,
                        })
                        .collect();
                    Column::new(name, ints)
                }
                _ => {
                    let floats: Vec<f64> = values
                        .map(|value| match value {
                            Some(FieldValue::Float(float)) => float,
                            _ => 0.0,
                        })
                        .collect();
                    Column::new(name, floats)
                }
            }
        })
        .collect();

    Ok(DataFrame::new(columns)?)
}

/// Output sink chosen by the configured format
pub enum RecordWriter {
    Sql(SqlWriter),
    Csv(CsvExporter),
}

impl RecordWriter {
    pub fn create(path: &Path, config: &NormalizerConfig) -> Result<Self> {
        match config.output_format {
            OutputFormat::Sql => Ok(Self::Sql(SqlWriter::create(path, &config.target_table)?)),
            OutputFormat::Csv => Ok(Self::Csv(CsvExporter::create(path)?)),
        }
    }

    pub fn write(&mut self, record: &PlayerStatRecord) -> Result<()> {
        match self {
            Self::Sql(writer) => writer.write(record),
            Self::Csv(writer) => writer.write(record),
        }
    }

    /// Flush all output and return the number of records written
    pub fn finish(self) -> Result<usize> {
        match self {
            Self::Sql(writer) => writer.finish(),
            Self::Csv(writer) => writer.finish(),
        }
    }
}

/// Dead-letter file of dropped statements
///
/// Each entry is a SQL comment naming the line and reason, followed by the
/// statement text, so the file can be fixed up and fed back in.
pub struct RejectLog {
    out: BufWriter<File>,
    entries: usize,
}

impl RejectLog {
    pub fn create(path: &Path) -> Result<Self> {
        Ok(Self {
            out: BufWriter::new(File::create(path)?),
            entries: 0,
        })
    }

    pub fn record(&mut self, statement: &Statement, reason: &RejectReason) -> Result<()> {
        writeln!(self.out, "-- line {}: {}", statement.line, reason)?;
        writeln!(self.out, "{}", statement.text)?;
        self.entries += 1;
        Ok(())
    }

    pub fn finish(mut self) -> Result<usize> {
        self.out.flush()?;
        Ok(self.entries)
    }
}
