//! Parse event reporting.
//!
//! The assembler and processor report what they decide through a
//! [`ParseObserver`] instead of printing. The default [`TracingObserver`]
//! turns events into `tracing` records, so verbosity is a subscriber
//! filter concern.

use crate::error::RejectReason;
use tracing::{debug, trace, warn};

/// Receives parse decisions; every method defaults to doing nothing
pub trait ParseObserver {
    /// No `VALUES (...)` clause could be tokenized
    fn values_not_found(&mut self, _line: usize) {}

    /// The tokenizer produced the wrong number of values
    fn field_count_mismatch(&mut self, _line: usize, _expected: usize, _found: usize) {}

    /// A soft field was unrecognised and replaced by its zero value
    fn field_defaulted(&mut self, _line: usize, _field: &'static str, _raw: &str) {}

    /// A required field did not parse
    fn required_field_invalid(&mut self, _line: usize, _field: &'static str, _raw: &str) {}

    /// A statement was dropped
    fn statement_rejected(&mut self, _line: usize, _reason: &RejectReason) {}

    /// A record was assembled and will be written
    fn record_accepted(&mut self, _line: usize) {}
}

/// Ignores every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl ParseObserver for NullObserver {}

/// Emits every event as a `tracing` record
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl ParseObserver for TracingObserver {
    fn values_not_found(&mut self, line: usize) {
        debug!("Line {}: no VALUES (...) clause found", line);
    }

    fn field_count_mismatch(&mut self, line: usize, expected: usize, found: usize) {
        debug!(
            "Line {}: expected {} values but found {}",
            line, expected, found
        );
    }

    fn field_defaulted(&mut self, line: usize, field: &'static str, raw: &str) {
        debug!(
            "Line {}: could not parse {} = '{}', using zero value",
            line, field, raw
        );
    }

    fn required_field_invalid(&mut self, line: usize, field: &'static str, raw: &str) {
        debug!("Line {}: required field {} = '{}' is invalid", line, field, raw);
    }

    fn statement_rejected(&mut self, line: usize, reason: &RejectReason) {
        warn!("Skipped statement at line {}: {}", line, reason);
    }

    fn record_accepted(&mut self, line: usize) {
        trace!("Accepted statement at line {}", line);
    }
}

/// Forwards every event to two observers
pub struct Tee<'a> {
    first: &'a mut dyn ParseObserver,
    second: &'a mut dyn ParseObserver,
}

impl<'a> Tee<'a> {
    pub fn new(first: &'a mut dyn ParseObserver, second: &'a mut dyn ParseObserver) -> Self {
        Self { first, second }
    }
}

impl ParseObserver for Tee<'_> {
    fn values_not_found(&mut self, line: usize) {
        self.first.values_not_found(line);
        self.second.values_not_found(line);
    }

    fn field_count_mismatch(&mut self, line: usize, expected: usize, found: usize) {
        self.first.field_count_mismatch(line, expected, found);
        self.second.field_count_mismatch(line, expected, found);
    }

    fn field_defaulted(&mut self, line: usize, field: &'static str, raw: &str) {
        self.first.field_defaulted(line, field, raw);
        self.second.field_defaulted(line, field, raw);
    }

    fn required_field_invalid(&mut self, line: usize, field: &'static str, raw: &str) {
        self.first.required_field_invalid(line, field, raw);
        self.second.required_field_invalid(line, field, raw);
    }

    fn statement_rejected(&mut self, line: usize, reason: &RejectReason) {
        self.first.statement_rejected(line, reason);
        self.second.statement_rejected(line, reason);
    }

    fn record_accepted(&mut self, line: usize) {
        self.first.record_accepted(line);
        self.second.record_accepted(line);
    }
}

/// Keeps every event in memory for later inspection
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RecordingObserver {
    pub events: Vec<ParseEvent>,
}

/// One recorded observer call
#[derive(Debug, Clone, PartialEq)]
pub enum ParseEvent {
    ValuesNotFound { line: usize },
    FieldCountMismatch { line: usize, expected: usize, found: usize },
    FieldDefaulted { line: usize, field: &'static str, raw: String },
    RequiredFieldInvalid { line: usize, field: &'static str, raw: String },
    StatementRejected { line: usize, reason: RejectReason },
    RecordAccepted { line: usize },
}

impl ParseObserver for RecordingObserver {
    fn values_not_found(&mut self, line: usize) {
        self.events.push(ParseEvent::ValuesNotFound { line });
    }

    fn field_count_mismatch(&mut self, line: usize, expected: usize, found: usize) {
        self.events.push(ParseEvent::FieldCountMismatch {
            line,
            expected,
            found,
        });
    }

    fn field_defaulted(&mut self, line: usize, field: &'static str, raw: &str) {
        self.events.push(ParseEvent::FieldDefaulted {
            line,
            field,
            raw: raw.to_string(),
        });
    }

    fn required_field_invalid(&mut self, line: usize, field: &'static str, raw: &str) {
        self.events.push(ParseEvent::RequiredFieldInvalid {
            line,
            field,
            raw: raw.to_string(),
        });
    }

    fn statement_rejected(&mut self, line: usize, reason: &RejectReason) {
        self.events.push(ParseEvent::StatementRejected {
            line,
            reason: reason.clone(),
        });
    }

    fn record_accepted(&mut self, line: usize) {
        self.events.push(ParseEvent::RecordAccepted { line });
    }
}
