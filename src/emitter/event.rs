//! Log event payloads and per-transaction outcomes.

use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::sequence::TransactionId;
use crate::sink::Severity;

const STEP_ERROR_MESSAGE: &str = "An error occurred during processing";
const COMPLETED_MESSAGE: &str = "Transaction completed";

/// Level carried inside a log payload.
///
/// Distinct from [`Severity`]: the level is part of the record a consumer
/// correlates on, the severity is the channel the record is emitted at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Info,
    Error,
}

impl From<LogLevel> for Severity {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Info => Severity::Info,
            LogLevel::Error => Severity::Warning,
        }
    }
}

/// One structured log record, serialized as the flat payload the
/// downstream aggregation tooling expects.
///
/// Completion events are distinguished from step events only by their
/// message text; the payload schema is identical for both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEvent {
    pub transaction_id: String,
    pub timestamp: String,
    pub instance: String,
    pub log_message: String,
    pub log_level: LogLevel,
}

impl LogEvent {
    /// A successful processing step.
    pub fn step(id: TransactionId, instance: &str, step: u32) -> Self {
        Self::build(id, instance, format!("Processing step {}", step), LogLevel::Info)
    }

    /// A simulated processing error.
    pub fn error(id: TransactionId, instance: &str) -> Self {
        Self::build(id, instance, STEP_ERROR_MESSAGE.to_string(), LogLevel::Error)
    }

    /// The terminal event of a transaction.
    pub fn completed(id: TransactionId, instance: &str) -> Self {
        Self::build(id, instance, COMPLETED_MESSAGE.to_string(), LogLevel::Info)
    }

    fn build(id: TransactionId, instance: &str, message: String, level: LogLevel) -> Self {
        Self {
            transaction_id: id.to_string(),
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            instance: instance.to_string(),
            log_message: message,
            log_level: level,
        }
    }

    /// Severity this event is emitted at: ERROR payloads go out as
    /// warnings, everything else as plain info.
    pub fn severity(&self) -> Severity {
        self.log_level.into()
    }
}

/// Aggregate result of one transaction, consumed for metric emission and
/// then discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionOutcome {
    pub transaction_id: TransactionId,
    pub instance: String,
    pub events_emitted: u32,
    pub error_count: u32,
}
