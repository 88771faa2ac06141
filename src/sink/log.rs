//! Log destinations.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

use crate::emitter::event::LogEvent;
use crate::sink::SinkError;

/// Severity at which a payload is handed to the destination.
///
/// Simulated ERROR payloads are emitted at `Warning`; they are a business
/// outcome of the simulation, not a failure of the emitting process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
}

/// Destination for structured log records.
pub trait LogSink: Send + Sync {
    /// Emit one event. Errors abort the transaction in progress.
    fn emit(&self, severity: Severity, event: &LogEvent) -> Result<(), SinkError>;
}

/// Emits payloads through the `tracing` subscriber, which renders them on
/// the console (or wherever the subscriber is pointed).
pub struct ConsoleSink;

impl ConsoleSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl LogSink for ConsoleSink {
    fn emit(&self, severity: Severity, event: &LogEvent) -> Result<(), SinkError> {
        let payload = serde_json::to_string(event)?;
        match severity {
            Severity::Info => tracing::info!(target: "transaction", "{}", payload),
            Severity::Warning => tracing::warn!(target: "transaction", "{}", payload),
        }
        Ok(())
    }
}

/// Appends one JSON object per line to a log file.
///
/// This is the stream a log-aggregation agent tails; records from every
/// instance interleave freely and are correlated downstream by
/// `transaction_id` + `instance`.
pub struct JsonFileSink {
    file: Mutex<File>,
}

impl JsonFileSink {
    /// Open `path` for appending, creating parent directories as needed.
    pub fn create(path: impl AsRef<Path>) -> Result<Self, SinkError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl LogSink for JsonFileSink {
    fn emit(&self, severity: Severity, event: &LogEvent) -> Result<(), SinkError> {
        // Severity only selects the console channel; the file carries the
        // level inside the payload itself.
        let _ = severity;
        let payload = serde_json::to_string(event)?;

        let mut file = self.file.lock().unwrap_or_else(PoisonError::into_inner);
        writeln!(file, "{}", payload)?;
        file.flush()?;
        Ok(())
    }
}

/// Forwards every event to several sinks; the first failure wins.
pub struct FanoutSink {
    sinks: Vec<Arc<dyn LogSink>>,
}

impl FanoutSink {
    pub fn new(sinks: Vec<Arc<dyn LogSink>>) -> Self {
        Self { sinks }
    }
}

impl LogSink for FanoutSink {
    fn emit(&self, severity: Severity, event: &LogEvent) -> Result<(), SinkError> {
        for sink in &self.sinks {
            sink.emit(severity, event)?;
        }
        Ok(())
    }
}
