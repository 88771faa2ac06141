//! Metrics destinations.

use crate::sink::SinkError;

/// Counter incremented once per completed transaction.
pub const TRANSACTIONS_PROCESSED: &str = "TransactionsProcessed";

/// Counter incremented by the number of simulated errors in a
/// transaction; never emitted for an error-free transaction.
pub const ERRORS_OCCURRED: &str = "ErrorsOccurred";

/// Destination for named counter increments tagged by instance.
pub trait MetricsSink: Send + Sync {
    fn increment(&self, name: &str, value: u64, instance: &str) -> Result<(), SinkError>;
}

/// Forwards increments to the globally installed [`metrics`] recorder.
///
/// The binary installs a Prometheus exporter at startup; with no recorder
/// installed the increments are dropped, which keeps the metrics-free
/// configuration inert.
pub struct RecorderSink;

impl RecorderSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RecorderSink {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsSink for RecorderSink {
    fn increment(&self, name: &str, value: u64, instance: &str) -> Result<(), SinkError> {
        metrics::counter!(name.to_string(), "instance" => instance.to_string()).increment(value);
        Ok(())
    }
}
