//! Emission sinks.
//!
//! # Data Flow
//! ```text
//! emitter produces:
//!     → log.rs (LogEvent payloads at a mapped severity)
//!     → metrics.rs (named counter increments tagged by instance)
//!
//! Destinations:
//!     → console (tracing subscriber output)
//!     → JSON-lines file (log aggregation pickup)
//!     → metrics recorder (Prometheus scrape endpoint)
//! ```
//!
//! # Design Decisions
//! - Sinks are append-only and order-insensitive; concurrent instances
//!   write without coordination
//! - Collaborators live behind object-safe traits so tests substitute
//!   recording/failing doubles
//! - A sink failure aborts the transaction in progress; the emitter never
//!   retries an emission

pub mod log;
pub mod metrics;

pub use log::{LogSink, Severity};
pub use metrics::MetricsSink;

use thiserror::Error;

/// Errors surfaced by log or metrics destinations.
#[derive(Debug, Error)]
pub enum SinkError {
    /// Destination could not be written.
    #[error("sink I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Payload could not be serialized.
    #[error("payload serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}
