//! Observability subsystem.
//!
//! Tracing subscriber initialization lives in `main` (it owns the
//! process-global subscriber); this module carries the metrics exporter
//! setup.
//!
//! # Data Flow
//! ```text
//! emitter counters → metrics recorder → Prometheus scrape endpoint
//! diagnostics + console log sink → tracing subscriber → stdout
//! ```

pub mod metrics;
