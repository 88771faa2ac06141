//! Metrics exporter setup.
//!
//! # Responsibilities
//! - Install the Prometheus exporter on the configured address
//! - Register descriptions for the simulator's counters
//!
//! # Metrics
//! - `TransactionsProcessed` (counter): completed transactions, by instance
//! - `ErrorsOccurred` (counter): simulated step errors, by instance

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

use crate::sink::metrics::{ERRORS_OCCURRED, TRANSACTIONS_PROCESSED};

/// Install the Prometheus exporter and describe the counters.
///
/// Failure to bind is logged, not fatal: the simulator keeps emitting
/// logs even when the scrape endpoint is unavailable.
pub fn init_metrics(addr: SocketAddr) {
    let builder = PrometheusBuilder::new().with_http_listener(addr);

    match builder.install() {
        Ok(()) => {
            tracing::info!(address = %addr, "Metrics exporter listening");
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to install metrics exporter");
            return;
        }
    }

    metrics::describe_counter!(
        TRANSACTIONS_PROCESSED,
        "Completed transactions, tagged by instance"
    );
    metrics::describe_counter!(
        ERRORS_OCCURRED,
        "Simulated processing errors, tagged by instance"
    );
}
