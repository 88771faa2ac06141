//! One transaction's lifecycle.

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use thiserror::Error;

use crate::config::EmitterConfig;
use crate::emitter::event::{LogEvent, TransactionOutcome};
use crate::emitter::failure::FailureInjector;
use crate::sequence::{SequenceStore, StoreError};
use crate::sink::{LogSink, MetricsSink, Severity, SinkError};
use crate::sink::metrics::{ERRORS_OCCURRED, TRANSACTIONS_PROCESSED};

/// Errors that abort a transaction.
#[derive(Debug, Error)]
pub enum EmitError {
    /// Id allocation failed; fatal to the run loop.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// A log or metrics destination failed mid-transaction.
    #[error("sink error: {0}")]
    Sink(#[from] SinkError),
}

/// Drives one full transaction: id allocation, the randomized burst of
/// step events, per-transaction metrics, and the completion event.
pub struct TransactionEmitter {
    store: Arc<SequenceStore>,
    injector: Arc<dyn FailureInjector>,
    logs: Arc<dyn LogSink>,
    metrics: Option<Arc<dyn MetricsSink>>,
    config: EmitterConfig,
}

impl TransactionEmitter {
    /// Assemble an emitter. Passing `None` for `metrics` selects the
    /// metrics-free variant: the whole metric emission step is skipped.
    pub fn new(
        store: Arc<SequenceStore>,
        injector: Arc<dyn FailureInjector>,
        logs: Arc<dyn LogSink>,
        metrics: Option<Arc<dyn MetricsSink>>,
        config: EmitterConfig,
    ) -> Self {
        Self {
            store,
            injector,
            logs,
            metrics,
            config,
        }
    }

    /// Run one transaction for `instance`.
    ///
    /// The allocated id is spent whether or not the transaction finishes;
    /// an abandoned transaction is never resumed under the same id.
    pub async fn run_one(&self, instance: &str) -> Result<TransactionOutcome, EmitError> {
        let id = self.store.allocate().await?;

        let burst = rand::thread_rng().gen_range(self.config.burst_min..=self.config.burst_max);
        tracing::debug!(
            transaction_id = %id,
            instance = %instance,
            burst,
            "Transaction started"
        );

        let mut error_count = 0u32;
        for step in 1..=burst {
            let event = if self.injector.should_fail(self.config.error_probability) {
                error_count += 1;
                LogEvent::error(id, instance)
            } else {
                LogEvent::step(id, instance, step)
            };
            self.logs.emit(event.severity(), &event)?;

            let delay_ms = rand::thread_rng()
                .gen_range(self.config.step_delay_min_ms..=self.config.step_delay_max_ms);
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
        }

        if let Some(metrics) = &self.metrics {
            metrics.increment(TRANSACTIONS_PROCESSED, 1, instance)?;
            if error_count > 0 {
                metrics.increment(ERRORS_OCCURRED, u64::from(error_count), instance)?;
            }
        }

        self.logs
            .emit(Severity::Info, &LogEvent::completed(id, instance))?;

        Ok(TransactionOutcome {
            transaction_id: id,
            instance: instance.to_string(),
            events_emitted: burst,
            error_count,
        })
    }
}
