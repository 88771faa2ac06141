//! Instance run loop.
//!
//! # Responsibilities
//! - Repeatedly drive the transaction emitter for one instance identity
//! - Pace transactions with the configured inter-transaction pause
//! - Stop cleanly on the lifecycle shutdown signal
//!
//! # Design Decisions
//! - Store failures are always fatal; an operator fixes the counter file
//!   and restarts
//! - Sink failures abandon the current transaction; whether the loop
//!   continues is a deployment choice (`halt_on_sink_error`)
//! - A transaction interrupted by shutdown may never emit its completion
//!   event; consumers must tolerate that

use std::time::Duration;

use tokio::sync::broadcast;

use crate::config::RunnerConfig;
use crate::emitter::{EmitError, TransactionEmitter};

/// The outer infinite loop of one instance process.
pub struct InstanceRunner {
    emitter: TransactionEmitter,
    instance: String,
    config: RunnerConfig,
}

impl InstanceRunner {
    pub fn new(emitter: TransactionEmitter, instance: String, config: RunnerConfig) -> Self {
        Self {
            emitter,
            instance,
            config,
        }
    }

    /// Run transactions until shutdown is signalled or a fatal error
    /// surfaces.
    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) -> Result<(), EmitError> {
        tracing::info!(
            instance = %self.instance,
            pause_secs = self.config.pause_secs,
            "Instance runner starting"
        );

        loop {
            tokio::select! {
                result = self.emitter.run_one(&self.instance) => {
                    match result {
                        Ok(outcome) => {
                            tracing::debug!(
                                transaction_id = %outcome.transaction_id,
                                events = outcome.events_emitted,
                                errors = outcome.error_count,
                                "Transaction finished"
                            );
                        }
                        Err(EmitError::Store(e)) => {
                            tracing::error!(error = %e, "Sequence store failure, stopping");
                            return Err(e.into());
                        }
                        Err(EmitError::Sink(e)) if self.config.halt_on_sink_error => {
                            tracing::error!(error = %e, "Sink failure, stopping");
                            return Err(e.into());
                        }
                        Err(EmitError::Sink(e)) => {
                            // The abandoned id stays spent; the next loop
                            // iteration allocates a fresh one.
                            tracing::warn!(error = %e, "Sink failure, transaction abandoned");
                        }
                    }
                }
                _ = shutdown.recv() => {
                    tracing::info!(instance = %self.instance, "Runner received shutdown signal, exiting loop");
                    return Ok(());
                }
            }

            tokio::select! {
                _ = tokio::time::sleep(Duration::from_secs(self.config.pause_secs)) => {}
                _ = shutdown.recv() => {
                    tracing::info!(instance = %self.instance, "Runner received shutdown signal, exiting loop");
                    return Ok(());
                }
            }
        }
    }
}
