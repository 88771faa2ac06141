//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for one
//! simulator instance. All types derive Serde traits for deserialization
//! from config files.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration for one instance process.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct SimConfig {
    /// Identity of this instance in the shared telemetry streams.
    pub instance: InstanceConfig,

    /// Shared transaction counter settings.
    pub sequence: SequenceConfig,

    /// Transaction emission policy.
    pub emitter: EmitterConfig,

    /// Outer loop settings.
    pub runner: RunnerConfig,

    /// Metrics emission settings.
    pub metrics: MetricsConfig,

    /// Logging settings.
    pub observability: ObservabilityConfig,
}

/// Instance identity.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct InstanceConfig {
    /// Name distinguishing this instance's records (e.g., "Instance A").
    pub name: String,
}

impl Default for InstanceConfig {
    fn default() -> Self {
        Self {
            name: "Instance A".to_string(),
        }
    }
}

/// Shared counter store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SequenceConfig {
    /// Path to the counter file every cooperating instance shares.
    pub counter_path: PathBuf,
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self {
            counter_path: PathBuf::from("data/transaction_counter.txt"),
        }
    }
}

/// Transaction emission policy.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EmitterConfig {
    /// Probability that any single step is a simulated error.
    pub error_probability: f64,

    /// Minimum step events per transaction.
    pub burst_min: u32,

    /// Maximum step events per transaction.
    pub burst_max: u32,

    /// Lower bound of the simulated per-step processing delay.
    pub step_delay_min_ms: u64,

    /// Upper bound of the simulated per-step processing delay.
    pub step_delay_max_ms: u64,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            error_probability: 0.3,
            burst_min: 3,
            burst_max: 4,
            step_delay_min_ms: 1000,
            step_delay_max_ms: 2000,
        }
    }
}

/// Outer loop configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Pause between transactions in seconds.
    pub pause_secs: u64,

    /// Stop the loop when a sink fails. When false the failed
    /// transaction is abandoned and the loop continues with a fresh id.
    pub halt_on_sink_error: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            pause_secs: 3,
            halt_on_sink_error: true,
        }
    }
}

/// Metrics emission configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Emit per-transaction counters. Off by default; the metrics-free
    /// variant of the simulator is this flag left unset.
    pub enabled: bool,

    /// Prometheus exporter bind address.
    pub address: String,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Optional JSON-lines log file written alongside console output.
    pub log_file: Option<PathBuf>,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_file: None,
        }
    }
}
