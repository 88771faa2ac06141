//! Shared test doubles for the integration tests.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use telemetry_sim::config::EmitterConfig;
use telemetry_sim::emitter::event::LogEvent;
use telemetry_sim::sink::{LogSink, MetricsSink, Severity, SinkError};

/// Log sink that records every emission for later assertions.
#[derive(Default)]
pub struct RecordingLogSink {
    events: Mutex<Vec<(Severity, LogEvent)>>,
}

impl RecordingLogSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<(Severity, LogEvent)> {
        self.events.lock().unwrap().clone()
    }
}

impl LogSink for RecordingLogSink {
    fn emit(&self, severity: Severity, event: &LogEvent) -> Result<(), SinkError> {
        self.events.lock().unwrap().push((severity, event.clone()));
        Ok(())
    }
}

/// Log sink that accepts a fixed number of emissions, then fails.
pub struct FailingLogSink {
    remaining: AtomicU32,
}

impl FailingLogSink {
    #[allow(dead_code)]
    pub fn after(successes: u32) -> Self {
        Self {
            remaining: AtomicU32::new(successes),
        }
    }

    #[allow(dead_code)]
    pub fn immediately() -> Self {
        Self::after(0)
    }
}

impl LogSink for FailingLogSink {
    fn emit(&self, _severity: Severity, _event: &LogEvent) -> Result<(), SinkError> {
        let before = self.remaining.fetch_sub(1, Ordering::SeqCst);
        if before == 0 {
            self.remaining.store(0, Ordering::SeqCst);
            return Err(SinkError::Io(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "log destination unreachable",
            )));
        }
        Ok(())
    }
}

/// Metrics sink that records every increment.
#[derive(Default)]
pub struct RecordingMetricsSink {
    increments: Mutex<Vec<(String, u64, String)>>,
}

impl RecordingMetricsSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increments(&self) -> Vec<(String, u64, String)> {
        self.increments.lock().unwrap().clone()
    }
}

impl MetricsSink for RecordingMetricsSink {
    fn increment(&self, name: &str, value: u64, instance: &str) -> Result<(), SinkError> {
        self.increments
            .lock()
            .unwrap()
            .push((name.to_string(), value, instance.to_string()));
        Ok(())
    }
}

/// Emitter config with no simulated delays, for fast tests.
pub fn instant_emitter_config(burst_min: u32, burst_max: u32) -> EmitterConfig {
    EmitterConfig {
        error_probability: 0.3,
        burst_min,
        burst_max,
        step_delay_min_ms: 0,
        step_delay_max_ms: 0,
    }
}
