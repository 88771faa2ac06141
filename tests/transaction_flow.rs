//! End-to-end tests for transaction emission and the run loop.

use std::sync::Arc;
use std::time::Duration;

use telemetry_sim::config::RunnerConfig;
use telemetry_sim::emitter::failure::{AlwaysFail, NeverFail, RandomFailure};
use telemetry_sim::emitter::{EmitError, TransactionEmitter};
use telemetry_sim::lifecycle::Shutdown;
use telemetry_sim::runner::InstanceRunner;
use telemetry_sim::sequence::{SequenceStore, TransactionId};
use telemetry_sim::sink::{LogSink, MetricsSink, Severity};

mod common;
use common::{instant_emitter_config, FailingLogSink, RecordingLogSink, RecordingMetricsSink};

fn store_in(dir: &tempfile::TempDir) -> Arc<SequenceStore> {
    Arc::new(SequenceStore::new(dir.path().join("counter.txt")))
}

#[tokio::test]
async fn forced_failures_count_every_error() {
    let dir = tempfile::tempdir().unwrap();
    let logs = Arc::new(RecordingLogSink::new());
    let metrics = Arc::new(RecordingMetricsSink::new());

    let emitter = TransactionEmitter::new(
        store_in(&dir),
        Arc::new(AlwaysFail),
        logs.clone(),
        Some(metrics.clone() as Arc<dyn MetricsSink>),
        instant_emitter_config(4, 4),
    );

    let outcome = emitter.run_one("Instance A").await.unwrap();
    assert_eq!(outcome.transaction_id, TransactionId(1));
    assert_eq!(outcome.events_emitted, 4);
    assert_eq!(outcome.error_count, 4);

    // Burst of four error events at WARNING, then the completion event.
    let events = logs.events();
    assert_eq!(events.len(), 5);
    for (severity, event) in &events[..4] {
        assert_eq!(*severity, Severity::Warning);
        assert_eq!(event.log_message, "An error occurred during processing");
        assert_eq!(event.transaction_id, "1");
        assert_eq!(event.instance, "Instance A");
    }
    let (severity, completion) = &events[4];
    assert_eq!(*severity, Severity::Info);
    assert_eq!(completion.log_message, "Transaction completed");

    assert_eq!(
        metrics.increments(),
        vec![
            ("TransactionsProcessed".to_string(), 1, "Instance A".to_string()),
            ("ErrorsOccurred".to_string(), 4, "Instance A".to_string()),
        ]
    );
}

#[tokio::test]
async fn clean_run_never_emits_the_error_metric() {
    let dir = tempfile::tempdir().unwrap();
    let logs = Arc::new(RecordingLogSink::new());
    let metrics = Arc::new(RecordingMetricsSink::new());

    let emitter = TransactionEmitter::new(
        store_in(&dir),
        Arc::new(NeverFail),
        logs.clone(),
        Some(metrics.clone() as Arc<dyn MetricsSink>),
        instant_emitter_config(3, 3),
    );

    let outcome = emitter.run_one("Instance B").await.unwrap();
    assert_eq!(outcome.error_count, 0);
    assert_eq!(outcome.events_emitted, 3);

    let events = logs.events();
    assert_eq!(events.len(), 4);
    for (i, (severity, event)) in events[..3].iter().enumerate() {
        assert_eq!(*severity, Severity::Info);
        assert_eq!(event.log_message, format!("Processing step {}", i + 1));
    }
    assert_eq!(events[3].1.log_message, "Transaction completed");

    assert_eq!(
        metrics.increments(),
        vec![("TransactionsProcessed".to_string(), 1, "Instance B".to_string())]
    );
}

#[tokio::test]
async fn bursts_stay_within_the_configured_bounds() {
    let dir = tempfile::tempdir().unwrap();
    let logs = Arc::new(RecordingLogSink::new());

    let emitter = TransactionEmitter::new(
        store_in(&dir),
        Arc::new(RandomFailure),
        logs.clone(),
        None,
        instant_emitter_config(3, 4),
    );

    for _ in 0..20 {
        let outcome = emitter.run_one("Instance A").await.unwrap();
        assert!((3..=4).contains(&outcome.events_emitted));
        assert!(outcome.error_count <= outcome.events_emitted);
    }
}

#[tokio::test]
async fn metrics_free_variant_only_writes_logs() {
    let dir = tempfile::tempdir().unwrap();
    let logs = Arc::new(RecordingLogSink::new());

    let emitter = TransactionEmitter::new(
        store_in(&dir),
        Arc::new(NeverFail),
        logs.clone(),
        None,
        instant_emitter_config(3, 3),
    );

    let outcome = emitter.run_one("Instance A").await.unwrap();
    assert_eq!(outcome.events_emitted, 3);
    assert_eq!(logs.events().len(), 4);
}

#[tokio::test]
async fn sink_failure_abandons_the_transaction_and_spends_the_id() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);

    let failing = TransactionEmitter::new(
        store.clone(),
        Arc::new(NeverFail),
        Arc::new(FailingLogSink::after(2)),
        None,
        instant_emitter_config(4, 4),
    );

    match failing.run_one("Instance A").await {
        Err(EmitError::Sink(_)) => {}
        other => panic!("expected sink error, got {:?}", other.map(|o| o.transaction_id)),
    }

    // Id 1 is spent even though its burst never finished.
    let healthy = TransactionEmitter::new(
        store,
        Arc::new(NeverFail),
        Arc::new(RecordingLogSink::new()) as Arc<dyn LogSink>,
        None,
        instant_emitter_config(3, 3),
    );
    let outcome = healthy.run_one("Instance A").await.unwrap();
    assert_eq!(outcome.transaction_id, TransactionId(2));
}

#[tokio::test]
async fn runner_exits_on_shutdown_signal() {
    let dir = tempfile::tempdir().unwrap();
    let emitter = TransactionEmitter::new(
        store_in(&dir),
        Arc::new(NeverFail),
        Arc::new(RecordingLogSink::new()) as Arc<dyn LogSink>,
        None,
        instant_emitter_config(3, 3),
    );
    let runner = InstanceRunner::new(
        emitter,
        "Instance A".to_string(),
        RunnerConfig {
            pause_secs: 0,
            halt_on_sink_error: true,
        },
    );

    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    let handle = tokio::spawn(async move { runner.run(rx).await });

    tokio::time::sleep(Duration::from_millis(50)).await;
    shutdown.trigger();

    let result = tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("runner did not stop after shutdown")
        .unwrap();
    assert!(result.is_ok());
}

#[tokio::test]
async fn runner_halts_on_sink_error_by_default() {
    let dir = tempfile::tempdir().unwrap();
    let emitter = TransactionEmitter::new(
        store_in(&dir),
        Arc::new(NeverFail),
        Arc::new(FailingLogSink::immediately()),
        None,
        instant_emitter_config(3, 3),
    );
    let runner = InstanceRunner::new(
        emitter,
        "Instance A".to_string(),
        RunnerConfig::default(),
    );

    let shutdown = Shutdown::new();
    let result = tokio::time::timeout(Duration::from_secs(5), runner.run(shutdown.subscribe()))
        .await
        .expect("runner did not stop on sink failure");
    assert!(matches!(result, Err(EmitError::Sink(_))));
}

#[tokio::test]
async fn runner_can_be_configured_to_outlive_sink_failures() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    let emitter = TransactionEmitter::new(
        store.clone(),
        Arc::new(NeverFail),
        Arc::new(FailingLogSink::immediately()),
        None,
        instant_emitter_config(3, 3),
    );
    let runner = InstanceRunner::new(
        emitter,
        "Instance A".to_string(),
        RunnerConfig {
            pause_secs: 0,
            halt_on_sink_error: false,
        },
    );

    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    let handle = tokio::spawn(async move { runner.run(rx).await });

    tokio::time::sleep(Duration::from_millis(100)).await;
    shutdown.trigger();
    let result = tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("runner did not stop after shutdown")
        .unwrap();
    assert!(result.is_ok());

    // Each abandoned transaction spent a fresh id.
    assert!(store.peek().unwrap() > 2);
}
