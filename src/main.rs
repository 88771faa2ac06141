//! Workload Telemetry Simulator (v1)
//!
//! Simulates correlated workload telemetry for cooperating process
//! instances. Each instance runs this binary with its own identity; all
//! instances share one transaction counter so their log streams carry
//! globally unique, monotonically increasing transaction ids.
//!
//! # Architecture Overview
//!
//! ```text
//!                       ┌────────────────────────────────────────────────┐
//!                       │                INSTANCE PROCESS                 │
//!                       │                                                 │
//!                       │  ┌──────────┐     ┌─────────────┐              │
//!                       │  │  runner  │────▶│   emitter   │              │
//!                       │  │  (loop)  │     │(transaction)│              │
//!                       │  └──────────┘     └──────┬──────┘              │
//!                       │                          │                      │
//!                       │           ┌──────────────┼─────────────┐       │
//!                       │           ▼              ▼             ▼       │
//!                       │    ┌───────────┐  ┌───────────┐  ┌──────────┐ │
//!    counter file ◀─────┼────│ sequence  │  │ log sink  │  │ metrics  │─┼──▶ Prometheus
//!    (shared, locked)   │    │   store   │  │(file/cons)│  │   sink   │ │    scrape
//!                       │    └───────────┘  └───────────┘  └──────────┘ │
//!                       │                                                 │
//!                       │  ┌───────────────────────────────────────────┐ │
//!                       │  │           Cross-Cutting Concerns           │ │
//!                       │  │  ┌─────────┐ ┌────────────┐ ┌───────────┐ │ │
//!                       │  │  │ config  │ │ observa-   │ │ lifecycle │ │ │
//!                       │  │  │         │ │ bility     │ │ shutdown  │ │ │
//!                       │  │  └─────────┘ └────────────┘ └───────────┘ │ │
//!                       │  └───────────────────────────────────────────┘ │
//!                       └────────────────────────────────────────────────┘
//! ```
//!
//! A second instance is simply a second process pointed at the same
//! counter file with a different `--instance` name.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use telemetry_sim::config::loader::load_config;
use telemetry_sim::config::SimConfig;
use telemetry_sim::emitter::failure::RandomFailure;
use telemetry_sim::emitter::TransactionEmitter;
use telemetry_sim::lifecycle::{signals, Shutdown};
use telemetry_sim::runner::InstanceRunner;
use telemetry_sim::sequence::SequenceStore;
use telemetry_sim::sink::log::{ConsoleSink, FanoutSink, JsonFileSink};
use telemetry_sim::sink::metrics::RecorderSink;
use telemetry_sim::sink::{LogSink, MetricsSink};

#[derive(Parser)]
#[command(name = "telemetry-sim")]
#[command(about = "Simulated workload telemetry generator", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Instance identity, overrides the configured name.
    #[arg(short, long)]
    instance: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => SimConfig::default(),
    };
    if let Some(name) = cli.instance {
        config.instance.name = name;
    }

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("telemetry_sim={}", config.observability.log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("telemetry-sim v0.1.0 starting");

    tracing::info!(
        instance = %config.instance.name,
        counter_path = %config.sequence.counter_path.display(),
        pause_secs = config.runner.pause_secs,
        error_probability = config.emitter.error_probability,
        "Configuration loaded"
    );

    // Initialize metrics exporter
    if config.metrics.enabled {
        if let Ok(addr) = config.metrics.address.parse() {
            telemetry_sim::observability::metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.metrics.address,
                "Failed to parse metrics address"
            );
        }
    }

    // Assemble the log sink chain: console always, file when configured.
    let console: Arc<dyn LogSink> = Arc::new(ConsoleSink::new());
    let logs: Arc<dyn LogSink> = match &config.observability.log_file {
        Some(path) => {
            let file: Arc<dyn LogSink> = Arc::new(JsonFileSink::create(path)?);
            Arc::new(FanoutSink::new(vec![console, file]))
        }
        None => console,
    };

    let metrics_sink: Option<Arc<dyn MetricsSink>> = if config.metrics.enabled {
        Some(Arc::new(RecorderSink::new()))
    } else {
        None
    };

    let store = Arc::new(SequenceStore::new(&config.sequence.counter_path));
    let emitter = TransactionEmitter::new(
        store,
        Arc::new(RandomFailure),
        logs,
        metrics_sink,
        config.emitter.clone(),
    );
    let runner = InstanceRunner::new(emitter, config.instance.name.clone(), config.runner.clone());

    let shutdown = Shutdown::new();
    let shutdown_rx = shutdown.subscribe();
    tokio::spawn(async move {
        signals::wait_for_signal().await;
        shutdown.trigger();
    });

    runner.run(shutdown_rx).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
