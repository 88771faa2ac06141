//! Workload Telemetry Simulator Library

pub mod config;
pub mod emitter;
pub mod lifecycle;
pub mod observability;
pub mod runner;
pub mod sequence;
pub mod sink;

pub use config::schema::SimConfig;
pub use lifecycle::Shutdown;
pub use runner::InstanceRunner;
pub use sequence::SequenceStore;
