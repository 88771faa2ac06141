//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → trigger graceful shutdown
//!
//! Shutdown (shutdown.rs):
//!     signal received → runner exits at the next select point → exit
//! ```
//!
//! # Design Decisions
//! - Shutdown is a broadcast: every long-running task subscribes
//! - A transaction in flight when the signal lands may be cut short; its
//!   completion event is simply never emitted

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
