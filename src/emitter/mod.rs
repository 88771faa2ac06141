//! Transaction emission.
//!
//! # Data Flow
//! ```text
//! runner invokes run_one(instance)
//!     → sequence store allocates the transaction id
//!     → 3–4 step events, each a coin flip between INFO and ERROR
//!     → per-transaction counters to the metrics sink
//!     → terminal "Transaction completed" event
//!     → TransactionOutcome back to the runner
//! ```
//!
//! # Design Decisions
//! - Error injection is a policy trait; tests pin it to always/never
//! - Simulated ERROR events are successful emissions, never Rust errors
//! - Any sink failure abandons the transaction mid-burst; the allocated
//!   id is spent either way and never retried

pub mod event;
pub mod failure;
pub mod transaction;

pub use event::{LogEvent, LogLevel, TransactionOutcome};
pub use failure::FailureInjector;
pub use transaction::{EmitError, TransactionEmitter};
