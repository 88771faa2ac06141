//! Shared transaction-id sequencing.
//!
//! # Data Flow
//! ```text
//! emitter requests id
//!     → store.rs (open counter file)
//!     → exclusive cross-process lock
//!     → read N, persist N+1
//!     → unlock (on close)
//!     → TransactionId(N) back to emitter
//! ```
//!
//! # Design Decisions
//! - One counter file shared by every instance; the file lock is the only
//!   cross-process synchronization in the system
//! - The lock spans the full read-modify-write; a plain read-then-write
//!   lets two processes observe the same value and allocate duplicates
//! - Corruption and I/O failures are fatal to the caller; recovery is an
//!   operator action (`store-ctl`), never automatic

pub mod store;

pub use store::{SequenceStore, StoreError, TransactionId};
