//! File-backed monotonic counter with cross-process locking.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use thiserror::Error;

/// Identifier of one simulated transaction.
///
/// Globally unique and strictly increasing across every instance sharing
/// one counter file. Rendered as its decimal value in log payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TransactionId(pub u64);

impl From<u64> for TransactionId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<TransactionId> for u64 {
    fn from(id: TransactionId) -> Self {
        id.0
    }
}

impl std::fmt::Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors that can occur against the sequence store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Counter file could not be opened, locked, read or written.
    #[error("sequence store unavailable: {0}")]
    Unavailable(#[from] io::Error),

    /// Counter file contents are not a non-negative decimal integer.
    #[error("sequence store corrupt: {found:?} is not a non-negative integer")]
    Corrupt { found: String },
}

/// Durable, shared monotonic counter.
///
/// Each allocation opens the counter file, takes an exclusive lock that is
/// honored across processes, reads the current value, persists the
/// incremented value, and returns the value read. Every instance process
/// pointed at the same path draws from the same sequence.
#[derive(Debug, Clone)]
pub struct SequenceStore {
    path: PathBuf,
}

impl SequenceStore {
    /// Create a handle for the counter at `path`. No I/O happens here;
    /// the file is created lazily on first allocation.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the backing counter file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Allocate the next transaction id.
    ///
    /// Runs the blocking read-modify-write on the blocking thread pool so
    /// a contended lock never stalls the async runtime.
    pub async fn allocate(&self) -> Result<TransactionId, StoreError> {
        let store = self.clone();
        tokio::task::spawn_blocking(move || store.allocate_blocking())
            .await
            .map_err(|e| StoreError::Unavailable(io::Error::new(io::ErrorKind::Other, e)))?
    }

    /// Allocate the next transaction id, blocking the calling thread while
    /// the exclusive lock is held by another process.
    pub fn allocate_blocking(&self) -> Result<TransactionId, StoreError> {
        let mut file = self.open_locked()?;

        let current = read_counter(&mut file)?;
        write_counter(&mut file, current + 1)?;

        // Lock is released when `file` is closed on drop.
        Ok(TransactionId(current))
    }

    /// Read the value the next allocation would return, without advancing
    /// the sequence.
    pub fn peek(&self) -> Result<u64, StoreError> {
        let mut file = self.open_locked()?;
        read_counter(&mut file)
    }

    /// Overwrite the counter so the next allocation returns `value`.
    ///
    /// Operator recovery path after clearing a corrupt store; the running
    /// system never calls this.
    pub fn reset(&self, value: u64) -> Result<(), StoreError> {
        let mut file = self.open_locked()?;
        write_counter(&mut file, value)
    }

    /// Open (creating if absent) and exclusively lock the counter file.
    fn open_locked(&self) -> Result<File, StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .open(&self.path)?;

        // Blocks until every other holder (thread or process) releases.
        file.lock_exclusive()?;
        Ok(file)
    }
}

/// Read the persisted counter value. An empty (fresh) file seeds the
/// sequence at 1.
fn read_counter(file: &mut File) -> Result<u64, StoreError> {
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;

    let trimmed = contents.trim();
    if trimmed.is_empty() {
        return Ok(1);
    }

    trimmed.parse::<u64>().map_err(|_| StoreError::Corrupt {
        found: trimmed.to_string(),
    })
}

/// Truncate and rewrite the counter file with `value`.
fn write_counter(file: &mut File, value: u64) -> Result<(), StoreError> {
    file.seek(SeekFrom::Start(0))?;
    file.set_len(0)?;
    file.write_all(value.to_string().as_bytes())?;
    file.sync_all()?;
    Ok(())
}
