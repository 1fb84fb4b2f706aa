//! In-memory snapshot adapter.
//!
//! Implements [`SnapshotPort`] over a shared string. Clones share the same
//! backing text, so two stores built on clones behave like two processes
//! sharing one snapshot file. Read and write failures can be injected to
//! exercise the error paths.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::app::ports::SnapshotPort;
use crate::error::PersistError;

#[derive(Debug, Default)]
struct Inner {
    text: Option<String>,
    fail_reads: Option<PersistError>,
    fail_writes: Option<PersistError>,
    writes: usize,
}

/// Snapshot held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySnapshot {
    inner: Arc<Mutex<Inner>>,
}

impl MemorySnapshot {
    /// Empty snapshot (reads as absent).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contents(text: &str) -> Self {
        let snap = Self::new();
        snap.replace(text);
        snap
    }

    /// Current text, `None` if never written.
    pub fn contents(&self) -> Option<String> {
        self.lock().text.clone()
    }

    /// Overwrite the text out of band (an external writer).
    pub fn replace(&self, text: &str) {
        self.lock().text = Some(text.to_owned());
    }

    /// Forget the text, as if the file were deleted.
    pub fn clear(&self) {
        self.lock().text = None;
    }

    /// Successful `store` calls so far.
    pub fn write_count(&self) -> usize {
        self.lock().writes
    }

    /// Make every `load` fail with `err` (or succeed again with `None`).
    pub fn fail_reads(&self, err: Option<PersistError>) {
        self.lock().fail_reads = err;
    }

    /// Make every `store` fail with `err` (or succeed again with `None`).
    pub fn fail_writes(&self, err: Option<PersistError>) {
        self.lock().fail_writes = err;
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SnapshotPort for MemorySnapshot {
    fn load(&self) -> Result<Option<String>, PersistError> {
        let inner = self.lock();
        match inner.fail_reads {
            Some(err) => Err(err),
            None => Ok(inner.text.clone()),
        }
    }

    fn store(&self, text: &str) -> Result<(), PersistError> {
        let mut inner = self.lock();
        if let Some(err) = inner.fail_writes {
            return Err(err);
        }
        inner.text = Some(text.to_owned());
        inner.writes += 1;
        Ok(())
    }
}
