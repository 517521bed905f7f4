//! The durable-with-fallback store adapter.
//!
//! `ProgressStore` probes the file-backed store once at open time and
//! serves the `SnapshotStore` contract from it; any later write failure
//! migrates the store to the in-memory fallback for the remainder of the
//! session. Callers never see an error, only `is_available()` flipping to
//! `false`.

use std::io;
use std::path::PathBuf;

use quizdrill_core::traits::SnapshotStore;

use crate::file::FileStore;
use crate::memory::MemoryStore;

enum Backend {
    Durable(FileStore),
    Ephemeral(MemoryStore),
}

/// Snapshot store selecting its backend by a liveness probe.
pub struct ProgressStore {
    backend: Backend,
}

impl ProgressStore {
    /// Open a store rooted at `root`, probing it with a throwaway
    /// write/delete. On probe failure the store starts on the in-memory
    /// fallback and stays there.
    pub fn open(root: impl Into<PathBuf>) -> Self {
        let file = FileStore::new(root);
        match file.probe() {
            Ok(()) => Self {
                backend: Backend::Durable(file),
            },
            Err(e) => {
                tracing::warn!(
                    root = %file.root().display(),
                    error = %e,
                    "storage unavailable, progress will not survive this session"
                );
                Self {
                    backend: Backend::Ephemeral(MemoryStore::new()),
                }
            }
        }
    }

    /// A store that never touches disk.
    pub fn in_memory() -> Self {
        Self {
            backend: Backend::Ephemeral(MemoryStore::new()),
        }
    }

    /// Switch to the in-memory fallback after a durable write failure.
    fn migrate(&mut self, error: &io::Error) {
        if quota_exhausted(error) {
            tracing::warn!(error = %error, "storage quota exhausted, falling back to memory");
        } else {
            tracing::warn!(error = %error, "storage write failed, falling back to memory");
        }
        self.backend = Backend::Ephemeral(MemoryStore::new());
    }
}

fn quota_exhausted(error: &io::Error) -> bool {
    matches!(
        error.kind(),
        io::ErrorKind::StorageFull | io::ErrorKind::QuotaExceeded
    )
}

impl SnapshotStore for ProgressStore {
    fn get(&self, key: &str) -> Option<String> {
        match &self.backend {
            Backend::Durable(file) => file.read(key).unwrap_or_else(|e| {
                tracing::warn!(key, error = %e, "storage read failed");
                None
            }),
            Backend::Ephemeral(memory) => memory.get(key),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> bool {
        match &mut self.backend {
            Backend::Durable(file) => match file.write(key, value) {
                Ok(()) => true,
                Err(e) => {
                    // Retry the failed write on the fallback so the
                    // caller still sees success.
                    self.migrate(&e);
                    match &mut self.backend {
                        Backend::Ephemeral(memory) => memory.set(key, value),
                        Backend::Durable(_) => unreachable!("migrate always selects memory"),
                    }
                }
            },
            Backend::Ephemeral(memory) => memory.set(key, value),
        }
    }

    fn remove(&mut self, key: &str) -> bool {
        match &mut self.backend {
            Backend::Durable(file) => match file.delete(key) {
                Ok(()) => true,
                Err(e) => {
                    tracing::warn!(key, error = %e, "storage delete failed");
                    false
                }
            },
            Backend::Ephemeral(memory) => memory.remove(key),
        }
    }

    fn is_available(&self) -> bool {
        matches!(self.backend, Backend::Durable(_))
    }
}
