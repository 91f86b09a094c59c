//! Lock request model: which primitive, which mode, blocking or not.
//!
//! Every request covers the whole file: start offset 0, length 0, where a
//! zero length means "through end of file, including future appends".

use rustix::fs::FlockOperation;
use serde::{Deserialize, Serialize};
use std::fs::File;

/// Kernel locking primitive used for the journal.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum LockBackend {
    /// POSIX record lock (`fcntl` with `F_SETLKW`/`F_SETLK`), owned by the process.
    #[default]
    Fcntl,
    /// BSD `flock(2)`, owned by the open file description.
    Flock,
}

impl LockBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            LockBackend::Fcntl => "fcntl",
            LockBackend::Flock => "flock",
        }
    }
}

impl std::fmt::Display for LockBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Requested lock state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockMode {
    /// Exclusive write lock: at most one holder across all processes.
    Exclusive,
    /// Drop whatever lock this handle holds.
    Unlock,
}

/// A single lock or unlock call against an open handle.
///
/// Built right before the call and discarded after it returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockRequest {
    pub mode: LockMode,
    pub backend: LockBackend,
    /// Wait for the grant instead of failing when another holder exists.
    pub blocking: bool,
}

impl LockRequest {
    /// Blocking exclusive lock over the whole file.
    pub fn exclusive(backend: LockBackend) -> Self {
        Self {
            mode: LockMode::Exclusive,
            backend,
            blocking: true,
        }
    }

    /// Unlock the whole file.
    pub fn unlock(backend: LockBackend) -> Self {
        Self {
            mode: LockMode::Unlock,
            backend,
            blocking: true,
        }
    }

    /// Same request, failing immediately instead of waiting.
    pub fn non_blocking(self) -> Self {
        Self {
            blocking: false,
            ..self
        }
    }

    pub(super) fn operation(&self) -> FlockOperation {
        match (self.mode, self.blocking) {
            (LockMode::Exclusive, true) => FlockOperation::LockExclusive,
            (LockMode::Exclusive, false) => FlockOperation::NonBlockingLockExclusive,
            (LockMode::Unlock, true) => FlockOperation::Unlock,
            (LockMode::Unlock, false) => FlockOperation::NonBlockingUnlock,
        }
    }

    /// Issue the request to the kernel.
    pub(super) fn apply(&self, file: &File) -> rustix::io::Result<()> {
        let op = self.operation();
        match self.backend {
            LockBackend::Fcntl => rustix::fs::fcntl_lock(file, op),
            LockBackend::Flock => rustix::fs::flock(file, op),
        }
    }
}
