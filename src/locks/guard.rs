//! RAII lock guard implementation.

use super::metadata::LockHolder;
use super::types::{LockBackend, LockRequest};
use crate::error::{JlockError, Result};
use std::fs::File;
use tracing::{info, warn};

/// RAII guard for an exclusive journal lock.
///
/// When dropped, the lock is released. If the unlock fails, a warning is
/// logged but no panic occurs. The guard borrows the file, so the lock can
/// never outlive the handle it was taken on.
#[derive(Debug)]
pub struct LockGuard<'f> {
    file: &'f File,

    backend: LockBackend,

    holder: LockHolder,

    /// Whether the lock has been released manually.
    released: bool,
}

impl<'f> LockGuard<'f> {
    pub(super) fn new(file: &'f File, backend: LockBackend) -> Self {
        Self {
            file,
            backend,
            holder: LockHolder::current(),
            released: false,
        }
    }

    pub fn backend(&self) -> LockBackend {
        self.backend
    }

    pub fn holder(&self) -> &LockHolder {
        &self.holder
    }

    /// Manually release the lock.
    ///
    /// Use this on the normal path so an unlock failure can be reported;
    /// the drop path can only log it.
    pub fn release(mut self) -> Result<()> {
        self.released = true;
        LockRequest::unlock(self.backend)
            .apply(self.file)
            .map_err(|errno| JlockError::UnlockFailed(errno.into()))?;
        info!(
            backend = %self.backend,
            held_for = %self.holder.held_for_string(),
            "lock released"
        );
        Ok(())
    }
}

impl Drop for LockGuard<'_> {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        match LockRequest::unlock(self.backend).apply(self.file) {
            Ok(()) => info!(
                backend = %self.backend,
                held_for = %self.holder.held_for_string(),
                "lock released on early exit"
            ),
            Err(errno) => warn!(
                backend = %self.backend,
                error = %std::io::Error::from(errno),
                "failed to release lock"
            ),
        }
    }
}
