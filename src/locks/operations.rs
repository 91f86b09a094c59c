//! Lock acquisition operations.

use super::guard::LockGuard;
use super::types::{LockBackend, LockRequest};
use crate::error::{JlockError, Result};
use rustix::io::Errno;
use std::fs::File;
use tracing::{debug, info};

/// Acquire an exclusive whole-file lock, blocking until the kernel grants it.
///
/// There is no timeout: a holder that never releases blocks this call
/// forever. A signal interrupting the wait is retried.
///
/// # Returns
///
/// * `Ok(LockGuard)` - Lock held until the guard is released or dropped
/// * `Err(JlockError::LockFailed)` - The kernel refused the lock (e.g. `EDEADLK`)
pub fn acquire(file: &File, backend: LockBackend) -> Result<LockGuard<'_>> {
    let request = LockRequest::exclusive(backend);
    debug!(backend = %backend, "waiting for exclusive lock");

    loop {
        match request.apply(file) {
            Ok(()) => break,
            Err(errno) if errno == Errno::INTR => continue,
            Err(errno) => return Err(JlockError::LockFailed(errno.into())),
        }
    }

    let guard = LockGuard::new(file, backend);
    log_acquired(&guard);
    Ok(guard)
}

/// Try to acquire an exclusive whole-file lock without waiting.
///
/// # Returns
///
/// * `Ok(Some(LockGuard))` - Lock acquired
/// * `Ok(None)` - Another holder has a conflicting lock
/// * `Err(JlockError::LockFailed)` - Any other kernel failure
pub fn try_acquire(file: &File, backend: LockBackend) -> Result<Option<LockGuard<'_>>> {
    match LockRequest::exclusive(backend).non_blocking().apply(file) {
        Ok(()) => {
            let guard = LockGuard::new(file, backend);
            log_acquired(&guard);
            Ok(Some(guard))
        }
        Err(errno) if is_contended(errno) => {
            debug!(backend = %backend, "lock is held by another holder");
            Ok(None)
        }
        Err(errno) => Err(JlockError::LockFailed(errno.into())),
    }
}

/// `F_SETLK` reports a conflict as `EACCES` or `EAGAIN`; `flock` uses `EWOULDBLOCK`.
fn is_contended(errno: Errno) -> bool {
    errno == Errno::AGAIN || errno == Errno::WOULDBLOCK || errno == Errno::ACCESS
}

fn log_acquired(guard: &LockGuard<'_>) {
    let holder = guard.holder();
    info!(
        backend = %guard.backend(),
        owner = %holder.owner,
        pid = holder.pid,
        acquired_at = %holder.acquired_at.to_rfc3339(),
        "lock acquired"
    );
}
