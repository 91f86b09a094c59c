//! Locking subsystem for jlock.
//!
//! This module wraps the kernel's advisory locks as a scoped capability:
//! acquire an exclusive lock over the whole journal file, blocking until
//! granted, held until the returned guard is released or dropped.
//!
//! # Backends
//!
//! - `fcntl`: POSIX record lock over offset 0, length 0 (to end of file).
//!   Locks belong to the process, so two handles in one process never
//!   conflict with each other.
//! - `flock`: BSD whole-file lock. Locks belong to the open file
//!   description, so two handles in one process do conflict.
//!
//! Both are advisory: they only exclude processes that also take the lock.
//!
//! # RAII Guards
//!
//! Locks are managed through RAII guard objects that automatically release
//! the lock when dropped. If the unlock fails during drop, a warning is
//! logged but the program does not crash.

mod guard;
mod metadata;
mod operations;
mod types;


// Re-export public API
pub use guard::LockGuard;
pub use metadata::LockHolder;
pub use operations::{acquire, try_acquire};
pub use types::{LockBackend, LockMode, LockRequest};
