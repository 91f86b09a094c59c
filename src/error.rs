//! Error types for the jlock CLI.
//!
//! Uses thiserror for derive macros. The two lock failures render as the
//! fixed diagnostics printed on stdout; the OS cause stays available
//! through `source()`.

use crate::exit_codes;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for jlock operations.
#[derive(Error, Debug)]
pub enum JlockError {
    /// The journal file could not be opened.
    #[error("failed to open journal '{}': {source}", .path.display())]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The kernel refused the exclusive lock.
    #[error("could not obtain lock")]
    LockFailed(#[source] io::Error),

    /// Another holder has the lock and waiting was disabled.
    #[error("could not obtain lock")]
    LockBusy,

    /// The kernel refused the unlock.
    #[error("could not release lock")]
    UnlockFailed(#[source] io::Error),

    /// Appending the entry line failed.
    #[error("failed to write journal entry: {0}")]
    WriteFailed(#[source] io::Error),

    /// The durability flush failed.
    #[error("failed to sync journal: {0}")]
    SyncFailed(#[source] io::Error),

    /// Reading the operator signal or writing a prompt failed.
    #[error("checkpoint failed: {0}")]
    CheckpointFailed(#[source] io::Error),

    /// Config file unreadable, unparsable, or invalid.
    #[error("{0}")]
    ConfigError(String),
}

impl JlockError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            JlockError::LockFailed(_) | JlockError::LockBusy => exit_codes::LOCK_FAILURE,
            JlockError::UnlockFailed(_) => exit_codes::UNLOCK_FAILURE,
            JlockError::OpenFailed { .. }
            | JlockError::WriteFailed(_)
            | JlockError::SyncFailed(_)
            | JlockError::CheckpointFailed(_)
            | JlockError::ConfigError(_) => exit_codes::RUNTIME_FAILURE,
        }
    }

    /// Whether this error is reported as a fixed diagnostic line on stdout.
    pub fn is_lock_diagnostic(&self) -> bool {
        matches!(
            self,
            JlockError::LockFailed(_) | JlockError::LockBusy | JlockError::UnlockFailed(_)
        )
    }
}

/// Result type alias for jlock operations.
pub type Result<T> = std::result::Result<T, JlockError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    fn os_error() -> io::Error {
        io::Error::other("resource deadlock avoided")
    }

    #[test]
    fn lock_errors_use_fixed_diagnostics() {
        assert_eq!(JlockError::LockFailed(os_error()).to_string(), "could not obtain lock");
        assert_eq!(JlockError::LockBusy.to_string(), "could not obtain lock");
        assert_eq!(
            JlockError::UnlockFailed(os_error()).to_string(),
            "could not release lock"
        );
    }

    #[test]
    fn lock_errors_keep_os_cause() {
        let err = JlockError::LockFailed(os_error());
        assert!(err.source().is_some());
        assert!(JlockError::LockBusy.source().is_none());
    }

    #[test]
    fn every_failure_exits_with_one() {
        let errors = [
            JlockError::OpenFailed {
                path: PathBuf::from("journal"),
                source: os_error(),
            },
            JlockError::LockFailed(os_error()),
            JlockError::LockBusy,
            JlockError::UnlockFailed(os_error()),
            JlockError::WriteFailed(os_error()),
            JlockError::SyncFailed(os_error()),
            JlockError::CheckpointFailed(os_error()),
            JlockError::ConfigError("bad".to_string()),
        ];
        for err in &errors {
            assert_eq!(err.exit_code(), 1, "{err:?}");
        }
    }

    #[test]
    fn only_lock_errors_are_stdout_diagnostics() {
        assert!(JlockError::LockBusy.is_lock_diagnostic());
        assert!(JlockError::UnlockFailed(os_error()).is_lock_diagnostic());
        assert!(!JlockError::SyncFailed(os_error()).is_lock_diagnostic());
        assert!(!JlockError::ConfigError("x".to_string()).is_lock_diagnostic());
    }

    #[test]
    fn open_error_names_the_path() {
        let err = JlockError::OpenFailed {
            path: PathBuf::from("/nope/journal"),
            source: os_error(),
        };
        assert!(err.to_string().contains("/nope/journal"));
    }
}
