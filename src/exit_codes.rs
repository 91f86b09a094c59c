//! Exit code constants for the jlock CLI.
//!
//! - 0: Success
//! - 1: Lock could not be obtained or released, or any other runtime failure
//!
//! Argument parsing errors are reported by clap with its own exit code (2).

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// The lock could not be obtained (or was busy under `--no-wait`).
pub const LOCK_FAILURE: i32 = 1;

/// The lock could not be released.
pub const UNLOCK_FAILURE: i32 = 1;

/// Open, write, sync, checkpoint, or configuration failure.
pub const RUNTIME_FAILURE: i32 = 1;
