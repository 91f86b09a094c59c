//! Config struct definition and default implementation.

use crate::locks::LockBackend;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for a jlock session.
///
/// This struct represents the contents of an optional YAML config file.
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // =========================================================================
    // Journal settings
    // =========================================================================
    /// Path of the journal file, relative to the current directory unless absolute.
    #[serde(default = "default_journal")]
    pub journal: PathBuf,

    /// Line appended when no words are given (without the trailing newline).
    #[serde(default = "default_fallback_line")]
    pub fallback_line: String,

    /// Whether to fsync after each append, before releasing the lock.
    #[serde(default = "default_true")]
    pub sync: bool,

    // =========================================================================
    // Lock settings
    // =========================================================================
    /// Kernel locking primitive.
    #[serde(default)]
    pub backend: LockBackend,

    /// Whether to block until the lock is granted (otherwise fail when busy).
    #[serde(default = "default_true")]
    pub wait: bool,

    /// Number of lock/append/unlock rounds on the same open handle.
    #[serde(default = "default_rounds")]
    pub rounds: u32,

    // =========================================================================
    // Interaction settings
    // =========================================================================
    /// Whether to stop at each stage and wait for operator input.
    #[serde(default = "default_true")]
    pub prompts: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            journal: default_journal(),
            fallback_line: default_fallback_line(),
            sync: default_true(),
            backend: LockBackend::default(),
            wait: default_true(),
            rounds: default_rounds(),
            prompts: default_true(),
        }
    }
}

/// Values given on the command line, each overriding the config file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub journal: Option<PathBuf>,
    pub backend: Option<LockBackend>,
    pub rounds: Option<u32>,
    pub no_sync: bool,
    pub no_prompt: bool,
    pub no_wait: bool,
}

pub(crate) fn default_journal() -> PathBuf {
    PathBuf::from("journal")
}

pub(crate) fn default_fallback_line() -> String {
    "c output".to_string()
}

pub(crate) fn default_rounds() -> u32 {
    1
}

pub(crate) fn default_true() -> bool {
    true
}
