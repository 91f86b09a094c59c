//! CLI argument parsing for jlock.
//!
//! Uses clap derive macros for declarative argument definitions. Options
//! must come before the free-text words; everything from the first word on
//! is taken verbatim, hyphens included.

use crate::config::ConfigOverrides;
use crate::locks::LockBackend;
use clap::{ArgAction, Parser};
use std::ffi::OsString;
use std::path::PathBuf;

/// jlock: append a line to a shared journal under an exclusive advisory lock.
///
/// Opens the journal, locks the whole file, appends the given words (or a
/// fallback line), syncs, and unlocks, pausing at each stage for enter so
/// several invocations can be raced against each other by hand.
#[derive(Parser, Debug)]
#[command(name = "jlock")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Journal file to append to.
    #[arg(short, long, value_name = "PATH")]
    pub journal: Option<PathBuf>,

    /// YAML config file.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Kernel locking primitive.
    #[arg(long, value_enum)]
    pub backend: Option<LockBackend>,

    /// Number of lock/append/unlock rounds.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub rounds: Option<u32>,

    /// Skip the fsync before releasing the lock.
    #[arg(long)]
    pub no_sync: bool,

    /// Run without stopping at the prompts.
    #[arg(long)]
    pub no_prompt: bool,

    /// Fail instead of waiting when another process holds the lock.
    #[arg(long)]
    pub no_wait: bool,

    /// Increase diagnostic output on stderr (repeatable).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Words forming the journal entry.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "WORDS")]
    pub words: Vec<OsString>,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// Flags that override config file values.
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            journal: self.journal.clone(),
            backend: self.backend,
            rounds: self.rounds,
            no_sync: self.no_sync,
            no_prompt: self.no_prompt,
            no_wait: self.no_wait,
        }
    }
}
