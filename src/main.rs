//! jlock: an interactive demonstration of advisory file locking.
//!
//! This is the main entry point for the `jlock` CLI. It parses arguments,
//! resolves configuration, runs one locking session against the journal,
//! and maps failures to exit codes.

mod checkpoint;
mod cli;
pub mod config;
pub mod error;
pub mod exit_codes;
pub mod journal;
pub mod locks;
mod logging;
mod session;

#[cfg(test)]
mod test_support;

use checkpoint::{Checkpoint, ConsoleCheckpoint, Unattended};
use cli::Cli;
use config::Config;
use error::Result;
use std::io;
use std::process::ExitCode;
use tracing::error;

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    logging::init(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            if err.is_lock_diagnostic() {
                // Fixed diagnostic on stdout, alongside the prompts
                println!("{}", err);
            } else {
                eprintln!("Error: {}", err);
            }
            if let Some(cause) = std::error::Error::source(&err) {
                error!(cause = %cause, "{}", err);
            }

            ExitCode::from(err.exit_code() as u8)
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = Config::resolve(cli.config.as_deref(), &cli.overrides())?;

    let mut checkpoint: Box<dyn Checkpoint> = if config.prompts {
        Box::new(ConsoleCheckpoint::new(io::stdin().lock(), io::stdout()))
    } else {
        Box::new(Unattended)
    };

    let report = session::run(&config, &cli.words, checkpoint.as_mut(), &mut io::stdout())?;
    tracing::debug!(
        rounds = report.rounds,
        entry_len = report.entry_len,
        journal = %config.journal.display(),
        "session complete"
    );
    Ok(())
}
