//! Rendezvous points between the session and whoever drives it.
//!
//! At each stage the session stops and waits for a signal: an operator
//! pressing enter at a console, or nothing at all when running unattended.

use crate::error::{JlockError, Result};
use std::io::{BufRead, Write};

/// Points in a session where it waits for a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Journal open, lock not yet requested.
    Opened,
    /// Entry appended and synced, lock still held.
    Locked,
    /// Lock released.
    Unlocked,
}

impl Stage {
    pub fn prompt(&self) -> &'static str {
        match self {
            Stage::Opened => "opened > ",
            Stage::Locked => "locked > ",
            Stage::Unlocked => "unlocked > ",
        }
    }
}

/// Blocks the session until the driver signals it may continue.
pub trait Checkpoint {
    fn wait(&mut self, stage: Stage) -> Result<()>;
}

/// Console driver: prints the stage prompt and waits for one line of input.
///
/// End of input counts as a signal, so a closed stdin runs straight through.
pub struct ConsoleCheckpoint<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ConsoleCheckpoint<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Checkpoint for ConsoleCheckpoint<R, W> {
    fn wait(&mut self, stage: Stage) -> Result<()> {
        self.output
            .write_all(stage.prompt().as_bytes())
            .and_then(|()| self.output.flush())
            .map_err(JlockError::CheckpointFailed)?;

        let mut line = String::new();
        self.input
            .read_line(&mut line)
            .map_err(JlockError::CheckpointFailed)?;
        Ok(())
    }
}

/// Driver for `--no-prompt`: never waits.
#[derive(Debug, Default)]
pub struct Unattended;

impl Checkpoint for Unattended {
    fn wait(&mut self, _stage: Stage) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn prompts_match_stages() {
        assert_eq!(Stage::Opened.prompt(), "opened > ");
        assert_eq!(Stage::Locked.prompt(), "locked > ");
        assert_eq!(Stage::Unlocked.prompt(), "unlocked > ");
    }

    #[test]
    fn console_prints_prompt_and_consumes_one_line() {
        let mut input = Cursor::new(b"go\n\nrest\n".to_vec());
        let mut output = Vec::new();
        {
            let mut checkpoint = ConsoleCheckpoint::new(&mut input, &mut output);
            checkpoint.wait(Stage::Opened).unwrap();
            checkpoint.wait(Stage::Locked).unwrap();
        }

        assert_eq!(output, b"opened > locked > ");
        // Third line is still unread
        assert_eq!(input.position(), 4);
    }

    #[test]
    fn console_treats_end_of_input_as_signal() {
        let mut output = Vec::new();
        let mut checkpoint = ConsoleCheckpoint::new(Cursor::new(Vec::new()), &mut output);
        checkpoint.wait(Stage::Unlocked).unwrap();
        checkpoint.wait(Stage::Unlocked).unwrap();
        drop(checkpoint);

        assert_eq!(output, b"unlocked > unlocked > ");
    }

    #[test]
    fn unattended_never_blocks() {
        let mut checkpoint = Unattended;
        for stage in [Stage::Opened, Stage::Locked, Stage::Unlocked] {
            checkpoint.wait(stage).unwrap();
        }
    }
}
