//! One locking session against the journal.
//!
//! The sequence is fixed: open, then for each round lock, append, sync, and
//! unlock, then close. A checkpoint sits after open, after each sync, and
//! after each unlock. The last `unlocked` checkpoint comes after the handle
//! is closed.
//!
//! Any error returns immediately. The lock guard and the file handle are
//! dropped on the way out, so no lock outlives a failed session.

use crate::checkpoint::{Checkpoint, Stage};
use crate::config::Config;
use crate::error::{JlockError, Result};
use crate::journal::{Journal, entry_line};
use crate::locks;
use std::ffi::OsString;
use std::io::Write;
use tracing::info;

/// Summary of a completed session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionReport {
    /// Lines appended, one per round.
    pub rounds: u32,
    /// Bytes appended per round.
    pub entry_len: usize,
}

/// Run a session.
///
/// # Arguments
///
/// * `config` - Resolved configuration
/// * `words` - Free-text words forming the entry line
/// * `checkpoint` - Driver that releases each stage
/// * `out` - Destination for the `locking...` progress line
pub fn run<W: Write>(
    config: &Config,
    words: &[OsString],
    checkpoint: &mut dyn Checkpoint,
    out: &mut W,
) -> Result<SessionReport> {
    let line = entry_line(words, &config.fallback_line);
    let journal = Journal::open(&config.journal)?;
    checkpoint.wait(Stage::Opened)?;

    for round in 1..=config.rounds {
        writeln!(out, "locking...")
            .and_then(|()| out.flush())
            .map_err(JlockError::CheckpointFailed)?;

        let guard = if config.wait {
            locks::acquire(journal.file(), config.backend)?
        } else {
            locks::try_acquire(journal.file(), config.backend)?.ok_or(JlockError::LockBusy)?
        };

        journal.append(&line)?;
        if config.sync {
            journal.sync()?;
        }
        checkpoint.wait(Stage::Locked)?;

        guard.release()?;
        info!(
            journal = %journal.path().display(),
            round,
            rounds = config.rounds,
            "round complete"
        );

        if round < config.rounds {
            checkpoint.wait(Stage::Unlocked)?;
        }
    }

    journal.close();
    checkpoint.wait(Stage::Unlocked)?;

    Ok(SessionReport {
        rounds: config.rounds,
        entry_len: line.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkpoint::Unattended;
    use crate::locks::LockBackend;
    use crate::test_support::DirGuard;
    use serial_test::serial;
    use std::fs::OpenOptions;
    use std::io;
    use std::path::Path;
    use tempfile::TempDir;

    /// Records the stages it was asked to wait at, optionally failing at one.
    #[derive(Default)]
    struct Recorder {
        stages: Vec<Stage>,
        fail_at: Option<Stage>,
    }

    impl Checkpoint for Recorder {
        fn wait(&mut self, stage: Stage) -> Result<()> {
            self.stages.push(stage);
            if self.fail_at == Some(stage) {
                return Err(JlockError::CheckpointFailed(io::Error::other("operator gone")));
            }
            Ok(())
        }
    }

    fn config_for(path: &Path) -> Config {
        Config {
            journal: path.to_path_buf(),
            prompts: false,
            ..Config::default()
        }
    }

    fn words(items: &[&str]) -> Vec<OsString> {
        items.iter().map(|s| OsString::from(*s)).collect()
    }

    #[test]
    fn test_no_words_appends_fallback_line() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("journal");
        let mut out = Vec::new();

        let report = run(&config_for(&path), &[], &mut Unattended, &mut out).unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"c output\n");
        assert_eq!(out, b"locking...\n");
        assert_eq!(report.rounds, 1);
        assert_eq!(report.entry_len, 9);
    }

    #[test]
    fn test_words_are_joined() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("journal");

        run(
            &config_for(&path),
            &words(&["a", "b", "c"]),
            &mut Unattended,
            &mut io::sink(),
        )
        .unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"a b c\n");
    }

    #[test]
    fn test_existing_content_is_kept() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("journal");
        std::fs::write(&path, b"earlier\n").unwrap();

        run(&config_for(&path), &words(&["later"]), &mut Unattended, &mut io::sink()).unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"earlier\nlater\n");
    }

    #[test]
    fn test_stage_order_single_round() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("journal");
        let mut recorder = Recorder::default();

        run(&config_for(&path), &[], &mut recorder, &mut io::sink()).unwrap();

        assert_eq!(
            recorder.stages,
            vec![Stage::Opened, Stage::Locked, Stage::Unlocked]
        );
    }

    #[test]
    fn test_multiple_rounds() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("journal");
        let config = Config {
            rounds: 3,
            ..config_for(&path)
        };
        let mut recorder = Recorder::default();
        let mut out = Vec::new();

        let report = run(&config, &words(&["tick"]), &mut recorder, &mut out).unwrap();

        assert_eq!(report.rounds, 3);
        assert_eq!(std::fs::read(&path).unwrap(), b"tick\ntick\ntick\n");
        assert_eq!(out, b"locking...\nlocking...\nlocking...\n");
        assert_eq!(
            recorder.stages,
            vec![
                Stage::Opened,
                Stage::Locked,
                Stage::Unlocked,
                Stage::Locked,
                Stage::Unlocked,
                Stage::Locked,
                Stage::Unlocked,
            ]
        );
    }

    #[test]
    fn test_without_sync_still_appends() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("journal");
        let config = Config {
            sync: false,
            ..config_for(&path)
        };

        run(&config, &[], &mut Unattended, &mut io::sink()).unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"c output\n");
    }

    #[test]
    fn test_open_failure_stops_before_any_stage() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing").join("journal");
        let mut recorder = Recorder::default();
        let mut out = Vec::new();

        let err = run(&config_for(&path), &[], &mut recorder, &mut out).unwrap_err();

        assert!(matches!(err, JlockError::OpenFailed { .. }));
        assert!(recorder.stages.is_empty());
        assert!(out.is_empty());
    }

    #[test]
    fn test_no_wait_fails_when_lock_is_held() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("journal");
        let holder = OpenOptions::new().append(true).create(true).open(&path).unwrap();
        let _held = locks::acquire(&holder, LockBackend::Flock).unwrap();

        let config = Config {
            backend: LockBackend::Flock,
            wait: false,
            ..config_for(&path)
        };
        let mut out = Vec::new();
        let err = run(&config, &[], &mut Unattended, &mut out).unwrap_err();

        assert!(matches!(err, JlockError::LockBusy));
        assert_eq!(err.to_string(), "could not obtain lock");
        assert_eq!(out, b"locking...\n");
        assert_eq!(std::fs::read(&path).unwrap(), b"");
    }

    #[test]
    fn test_failed_checkpoint_while_locked_releases_lock() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("journal");
        let config = Config {
            backend: LockBackend::Flock,
            ..config_for(&path)
        };
        let mut recorder = Recorder {
            fail_at: Some(Stage::Locked),
            ..Recorder::default()
        };

        let err = run(&config, &[], &mut recorder, &mut io::sink()).unwrap_err();
        assert!(matches!(err, JlockError::CheckpointFailed(_)));

        // The entry made it to disk and nobody holds the lock anymore
        assert_eq!(std::fs::read(&path).unwrap(), b"c output\n");
        let probe = OpenOptions::new().append(true).open(&path).unwrap();
        assert!(locks::try_acquire(&probe, LockBackend::Flock).unwrap().is_some());
    }

    #[test]
    #[serial]
    fn test_default_journal_lands_in_current_directory() {
        let temp_dir = TempDir::new().unwrap();
        let _guard = DirGuard::new(temp_dir.path());

        let config = Config {
            prompts: false,
            ..Config::default()
        };
        run(&config, &words(&["here"]), &mut Unattended, &mut io::sink()).unwrap();

        assert_eq!(
            std::fs::read(temp_dir.path().join("journal")).unwrap(),
            b"here\n"
        );
    }
}
