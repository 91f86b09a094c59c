//! The journal: an append-only file shared between invocations.
//!
//! The journal is opened write-only with `O_APPEND | O_CREAT`, so every write
//! lands at the current end of file and existing content is never truncated.
//! This module never reads the file back.

use crate::error::{JlockError, Result};
use std::ffi::OsString;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::os::unix::ffi::OsStrExt;
use std::path::{Path, PathBuf};
use tracing::debug;

/// An open journal handle.
#[derive(Debug)]
pub struct Journal {
    path: PathBuf,
    file: File,
}

impl Journal {
    /// Open the journal for appending, creating it if missing.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(path)
            .map_err(|source| JlockError::OpenFailed {
                path: path.to_path_buf(),
                source,
            })?;

        debug!(path = %path.display(), "journal opened");
        Ok(Self {
            path: path.to_path_buf(),
            file,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The underlying handle, for taking locks on it.
    pub fn file(&self) -> &File {
        &self.file
    }

    /// Append one entry line in a single write.
    pub fn append(&self, line: &[u8]) -> Result<()> {
        (&self.file)
            .write_all(line)
            .map_err(JlockError::WriteFailed)?;
        debug!(bytes = line.len(), "entry appended");
        Ok(())
    }

    /// Force appended data to stable storage.
    pub fn sync(&self) -> Result<()> {
        self.file.sync_all().map_err(JlockError::SyncFailed)?;
        debug!("journal synced");
        Ok(())
    }

    /// Close the handle.
    pub fn close(self) {
        drop(self.file);
        debug!(path = %self.path.display(), "journal closed");
    }
}

/// Build the bytes appended for one invocation.
///
/// Words are joined with single spaces and terminated by a newline. With no
/// words, `fallback` plus a newline is used instead. Word bytes are kept
/// verbatim, including non-UTF-8 sequences.
pub fn entry_line(words: &[OsString], fallback: &str) -> Vec<u8> {
    if words.is_empty() {
        let mut line = fallback.as_bytes().to_vec();
        line.push(b'\n');
        return line;
    }

    let mut line = Vec::new();
    for (i, word) in words.iter().enumerate() {
        if i > 0 {
            line.push(b' ');
        }
        line.extend_from_slice(word.as_bytes());
    }
    line.push(b'\n');
    line
}
