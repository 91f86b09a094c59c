//! Lock holder metadata, kept in memory for diagnostics.

use chrono::{DateTime, Duration, Utc};

/// Who holds a journal lock and since when.
#[derive(Debug, Clone)]
pub struct LockHolder {
    /// Owner of the lock (e.g., `user@HOST`).
    pub owner: String,

    /// Process ID of the lock holder.
    pub pid: u32,

    /// When the kernel granted the lock.
    pub acquired_at: DateTime<Utc>,
}

impl LockHolder {
    /// Holder record for this process, stamped now.
    pub fn current() -> Self {
        Self {
            owner: get_owner_string(),
            pid: std::process::id(),
            acquired_at: Utc::now(),
        }
    }

    /// How long the lock has been held.
    pub fn held_for(&self) -> Duration {
        Utc::now().signed_duration_since(self.acquired_at)
    }

    /// Format the hold time as a human-readable string.
    pub fn held_for_string(&self) -> String {
        let held = self.held_for();
        let seconds = held.num_seconds();
        let minutes = held.num_minutes();
        let hours = held.num_hours();

        if hours > 0 {
            format!("{}h {}m", hours, minutes % 60)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds % 60)
        } else {
            format!("{}s", seconds)
        }
    }
}

/// Get the owner string for holder metadata.
pub(super) fn get_owner_string() -> String {
    let user = std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string());

    let host = hostname::get()
        .map(|h| h.to_string_lossy().to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    format!("{}@{}", user, host)
}
