use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use crate::app_dirs::AppDirs;
use crate::ledger::Session;
use crate::util::epoch_to_local;

/// Append-only CSV log of completed sessions, one row per stop. Write-only
/// observability: nothing in the app reads it back, the JSON document stays
/// the single source of durable state.
#[derive(Debug, Clone)]
pub struct SessionLog {
    path: PathBuf,
}

impl SessionLog {
    /// Log at the per-user state location; `None` when no home directory can
    /// be resolved, in which case logging is skipped entirely.
    pub fn new() -> Option<Self> {
        AppDirs::session_log_path().map(|path| Self { path })
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn append(&self, session: &Session, coins: i64) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Emit a header only when creating the file
        let needs_header = !self.path.exists();

        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        if needs_header {
            writer
                .write_record(["started", "ended", "hours", "coins"])
                .map_err(io::Error::other)?;
        }

        writer
            .write_record([
                epoch_to_local(session.start_time)
                    .format("%Y-%m-%d %H:%M:%S")
                    .to_string(),
                epoch_to_local(session.end_time)
                    .format("%Y-%m-%d %H:%M:%S")
                    .to_string(),
                format!("{:.4}", session.hours),
                coins.to_string(),
            ])
            .map_err(io::Error::other)?;

        writer.flush()
    }
}
