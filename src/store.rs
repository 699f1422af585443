use log::warn;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::ledger::Ledger;

/// Default location of the persisted document, relative to the working
/// directory (matching the data file the app has always used).
pub const DEFAULT_DATA_FILE: &str = "work_timer_data.json";

pub trait StateStore {
    /// Read errors are never fatal: a missing, unreadable, or malformed file
    /// yields a zero-default ledger.
    fn load(&self) -> Ledger;
    fn save(&self, ledger: &Ledger) -> io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileStateStore {
    path: PathBuf,
}

impl FileStateStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DATA_FILE),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileStateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StateStore for FileStateStore {
    fn load(&self) -> Ledger {
        match fs::read(&self.path) {
            Ok(bytes) => match serde_json::from_slice::<Ledger>(&bytes) {
                Ok(ledger) => ledger,
                Err(e) => {
                    warn!(
                        "state file {} is malformed ({}); starting from zero",
                        self.path.display(),
                        e
                    );
                    Ledger::default()
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                // First run: write the zero document so the file exists from
                // here on out.
                let ledger = Ledger::default();
                if let Err(e) = self.save(&ledger) {
                    warn!(
                        "could not create state file {}: {}",
                        self.path.display(),
                        e
                    );
                }
                ledger
            }
            Err(e) => {
                warn!(
                    "state file {} is unreadable ({}); starting from zero",
                    self.path.display(),
                    e
                );
                Ledger::default()
            }
        }
    }

    /// Serialize the full document pretty-printed with 4-space indentation,
    /// writing through a sibling temp file so the previous valid document is
    /// never left half-overwritten.
    fn save(&self, ledger: &Ledger) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut ser = Serializer::with_formatter(&mut buf, formatter);
        ledger.serialize(&mut ser).map_err(io::Error::from)?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, &buf)?;
        fs::rename(&tmp, &self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{day_key, Session};
    use chrono::Local;
    use tempfile::tempdir;

    fn sample_ledger() -> Ledger {
        let mut ledger = Ledger::default();
        ledger.record_session(
            Session::from_span(1_700_000_000.0, 900.0),
            Local::now().date_naive(),
        );
        ledger
    }

    #[test]
    fn roundtrip_default_ledger() {
        let dir = tempdir().unwrap();
        let store = FileStateStore::with_path(dir.path().join("data.json"));
        let ledger = Ledger::default();
        store.save(&ledger).unwrap();
        assert_eq!(store.load(), ledger);
    }

    #[test]
    fn roundtrip_populated_ledger() {
        let dir = tempdir().unwrap();
        let store = FileStateStore::with_path(dir.path().join("data.json"));
        let ledger = sample_ledger();
        store.save(&ledger).unwrap();
        assert_eq!(store.load(), ledger);
    }

    #[test]
    fn load_missing_file_creates_zero_document() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.json");
        let store = FileStateStore::with_path(&path);

        assert!(!path.exists());
        let ledger = store.load();
        assert_eq!(ledger, Ledger::default());
        // The file exists after first load
        assert!(path.exists());
    }

    #[test]
    fn load_malformed_file_falls_back_to_zero() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.json");
        fs::write(&path, b"{ not json").unwrap();

        let store = FileStateStore::with_path(&path);
        assert_eq!(store.load(), Ledger::default());
    }

    #[test]
    fn load_fills_missing_fields_with_zero_values() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.json");
        // An older document carrying only a subset of fields
        fs::write(&path, br#"{"vault": 7}"#).unwrap();

        let store = FileStateStore::with_path(&path);
        let ledger = store.load();
        assert_eq!(ledger.vault, 7);
        assert_eq!(ledger.total_hours, 0.0);
        assert!(ledger.sessions.is_empty());
        assert_eq!(ledger.daily_coins_earned, 0);
        assert!(ledger.daily_coins_history.is_empty());
    }

    #[test]
    fn save_uses_four_space_indentation() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.json");
        let store = FileStateStore::with_path(&path);
        store.save(&sample_ledger()).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("\n    \"total_hours\""));
        assert!(text.contains("\n    \"vault\""));
    }

    #[test]
    fn save_preserves_exact_field_names() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.json");
        let store = FileStateStore::with_path(&path);

        let mut ledger = sample_ledger();
        let today = Local::now().date_naive();
        ledger.daily_coins_history.insert(day_key(today), 3);
        store.save(&ledger).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        for field in [
            "total_hours",
            "vault",
            "sessions",
            "daily_coins_earned",
            "daily_coins_history",
        ] {
            assert!(value.get(field).is_some(), "missing field {field}");
        }
        let session = &value["sessions"][0];
        assert!(session.get("start_time").is_some());
        assert!(session.get("end_time").is_some());
        assert!(session.get("hours").is_some());
    }

    #[test]
    fn save_leaves_no_temp_file_behind() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.json");
        let store = FileStateStore::with_path(&path);
        store.save(&Ledger::default()).unwrap();

        let entries: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("data.json")]);
    }

    #[test]
    fn save_to_unwritable_path_reports_error() {
        // A regular file where a directory is needed makes the write fail
        // regardless of privileges
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"").unwrap();

        let store = FileStateStore::with_path(blocker.join("data.json"));
        assert!(store.save(&Ledger::default()).is_err());
    }
}
