use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    /// Location of the append-only session log. The persisted state document
    /// itself lives in the working directory; only this log goes under the
    /// per-user state dir.
    pub fn session_log_path() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            let state_dir = PathBuf::from(home)
                .join(".local")
                .join("state")
                .join("toil");
            Some(state_dir.join("sessions.csv"))
        } else {
            ProjectDirs::from("", "", "toil")
                .map(|proj_dirs| proj_dirs.data_local_dir().join("sessions.csv"))
        }
    }
}
