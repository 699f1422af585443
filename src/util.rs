use chrono::{DateTime, Local};
use std::time::{SystemTime, UNIX_EPOCH};

/// Zero-padded HH:MM:SS for the elapsed display
pub fn format_hms(total_secs: u64) -> String {
    let (hours, remainder) = (total_secs / 3600, total_secs % 3600);
    let (minutes, seconds) = (remainder / 60, remainder % 60);
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

/// Hours shown to two decimal places everywhere in the UI
pub fn format_hours(hours: f64) -> String {
    format!("{:.2}", hours)
}

pub fn epoch_secs(t: SystemTime) -> f64 {
    t.duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs_f64()
}

/// Interpret a stored epoch-seconds value in the local timezone
pub fn epoch_to_local(secs: f64) -> DateTime<Local> {
    DateTime::from_timestamp(secs as i64, 0)
        .unwrap_or_default()
        .with_timezone(&Local)
}
