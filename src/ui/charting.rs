use chrono::NaiveDate;

/// Bar chart data for the daily hours view: one bar per day, labeled MM-DD,
/// with bar height in whole minutes (ratatui bars are integers; minutes keep
/// short sessions visible where rounded hours would flatten to zero).
pub fn daily_hour_bars(days: &[(NaiveDate, f64)]) -> Vec<(String, u64)> {
    days.iter()
        .map(|(date, hours)| {
            let label = date.format("%m-%d").to_string();
            let minutes = (hours * 60.0).round().max(0.0) as u64;
            (label, minutes)
        })
        .collect()
}

/// Y-axis style label for an hours value
pub fn format_hours_label(val: f64) -> String {
    if (val - val.round()).abs() < f64::EPSILON {
        format!("{}", val.round())
    } else {
        format!("{val:.2}")
    }
}
