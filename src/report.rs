use chrono::{Duration, NaiveDate};
use itertools::Itertools;
use std::collections::HashMap;

use crate::ledger::{Ledger, Session};

/// How many days of coin history the sessions view shows
pub const HISTORY_DAYS: usize = 7;
/// How many recent sessions the sessions view shows
pub const RECENT_SESSIONS: usize = 10;
/// How many days the hours chart covers
pub const CHART_DAYS: usize = 7;

/// The `n` most recent daily coin totals, newest first.
pub fn recent_daily_history(ledger: &Ledger, n: usize) -> Vec<(String, i64)> {
    ledger
        .daily_coins_history
        .iter()
        .sorted_by(|a, b| b.0.cmp(a.0))
        .take(n)
        .map(|(date, coins)| (date.clone(), *coins))
        .collect()
}

/// The last `n` sessions in original (chronological) order.
pub fn recent_sessions(ledger: &Ledger, n: usize) -> &[Session] {
    let start = ledger.sessions.len().saturating_sub(n);
    &ledger.sessions[start..]
}

/// Hours worked per calendar day over the last `n` days including `today`,
/// oldest to newest. A session counts toward the day it ended on; days
/// without sessions report 0. The output feeds the bar chart directly.
pub fn daily_hours_last_n_days(
    ledger: &Ledger,
    today: NaiveDate,
    n: usize,
) -> Vec<(NaiveDate, f64)> {
    let mut by_day: HashMap<NaiveDate, f64> = HashMap::new();
    for session in &ledger.sessions {
        *by_day.entry(session.end_date_local()).or_insert(0.0) += session.hours;
    }

    (0..n as i64)
        .rev()
        .map(|offset| {
            let day = today - Duration::days(offset);
            (day, by_day.get(&day).copied().unwrap_or(0.0))
        })
        .collect()
}
