use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::util::epoch_to_local;

/// Minutes of tracked work that earn one coin
pub const MINUTES_PER_COIN: f64 = 15.0;

/// One completed start→stop interval. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Epoch seconds (wall clock) when the stopwatch was started
    pub start_time: f64,
    /// Epoch seconds when the stopwatch was stopped
    pub end_time: f64,
    /// (end_time - start_time) / 3600
    pub hours: f64,
}

impl Session {
    /// Build a session covering `duration_secs` of work starting at
    /// `start_time` epoch seconds.
    pub fn from_span(start_time: f64, duration_secs: f64) -> Self {
        Self {
            start_time,
            end_time: start_time + duration_secs,
            hours: duration_secs / 3600.0,
        }
    }

    /// Local calendar date the session ended on; day-scoped bookkeeping
    /// (rollover, daily reset, the hours chart) all key off this.
    pub fn end_date_local(&self) -> NaiveDate {
        epoch_to_local(self.end_time).date_naive()
    }
}

/// Coins earned for a stretch of work: one per 15-minute block, rounded
/// half away from zero (`f64::round`), so 7.5 minutes already earns a coin.
pub fn coins_for_hours(hours: f64) -> i64 {
    ((hours * 60.0) / MINUTES_PER_COIN).round() as i64
}

/// ISO key used for the daily coin history mapping
pub fn day_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// The full persisted document. Fields absent from an older file load as
/// their zero values.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Ledger {
    #[serde(default)]
    pub total_hours: f64,
    #[serde(default)]
    pub vault: i64,
    #[serde(default)]
    pub sessions: Vec<Session>,
    #[serde(default)]
    pub daily_coins_earned: i64,
    #[serde(default)]
    pub daily_coins_history: BTreeMap<String, i64>,
}

impl Ledger {
    /// Record a completed session: append it, accumulate hours, convert the
    /// duration to coins, and credit vault, today's counter, and the history
    /// entry for `today` (created at 0 first if absent). Returns the coins
    /// earned by this session.
    pub fn record_session(&mut self, session: Session, today: NaiveDate) -> i64 {
        let coins = coins_for_hours(session.hours);

        self.total_hours += session.hours;
        self.sessions.push(session);
        self.vault += coins;
        self.daily_coins_earned += coins;
        *self.daily_coins_history.entry(day_key(today)).or_insert(0) += coins;

        coins
    }

    /// Whether the rollover monitor should reset day-scoped counters: only
    /// when at least one session exists and the most recent one ended on a
    /// different calendar day than `today`. An empty session list never
    /// triggers a rollover.
    pub fn rollover_due(&self, today: NaiveDate) -> bool {
        match self.sessions.last() {
            Some(last) => last.end_date_local() != today,
            None => false,
        }
    }

    /// Zero the day-scoped counters and drop sessions that ended on `today`.
    /// `vault` and `daily_coins_history` are lifetime records and survive.
    pub fn daily_reset(&mut self, today: NaiveDate) {
        self.total_hours = 0.0;
        self.daily_coins_earned = 0;
        self.sessions.retain(|s| s.end_date_local() != today);
    }
}
