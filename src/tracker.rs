use std::time::{Duration, Instant, SystemTime};

use crate::ledger::Session;
use crate::util::epoch_secs;

/// Manual start/stop stopwatch. Two states: Idle (no anchor) and Running.
///
/// The wall-clock start instant is what gets recorded in the session; the
/// monotonic anchor drives the elapsed display and the duration math so a
/// system clock adjustment mid-session cannot produce a negative duration.
#[derive(Debug, Default)]
pub struct Tracker {
    running: Option<RunningSpan>,
}

#[derive(Debug, Clone, Copy)]
struct RunningSpan {
    started_wall: SystemTime,
    anchor: Instant,
}

impl Tracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// Idle → Running. A no-op while already Running.
    pub fn start(&mut self) {
        if self.running.is_none() {
            self.running = Some(RunningSpan {
                started_wall: SystemTime::now(),
                anchor: Instant::now(),
            });
        }
    }

    /// Running → Idle, yielding the completed interval. Returns `None`
    /// (and stays Idle) when no stopwatch is running.
    pub fn stop(&mut self) -> Option<Session> {
        let span = self.running.take()?;
        let duration = span.anchor.elapsed();
        Some(Session::from_span(
            epoch_secs(span.started_wall),
            duration.as_secs_f64(),
        ))
    }

    /// Elapsed time for the display refresh; zero while Idle. No side effects.
    pub fn elapsed(&self) -> Duration {
        match self.running {
            Some(span) => span.anchor.elapsed(),
            None => Duration::ZERO,
        }
    }
}
