use log::debug;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::runtime::AppEvent;

/// How often the monitor wakes up to check for a date change
pub const ROLLOVER_PERIOD: Duration = Duration::from_secs(60);

/// Background poller for the daily rollover.
///
/// The thread owns no state: it just emits `AppEvent::RolloverTick` into the
/// main event channel once per period, and the controller performs the date
/// check and any reset through the same single-threaded mutation path as user
/// commands. The stop flag is checked once per tick boundary (never
/// mid-sleep), so shutdown latency is bounded by one period.
#[derive(Debug)]
pub struct RolloverMonitor {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl RolloverMonitor {
    pub fn spawn(tx: Sender<AppEvent>, period: Duration) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = stop.clone();

        let handle = thread::spawn(move || loop {
            thread::sleep(period);
            if flag.load(Ordering::Relaxed) {
                debug!("rollover monitor stopping");
                break;
            }
            if tx.send(AppEvent::RolloverTick).is_err() {
                // Main loop is gone
                break;
            }
        });

        Self {
            stop,
            handle: Some(handle),
        }
    }

    /// Request the monitor to stop at its next tick boundary. Does not block.
    pub fn stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }

    /// Stop and wait for the thread to exit (tests use short periods).
    pub fn join(mut self) {
        self.stop();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for RolloverMonitor {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn test_monitor_emits_ticks() {
        let (tx, rx) = mpsc::channel();
        let monitor = RolloverMonitor::spawn(tx, Duration::from_millis(5));

        let event = rx
            .recv_timeout(Duration::from_secs(1))
            .expect("monitor should tick");
        assert!(matches!(event, AppEvent::RolloverTick));

        monitor.join();
    }

    #[test]
    fn test_monitor_stops_at_tick_boundary() {
        let (tx, rx) = mpsc::channel();
        let monitor = RolloverMonitor::spawn(tx, Duration::from_millis(5));
        monitor.join();

        // Drain whatever was sent before the flag was observed; the channel
        // must then stay silent because the thread has exited.
        while rx.try_recv().is_ok() {}
        assert!(rx.recv_timeout(Duration::from_millis(50)).is_err());
    }

    #[test]
    fn test_monitor_exits_when_channel_closes() {
        let (tx, rx) = mpsc::channel();
        let monitor = RolloverMonitor::spawn(tx, Duration::from_millis(5));
        drop(rx);

        // The send failure terminates the loop; join must not hang.
        monitor.join();
    }
}
