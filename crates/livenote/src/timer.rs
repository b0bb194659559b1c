//! The stopwatch: a pure timer state machine plus its async tick source.
//!
//! `Timer` holds the elapsed-seconds counter and the running flag; it never
//! touches real time. `Ticker` is the single periodic callback that drives
//! it, one tick per second over a channel, with a stop signal that releases
//! the task immediately.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::model::format_elapsed;

/// Pure stopwatch state: elapsed whole seconds and a running flag.
///
/// Elapsed seconds survive a stop; only [`Timer::reset`] returns them to
/// zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timer {
    elapsed_seconds: u64,
    running: bool,
}

impl Timer {
    /// Create a stopped timer at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a stopped timer at the given elapsed count (used on rehydrate).
    #[must_use]
    pub fn with_elapsed(elapsed_seconds: u64) -> Self {
        Self {
            elapsed_seconds,
            running: false,
        }
    }

    /// Start the timer. Returns `false` (no-op) if already running.
    pub fn start(&mut self) -> bool {
        if self.running {
            return false;
        }
        self.running = true;
        true
    }

    /// Stop the timer. Returns `false` (no-op) if not running.
    ///
    /// The elapsed count is kept; a later start resumes from it.
    pub fn stop(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.running = false;
        true
    }

    /// Advance by one second. Ignored while stopped, so a tick that was
    /// already in flight when the timer stopped cannot advance the count.
    pub fn tick(&mut self) {
        if self.running {
            self.elapsed_seconds += 1;
        }
    }

    /// Return to zero, stopped.
    pub fn reset(&mut self) {
        self.elapsed_seconds = 0;
        self.running = false;
    }

    /// The elapsed whole seconds.
    #[must_use]
    pub fn elapsed(&self) -> u64 {
        self.elapsed_seconds
    }

    /// Whether the timer is running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// The elapsed count formatted as `HH:MM:SS`.
    #[must_use]
    pub fn formatted(&self) -> String {
        format_elapsed(self.elapsed_seconds)
    }
}

/// The single periodic tick source behind a running [`Timer`].
///
/// At most one tick task is alive at a time: `start` while running is a
/// no-op, and `stop` signals the task, aborts it, and drops the handle so
/// no orphaned tick can fire afterwards.
#[derive(Debug, Default)]
pub struct Ticker {
    handle: Option<JoinHandle<()>>,
    stop_signal: Arc<AtomicBool>,
}

impl Ticker {
    /// Create an idle ticker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start emitting one tick per second over `tx`.
    ///
    /// Returns `false` (no-op) if the ticker is already running.
    pub fn start(&mut self, tx: mpsc::Sender<()>) -> bool {
        self.start_with_period(tx, Duration::from_secs(1))
    }

    /// Start with a custom period. Exists so tests don't wait on wall-clock
    /// seconds.
    pub fn start_with_period(&mut self, tx: mpsc::Sender<()>, period: Duration) -> bool {
        if self.is_running() {
            debug!("ticker already running; ignoring start");
            return false;
        }
        self.stop_signal.store(false, Ordering::SeqCst);
        let stop_signal = Arc::clone(&self.stop_signal);
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            // The first interval tick completes immediately; consume it so
            // the first emitted tick lands a full period after start.
            interval.tick().await;
            loop {
                interval.tick().await;
                if stop_signal.load(Ordering::SeqCst) {
                    break;
                }
                if tx.send(()).await.is_err() {
                    break;
                }
            }
        });
        self.handle = Some(handle);
        true
    }

    /// Stop the tick task. Returns `false` (no-op) if not running.
    pub fn stop(&mut self) -> bool {
        let Some(handle) = self.handle.take() else {
            return false;
        };
        self.stop_signal.store(true, Ordering::SeqCst);
        handle.abort();
        debug!("ticker stopped");
        true
    }

    /// Whether a tick task is currently alive.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_starts_stopped_at_zero() {
        let timer = Timer::new();
        assert!(!timer.is_running());
        assert_eq!(timer.elapsed(), 0);
        assert_eq!(timer.formatted(), "00:00:00");
    }

    #[test]
    fn test_timer_start_twice_is_noop() {
        let mut timer = Timer::new();
        assert!(timer.start());
        assert!(!timer.start());
        assert!(timer.is_running());
    }

    #[test]
    fn test_timer_stop_when_stopped_is_noop() {
        let mut timer = Timer::new();
        assert!(!timer.stop());
    }

    #[test]
    fn test_timer_single_source_counts_once() {
        // Starting twice must not double the rate: with one tick source
        // driving it, three ticks mean three seconds.
        let mut timer = Timer::new();
        timer.start();
        timer.start();
        timer.tick();
        timer.tick();
        timer.tick();
        assert_eq!(timer.elapsed(), 3);
    }

    #[test]
    fn test_timer_tick_ignored_while_stopped() {
        let mut timer = Timer::new();
        timer.tick();
        assert_eq!(timer.elapsed(), 0);

        timer.start();
        timer.tick();
        timer.stop();
        // A tick landing after stop must not advance the count.
        timer.tick();
        assert_eq!(timer.elapsed(), 1);
    }

    #[test]
    fn test_timer_elapsed_survives_stop() {
        let mut timer = Timer::new();
        timer.start();
        timer.tick();
        timer.tick();
        timer.stop();
        assert_eq!(timer.elapsed(), 2);

        timer.start();
        timer.tick();
        assert_eq!(timer.elapsed(), 3);
    }

    #[test]
    fn test_timer_reset() {
        let mut timer = Timer::new();
        timer.start();
        timer.tick();
        timer.reset();
        assert_eq!(timer.elapsed(), 0);
        assert!(!timer.is_running());
    }

    #[test]
    fn test_timer_with_elapsed() {
        let timer = Timer::with_elapsed(3725);
        assert_eq!(timer.formatted(), "01:02:05");
        assert!(!timer.is_running());
    }

    #[tokio::test]
    async fn test_ticker_start_twice_is_noop() {
        let (tx, _rx) = mpsc::channel(8);
        let mut ticker = Ticker::new();
        assert!(ticker.start(tx.clone()));
        assert!(!ticker.start(tx));
        assert!(ticker.is_running());
        ticker.stop();
    }

    #[tokio::test]
    async fn test_ticker_stop_clears_handle() {
        let (tx, _rx) = mpsc::channel(8);
        let mut ticker = Ticker::new();
        ticker.start(tx);
        assert!(ticker.stop());
        assert!(!ticker.is_running());
        // A second stop has nothing left to clear.
        assert!(!ticker.stop());
    }

    #[tokio::test]
    async fn test_ticker_emits_ticks() {
        let (tx, mut rx) = mpsc::channel(8);
        let mut ticker = Ticker::new();
        ticker.start_with_period(tx, Duration::from_millis(5));

        let tick = tokio::time::timeout(Duration::from_secs(2), rx.recv()).await;
        assert!(tick.is_ok(), "expected a tick within the timeout");

        ticker.stop();
    }

    #[tokio::test]
    async fn test_ticker_restart_after_stop() {
        let (tx, mut rx) = mpsc::channel(8);
        let mut ticker = Ticker::new();
        ticker.start_with_period(tx.clone(), Duration::from_millis(5));
        ticker.stop();

        assert!(ticker.start_with_period(tx, Duration::from_millis(5)));
        let tick = tokio::time::timeout(Duration::from_secs(2), rx.recv()).await;
        assert!(tick.is_ok());
        ticker.stop();
    }
}
