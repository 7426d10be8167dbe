//! # Timer Module - Elapsed-time ticker
//!
//! A [`Ticker`] is the session's repeating timer. It does not spawn anything: the host polls it
//! from its event loop, and the ticker reports when an interval has passed.
//!
//! Starting and stopping are idempotent. Starting a running ticker is refused and logged, since a
//! second start means some code path activated the session twice. Dropping a running ticker
//! stops it, so every start is matched by exactly one stop on every exit path.

use web_time::{Duration, Instant};

/// A pollable, idempotently started and stopped interval timer
#[derive(Debug)]
pub struct Ticker {
    interval: Duration,
    /// The instant of the last tick, `Some` while running
    last_tick: Option<Instant>,
    /// Accepted starts over the ticker's lifetime
    starts: usize,
}

impl Ticker {
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_tick: None,
            starts: 0,
        }
    }

    pub const fn interval(&self) -> Duration {
        self.interval
    }

    pub const fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    pub const fn is_running(&self) -> bool {
        self.last_tick.is_some()
    }

    /// How many times the ticker has been started
    pub const fn starts(&self) -> usize {
        self.starts
    }

    /// Start ticking from `now`
    ///
    /// Returns false, and changes nothing, if the ticker is already running.
    pub fn start(&mut self, now: Instant) -> bool {
        if self.is_running() {
            log::warn!("Ticker is already running, ignoring duplicate start");
            return false;
        }

        self.last_tick = Some(now);
        self.starts += 1;
        log::debug!("Ticker started with an interval of {:?}", self.interval);
        true
    }

    /// Stop ticking
    ///
    /// Returns false if the ticker was not running.
    pub fn stop(&mut self) -> bool {
        if self.last_tick.take().is_none() {
            return false;
        }

        log::debug!("Ticker stopped");
        true
    }

    /// Returns true if an interval has passed since the last tick
    ///
    /// Missed intervals are not replayed: a late poll produces a single tick, and the next
    /// interval is counted from `now`.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(last_tick) = self.last_tick else {
            return false;
        };

        if now.saturating_duration_since(last_tick) < self.interval {
            return false;
        }

        self.last_tick = Some(now);
        true
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        if self.is_running() {
            log::debug!("Dropping a running ticker");
            self.stop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_millis(100);

    #[test]
    fn test_start_is_idempotent() {
        let mut ticker = Ticker::new(INTERVAL);
        let now = Instant::now();

        assert!(ticker.start(now));
        assert!(!ticker.start(now + INTERVAL));
        assert!(ticker.is_running());
        assert_eq!(ticker.starts(), 1);
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut ticker = Ticker::new(INTERVAL);
        assert!(!ticker.stop());

        ticker.start(Instant::now());
        assert!(ticker.stop());
        assert!(!ticker.stop());
        assert!(!ticker.is_running());
    }

    #[test]
    fn test_restart_after_stop() {
        let mut ticker = Ticker::new(INTERVAL);
        let now = Instant::now();

        ticker.start(now);
        ticker.stop();
        assert!(ticker.start(now));
        assert_eq!(ticker.starts(), 2);
    }

    #[test]
    fn test_poll_cadence() {
        let mut ticker = Ticker::new(INTERVAL);
        let start = Instant::now();

        // Not running
        assert!(!ticker.poll(start + INTERVAL));

        ticker.start(start);
        assert!(!ticker.poll(start));
        assert!(!ticker.poll(start + Duration::from_millis(99)));
        assert!(ticker.poll(start + INTERVAL));

        // Next tick counts from the previous one
        assert!(!ticker.poll(start + Duration::from_millis(150)));
        assert!(ticker.poll(start + Duration::from_millis(200)));
    }

    #[test]
    fn test_poll_does_not_catch_up() {
        let mut ticker = Ticker::new(INTERVAL);
        let start = Instant::now();
        ticker.start(start);

        let late = start + Duration::from_secs(1);
        assert!(ticker.poll(late));
        assert!(!ticker.poll(late));
    }

    #[test]
    fn test_poll_after_stop() {
        let mut ticker = Ticker::new(INTERVAL);
        let start = Instant::now();
        ticker.start(start);
        ticker.stop();

        assert!(!ticker.poll(start + Duration::from_secs(1)));
    }
}
