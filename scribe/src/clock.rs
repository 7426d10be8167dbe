//! # Clock Module - Time sources for sessions
//!
//! Sessions never call [`Instant::now`] themselves. They ask their [`Clock`], which makes it
//! possible to replay recorded input, or to test timing-dependent behaviour without sleeping.

use std::cell::Cell;
use std::rc::Rc;

use web_time::{Duration, Instant};

/// A source of the current time
pub trait Clock: Clone {
    fn now(&self) -> Instant;
}

/// The system's monotonic clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to
///
/// Clones share the same time, so a test can keep a handle while the session owns another.
///
/// ```rust
/// use scribe::{Clock, ManualClock};
/// use web_time::Duration;
///
/// let clock = ManualClock::new();
/// let handle = clock.clone();
/// let before = clock.now();
///
/// handle.advance(Duration::from_secs(60));
/// assert_eq!(clock.now() - before, Duration::from_secs(60));
/// ```
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<Instant>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(instant: Instant) -> Self {
        Self {
            now: Rc::new(Cell::new(instant)),
        }
    }

    /// Move the clock forward
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}
