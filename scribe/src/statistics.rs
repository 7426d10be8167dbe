//! # Statistics Module - Typing performance metrics
//!
//! Every metric here is a pure function of the session's counters and timestamps. Nothing is
//! accumulated from ticks, so live and final values never drift apart.
//!
//! - **Words per minute**: `round((correct / 5) / minutes)`
//! - **Accuracy**: `round(correct / total * 100)`, where `total` counts every character that was
//!   ever typed, including ones that were later deleted
//!
//! ```rust
//! use scribe::statistics::{accuracy, format_elapsed, words_per_minute};
//! use web_time::Duration;
//!
//! assert_eq!(words_per_minute(250, Some(Duration::from_secs(60))), 50);
//! assert_eq!(accuracy(2, 3), 67);
//! assert_eq!(format_elapsed(Duration::from_millis(83_999)), "01:23");
//! ```

use web_time::{Duration, Instant};

/// Characters per word when converting characters to words
pub const AVERAGE_WORD_LENGTH: usize = 5;

const MILLIS_PER_MINUTE: f64 = 60_000.0;

/// Calculate Words Per Minute
///
/// * `correct` - How many characters were typed correctly
/// * `elapsed` - How long the typing took, `None` if it never started
///
/// Returns 0 if typing never started or no whole millisecond has elapsed yet.
pub fn words_per_minute(correct: usize, elapsed: Option<Duration>) -> u32 {
    let Some(elapsed) = elapsed else {
        return 0;
    };

    let minutes = elapsed.as_millis() as f64 / MILLIS_PER_MINUTE;
    if minutes <= 0.0 {
        return 0;
    }

    let words = correct as f64 / AVERAGE_WORD_LENGTH as f64;
    (words / minutes).round() as u32
}

/// Calculate typing accuracy as a whole percentage
///
/// * `correct` - How many characters were typed correctly
/// * `total` - How many characters were typed in total
///
/// Nothing typed counts as perfect accuracy.
pub fn accuracy(correct: usize, total: usize) -> u32 {
    if total == 0 {
        return 100;
    }

    ((correct as f64 / total as f64) * 100.0).round() as u32
}

/// Format a duration as `MM:SS`
///
/// Partial seconds are truncated. Minutes keep counting past 99.
pub fn format_elapsed(elapsed: Duration) -> String {
    let seconds = elapsed.as_millis() / 1000;
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Keystroke counters
///
/// Counters only ever grow: deleting a character does not undo the attempt that typed it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Counters {
    pub correct: usize,
    pub incorrect: usize,
    pub total: usize,
}

impl Counters {
    /// Record a typed character
    pub const fn record(&mut self, correct: bool) {
        if correct {
            self.correct += 1;
        } else {
            self.incorrect += 1;
        }
        self.total += 1;
    }
}

/// A snapshot of a session's performance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Statistics {
    pub wpm: u32,
    pub accuracy: u32,
    pub counters: Counters,
    pub started_at: Option<Instant>,
    /// `None` while the session is still running
    pub ended_at: Option<Instant>,
    /// Time from start to end, or to the moment the snapshot was taken
    pub duration: Option<Duration>,
}

impl Statistics {
    /// Final statistics of a session that started and ended at the given instants
    pub fn new(counters: Counters, started_at: Option<Instant>, ended_at: Option<Instant>) -> Self {
        let duration = started_at
            .zip(ended_at)
            .map(|(start, end)| end.saturating_duration_since(start));

        Self::with_duration(counters, started_at, ended_at, duration)
    }

    /// Live statistics of a session that is still running at `now`
    pub fn live(counters: Counters, started_at: Option<Instant>, now: Instant) -> Self {
        let duration = started_at.map(|start| now.saturating_duration_since(start));

        Self::with_duration(counters, started_at, None, duration)
    }

    fn with_duration(
        counters: Counters,
        started_at: Option<Instant>,
        ended_at: Option<Instant>,
        duration: Option<Duration>,
    ) -> Self {
        Self {
            wpm: words_per_minute(counters.correct, duration),
            accuracy: accuracy(counters.correct, counters.total),
            counters,
            started_at,
            ended_at,
            duration,
        }
    }

    /// Returns true if these are the final statistics of a completed session
    pub const fn is_final(&self) -> bool {
        self.ended_at.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_words_per_minute() {
        assert_eq!(words_per_minute(3, Some(Duration::from_secs(60))), 1);
        assert_eq!(words_per_minute(250, Some(Duration::from_secs(60))), 50);
        assert_eq!(words_per_minute(250, Some(Duration::from_secs(30))), 100);

        // 2 words in 1.5 minutes = 1.33
        assert_eq!(words_per_minute(10, Some(Duration::from_secs(90))), 1);
        // 0.5 words per minute rounds up
        assert_eq!(words_per_minute(5, Some(Duration::from_secs(120))), 1);
        // 0.4 words per minute rounds down
        assert_eq!(words_per_minute(2, Some(Duration::from_secs(60))), 0);
    }

    #[test]
    fn test_words_per_minute_boundaries() {
        assert_eq!(words_per_minute(100, None), 0);
        assert_eq!(words_per_minute(100, Some(Duration::ZERO)), 0);
        assert_eq!(words_per_minute(100, Some(Duration::from_micros(900))), 0);
        assert_eq!(words_per_minute(0, Some(Duration::from_secs(60))), 0);
    }

    #[test]
    fn test_accuracy() {
        assert_eq!(accuracy(0, 0), 100);
        assert_eq!(accuracy(3, 3), 100);
        assert_eq!(accuracy(2, 3), 67);
        assert_eq!(accuracy(1, 3), 33);
        assert_eq!(accuracy(1, 2), 50);
        assert_eq!(accuracy(0, 4), 0);
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(Duration::ZERO), "00:00");
        assert_eq!(format_elapsed(Duration::from_millis(999)), "00:00");
        assert_eq!(format_elapsed(Duration::from_millis(1000)), "00:01");
        assert_eq!(format_elapsed(Duration::from_secs(59)), "00:59");
        assert_eq!(format_elapsed(Duration::from_secs(60)), "01:00");
        assert_eq!(format_elapsed(Duration::from_millis(754_321)), "12:34");
        assert_eq!(format_elapsed(Duration::from_secs(100 * 60 + 5)), "100:05");
    }

    #[test]
    fn test_counters_record() {
        let mut counters = Counters::default();
        counters.record(true);
        counters.record(false);
        counters.record(true);

        assert_eq!(
            counters,
            Counters {
                correct: 2,
                incorrect: 1,
                total: 3
            }
        );
    }

    #[test]
    fn test_statistics_snapshots() {
        let counters = Counters {
            correct: 3,
            incorrect: 0,
            total: 3,
        };
        let start = Instant::now();
        let end = start + Duration::from_secs(60);

        let final_stats = Statistics::new(counters, Some(start), Some(end));
        assert!(final_stats.is_final());
        assert_eq!(final_stats.wpm, 1);
        assert_eq!(final_stats.accuracy, 100);
        assert_eq!(final_stats.duration, Some(Duration::from_secs(60)));

        let live = Statistics::live(counters, Some(start), end);
        assert!(!live.is_final());
        assert_eq!(live.wpm, 1);

        let not_started = Statistics::live(Counters::default(), None, end);
        assert_eq!(not_started.wpm, 0);
        assert_eq!(not_started.accuracy, 100);
        assert_eq!(not_started.duration, None);
    }
}
