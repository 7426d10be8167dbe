//! # Session Module - The typing session state machine
//!
//! This module provides [`Session`], one attempt at typing a single reference text. The session
//! consumes key events one at a time, keeps the character-level scoreboard, and derives live and
//! final statistics.
//!
//! ## Key Features
//!
//! - **Explicit input port**: [`Session::handle_key`] is the only way input reaches a session,
//!   so hosts drive it with plain function calls
//! - **Owned timer**: the elapsed-time [`Ticker`] lives inside the session and is stopped on
//!   completion, on reset and when the session is dropped
//! - **Exactly-once completion**: the completion handler runs once, on the transition to
//!   [`Status::Complete`], no matter how many keys arrive afterwards
//! - **Permanent attempts**: backspace rewinds the cursor, but never the counters
//!
//! ## Session Lifecycle
//!
#![doc = simple_mermaid::mermaid!("../diagrams/session_lifecycle.mmd")]
//!
//! ## Usage Examples
//!
//! ### Basic Session
//!
//! ```rust
//! use scribe::{CharacterResult, KeyEvent, Session, Status};
//!
//! let mut session = Session::new("ab").unwrap();
//!
//! let typed = session.handle_key(&KeyEvent::char('a')).unwrap();
//! assert_eq!(typed.result, CharacterResult::Correct);
//!
//! let typed = session.handle_key(&KeyEvent::char('x')).unwrap();
//! assert_eq!(typed.result, CharacterResult::Incorrect);
//! assert_eq!(session.status(), Status::Complete);
//! ```
//!
//! ### Completion Handler
//!
//! ```rust
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! use scribe::{KeyEvent, Session};
//!
//! let completions = Rc::new(Cell::new(0));
//! let counter = completions.clone();
//!
//! let mut session = Session::new("hi")
//!     .unwrap()
//!     .on_complete(move |stats| {
//!         assert_eq!(stats.accuracy, 100);
//!         counter.set(counter.get() + 1);
//!     });
//!
//! for key in ['h', 'i', 'x', 'y'] {
//!     session.handle_key(&KeyEvent::char(key));
//! }
//!
//! assert_eq!(completions.get(), 1);
//! ```

use std::cmp::Ordering;
use std::fmt;

use thiserror::Error;
use web_time::{Duration, Instant};

use crate::clock::{Clock, SystemClock};
use crate::config::Configuration;
use crate::key::{Input, KeyEvent};
use crate::render::Letters;
use crate::statistics::{Counters, Statistics, format_elapsed};
use crate::timer::Ticker;

/// Lifecycle phase of a session
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// Waiting for the first keystroke
    #[default]
    Idle,
    /// Typing is in progress
    Active,
    /// The whole text has been typed. No further input is accepted
    Complete,
}

/// How a single position of the reference text should be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LetterStatus {
    /// The next character to type
    Current,
    /// Typed, and matching the reference text
    Correct,
    /// Typed, but not matching the reference text
    Incorrect,
    /// Not typed yet
    Pending,
}

/// The effect a key had on the scoreboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharacterResult {
    Correct,
    Incorrect,
    /// The character was removed from the input
    Deleted,
}

/// A key that changed the scoreboard, and how
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Keystroke {
    /// The typed character, or the deleted one
    pub char: char,
    pub result: CharacterResult,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Cannot create a typing session without any text")]
    EmptyText,
}

type CompletionHandler = Box<dyn FnMut(&Statistics)>;

/// One attempt at typing a reference text
///
/// # Invariants
///
/// - The input is always exactly as long as the cursor
/// - The cursor only moves one position at a time
/// - `correct + incorrect == total`, and none of them ever decrease
/// - The start instant is recorded at most once, the end instant exactly once on completion
/// - A complete session ignores every key
///
/// # Thread Safety
///
/// A session is meant to be driven from a single event loop. The completion handler is not
/// required to be `Send`, so neither is the session.
pub struct Session<C: Clock = SystemClock> {
    /// The text to type, never modified
    reference: Vec<char>,
    /// What was actually typed, one entry per position before the cursor
    input: Vec<char>,
    status: Status,
    counters: Counters,
    started_at: Option<Instant>,
    ended_at: Option<Instant>,
    /// Elapsed time as last refreshed by the ticker, for display only
    elapsed: Duration,
    ticker: Ticker,
    config: Configuration,
    clock: C,
    on_complete: Option<CompletionHandler>,
}

impl Session<SystemClock> {
    /// Create a new idle session for the given text
    ///
    /// # Errors
    ///
    /// [`SessionError::EmptyText`] if `text` is empty, since an empty text could never be typed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use scribe::{Session, SessionError};
    ///
    /// let session = Session::new("café 🚀").unwrap();
    /// assert_eq!(session.text_len(), 6);
    ///
    /// assert_eq!(Session::new("").unwrap_err(), SessionError::EmptyText);
    /// ```
    pub fn new(text: &str) -> Result<Self, SessionError> {
        Self::with_clock(text, SystemClock)
    }
}

impl<C: Clock> Session<C> {
    /// Create a new idle session that reads time from `clock`
    pub fn with_clock(text: &str, clock: C) -> Result<Self, SessionError> {
        let reference = parse_text(text)?;
        Ok(Self::from_parts(
            reference,
            Configuration::default(),
            clock,
            None,
        ))
    }

    fn from_parts(
        reference: Vec<char>,
        config: Configuration,
        clock: C,
        on_complete: Option<CompletionHandler>,
    ) -> Self {
        Self {
            input: Vec::with_capacity(reference.len()),
            reference,
            status: Status::Idle,
            counters: Counters::default(),
            started_at: None,
            ended_at: None,
            elapsed: Duration::ZERO,
            ticker: Ticker::new(config.tick_interval),
            config,
            clock,
            on_complete,
        }
    }

    /// Configure the session with custom settings (builder pattern)
    pub fn with_configuration(mut self, config: Configuration) -> Self {
        self.ticker.set_interval(config.tick_interval);
        self.config = config;
        self
    }

    /// Register the handler called with the final statistics when the text is fully typed
    ///
    /// The handler survives [`Session::reset`], so a host registers it once per passage.
    pub fn on_complete<F>(mut self, handler: F) -> Self
    where
        F: FnMut(&Statistics) + 'static,
    {
        self.on_complete = Some(Box::new(handler));
        self
    }

    /// Process a key event
    ///
    /// Returns the character that was typed or deleted along with its result, or `None` if the
    /// scoreboard did not change: the key was ignored, the session is complete, or backspace was
    /// pressed with nothing to delete.
    ///
    /// The first key that is not ignored activates the session, even if it changes nothing else.
    pub fn handle_key(&mut self, event: &KeyEvent) -> Option<Keystroke> {
        let input = event.classify();

        if input == Input::Ignored {
            log::trace!("Ignoring key {:?}", event.key);
            return None;
        }

        if self.status == Status::Complete {
            return None;
        }

        if self.status == Status::Idle {
            self.activate();
        }

        match input {
            Input::Char(char) => self.type_char(char),
            Input::Backspace => self.delete_char(),
            Input::Ignored => None,
        }
    }

    /// Move to [`Status::Active`], starting the clock if this session never started before
    fn activate(&mut self) {
        self.status = Status::Active;

        if self.started_at.is_some() {
            log::debug!("Session was already started, not starting the ticker again");
            return;
        }

        let now = self.clock.now();
        self.started_at = Some(now);
        self.ticker.start(now);
        log::debug!("Session started ({} characters)", self.reference.len());
    }

    fn type_char(&mut self, char: char) -> Option<Keystroke> {
        let expected = *self.reference.get(self.input.len())?;
        let correct = char == expected;

        self.input.push(char);
        self.counters.record(correct);

        if self.is_fully_typed() {
            self.complete();
        }

        let result = if correct {
            CharacterResult::Correct
        } else {
            CharacterResult::Incorrect
        };

        Some(Keystroke { char, result })
    }

    fn delete_char(&mut self) -> Option<Keystroke> {
        self.input.pop().map(|char| Keystroke {
            char,
            result: CharacterResult::Deleted,
        })
    }

    fn complete(&mut self) {
        let now = self.clock.now();

        self.ticker.stop();
        self.ended_at = Some(now);
        if let Some(started_at) = self.started_at {
            self.elapsed = now.saturating_duration_since(started_at);
        }
        self.status = Status::Complete;

        let statistics = self.statistics();
        log::debug!(
            "Session complete: {} wpm, {}% accuracy",
            statistics.wpm,
            statistics.accuracy
        );

        if let Some(handler) = self.on_complete.as_mut() {
            handler(&statistics);
        }
    }

    /// Refresh the elapsed-time display if the ticker is due
    ///
    /// Hosts call this from their event loop. Returns true if the elapsed time changed.
    pub fn poll(&mut self) -> bool {
        if self.status != Status::Active {
            return false;
        }

        let now = self.clock.now();
        if !self.ticker.poll(now) {
            return false;
        }

        if let Some(started_at) = self.started_at {
            self.elapsed = now.saturating_duration_since(started_at);
        }
        true
    }

    /// Replace this session with a fresh, idle attempt at the same text
    ///
    /// Configuration, clock and completion handler carry over. Everything else starts over,
    /// including the start instant.
    pub fn reset(&mut self) {
        let reference = std::mem::take(&mut self.reference);
        self.replace_with(reference);
    }

    /// Replace this session with a fresh, idle attempt at a new text
    ///
    /// # Errors
    ///
    /// [`SessionError::EmptyText`] if `text` is empty. The current session is left untouched.
    pub fn reset_with(&mut self, text: &str) -> Result<(), SessionError> {
        let reference = parse_text(text)?;
        self.replace_with(reference);
        Ok(())
    }

    fn replace_with(&mut self, reference: Vec<char>) {
        self.ticker.stop();

        let fresh = Self::from_parts(
            reference,
            self.config.clone(),
            self.clock.clone(),
            self.on_complete.take(),
        );

        *self = fresh;
        log::debug!("Session reset");
    }

    /// How a position of the text should be presented
    ///
    /// # Examples
    ///
    /// ```rust
    /// use scribe::{KeyEvent, LetterStatus, Session};
    ///
    /// let mut session = Session::new("abc").unwrap();
    /// session.handle_key(&KeyEvent::char('x'));
    ///
    /// assert_eq!(session.letter_status(0), LetterStatus::Incorrect);
    /// assert_eq!(session.letter_status(1), LetterStatus::Current);
    /// assert_eq!(session.letter_status(2), LetterStatus::Pending);
    /// ```
    pub fn letter_status(&self, index: usize) -> LetterStatus {
        match index.cmp(&self.cursor()) {
            Ordering::Equal => LetterStatus::Current,
            Ordering::Greater => LetterStatus::Pending,
            Ordering::Less if self.input.get(index) == self.reference.get(index) => {
                LetterStatus::Correct
            }
            Ordering::Less => LetterStatus::Incorrect,
        }
    }

    /// Iterate over every letter of the text with its presentation status
    pub fn letters(&self) -> Letters<'_, C> {
        self.into()
    }

    pub const fn status(&self) -> Status {
        self.status
    }

    /// Index of the next character to type
    pub fn cursor(&self) -> usize {
        self.input.len()
    }

    /// Number of characters in the reference text
    pub fn text_len(&self) -> usize {
        self.reference.len()
    }

    /// The text to type
    pub fn reference(&self) -> &[char] {
        &self.reference
    }

    /// The reference text as a string
    pub fn text(&self) -> String {
        self.reference.iter().collect()
    }

    /// What has been typed so far
    pub fn input(&self) -> &[char] {
        &self.input
    }

    pub const fn counters(&self) -> Counters {
        self.counters
    }

    pub const fn started_at(&self) -> Option<Instant> {
        self.started_at
    }

    pub const fn ended_at(&self) -> Option<Instant> {
        self.ended_at
    }

    pub const fn configuration(&self) -> &Configuration {
        &self.config
    }

    /// Returns true while the session's ticker is running
    pub const fn is_ticking(&self) -> bool {
        self.ticker.is_running()
    }

    /// Returns true once every character of the text has been typed
    pub fn is_fully_typed(&self) -> bool {
        self.input.len() == self.reference.len()
    }

    /// Elapsed time as last refreshed by [`Session::poll`], or the final time once complete
    pub const fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// The elapsed time formatted as `MM:SS`
    pub fn formatted_elapsed(&self) -> String {
        format_elapsed(self.elapsed)
    }

    /// How much of the text has been typed, as a whole percentage rounded down
    pub fn progress(&self) -> usize {
        self.input.len() * 100 / self.reference.len()
    }

    /// Current statistics
    ///
    /// While the session is active, speed is measured up to this moment. Once complete, these are
    /// the final statistics.
    pub fn statistics(&self) -> Statistics {
        match self.ended_at {
            Some(ended_at) => Statistics::new(self.counters, self.started_at, Some(ended_at)),
            None => Statistics::live(self.counters, self.started_at, self.clock.now()),
        }
    }

    /// The final statistics, if the session is complete
    pub fn final_statistics(&self) -> Option<Statistics> {
        self.ended_at
            .map(|ended_at| Statistics::new(self.counters, self.started_at, Some(ended_at)))
    }
}

fn parse_text(text: &str) -> Result<Vec<char>, SessionError> {
    if text.is_empty() {
        return Err(SessionError::EmptyText);
    }

    Ok(text.chars().collect())
}

impl<C: Clock + fmt::Debug> fmt::Debug for Session<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("status", &self.status)
            .field("cursor", &self.cursor())
            .field("text_len", &self.text_len())
            .field("counters", &self.counters)
            .field("started_at", &self.started_at)
            .field("ended_at", &self.ended_at)
            .field("elapsed", &self.elapsed)
            .field("ticker", &self.ticker)
            .field("clock", &self.clock)
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}
