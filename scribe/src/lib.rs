//! # Scribe - A keystroke-driven typing session engine
//!
//! Scribe turns a serial stream of raw key events into a consistent record of what was typed,
//! what was expected, and how fast and how accurately it happened. It is meant to be embedded
//! in a host (a terminal UI, a browser shell, a replay tool) that owns the event loop and
//! renders the session.
//!
//! ## Modules
//!
//! - [`key`]: Host-independent key events and the rules deciding which keys count as input
//! - [`session`]: The session state machine (idle, active, complete)
//! - [`statistics`]: Words-per-minute, accuracy and elapsed-time formatting
//! - [`timer`]: The ticker that drives the elapsed-time display
//! - [`clock`]: Time sources, so sessions can be driven by a real or a manual clock
//! - [`render`]: Per-letter and per-line views of a session for presentation layers
//! - [`config`]: Runtime configuration
//!
//! ## Quick start
//!
//! ```rust
//! use scribe::{KeyEvent, LetterStatus, Session, Status};
//!
//! let mut session = Session::new("cat").unwrap();
//! assert_eq!(session.status(), Status::Idle);
//!
//! session.handle_key(&KeyEvent::char('c'));
//! session.handle_key(&KeyEvent::char('x'));
//!
//! assert_eq!(session.status(), Status::Active);
//! assert_eq!(session.letter_status(1), LetterStatus::Incorrect);
//! assert_eq!(session.letter_status(2), LetterStatus::Current);
//! ```

pub mod clock;
pub mod config;
pub mod key;
pub mod render;
pub mod session;
pub mod statistics;
pub mod timer;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::Configuration;
pub use key::{Input, Key, KeyEvent, Modifiers, NamedKey};
pub use render::{Letters, Lines, RenderedLetter, TextLine};
pub use session::{CharacterResult, Keystroke, LetterStatus, Session, SessionError, Status};
pub use statistics::{Counters, Statistics, accuracy, format_elapsed, words_per_minute};
pub use timer::Ticker;
