//! # Configuration Module - Runtime Behavior Settings
//!
//! This module provides configuration options for customizing the behavior of a typing session.
//!
//! ## Usage
//!
//! ```rust
//! use scribe::config::Configuration;
//! use web_time::Duration;
//!
//! // Use default configuration
//! let config = Configuration::default();
//!
//! // Custom configuration
//! let config = Configuration {
//!     tick_interval: Duration::from_millis(250), // Refresh the elapsed time 4 times a second
//! };
//! ```
//!
//! ## Performance Considerations
//!
//! - **Tick Interval**: The tick interval only drives the elapsed-time display. Statistics are
//!   always derived from the session's start and end timestamps, so a slower tick never makes
//!   words-per-minute less precise, it only makes the clock on screen update less often.

use web_time::Duration;

/// Runtime configuration for typing sessions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    /// Interval between refreshes of the elapsed-time display
    ///
    /// **Default**: 100 milliseconds
    pub tick_interval: Duration,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(100),
        }
    }
}
