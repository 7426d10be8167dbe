//! # Key Module - Host-independent key events
//!
//! Hosts translate whatever their input subsystem produces into a [`KeyEvent`]. Key names follow
//! the DOM `KeyboardEvent.key` convention (`"a"`, `" "`, `"Backspace"`, `"ArrowLeft"`, `"F5"`),
//! so browser hosts can pass names straight through and terminal hosts only need a small mapping.
//!
//! A session never looks at a [`KeyEvent`] directly. It asks for its [`Input`] classification,
//! which decides whether the key types a character, deletes one, or is ignored.
//!
//! ```rust
//! use scribe::{Input, KeyEvent, Modifiers};
//!
//! assert_eq!(KeyEvent::parse("a").classify(), Input::Char('a'));
//! assert_eq!(KeyEvent::parse("Backspace").classify(), Input::Backspace);
//! assert_eq!(KeyEvent::parse("Shift").classify(), Input::Ignored);
//!
//! let ctrl_c = KeyEvent::new("c".parse().unwrap(), Modifiers { ctrl: true, ..Modifiers::NONE });
//! assert_eq!(ctrl_c.classify(), Input::Ignored);
//! ```

use std::convert::Infallible;
use std::str::FromStr;

use strum::{Display, EnumString, IntoStaticStr};

/// Keys with a name instead of a printable character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr)]
pub enum NamedKey {
    Backspace,
    Enter,

    // Modifiers
    Shift,
    Control,
    Alt,
    AltGraph,
    Meta,
    CapsLock,

    // Navigation and editing
    Tab,
    Escape,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Home,
    End,
    PageUp,
    PageDown,
    Insert,
    Delete,
}

impl NamedKey {
    /// Returns true if the key only changes how other keys behave
    pub const fn is_modifier(self) -> bool {
        matches!(
            self,
            Self::Shift | Self::Control | Self::Alt | Self::AltGraph | Self::Meta | Self::CapsLock
        )
    }
}

/// The identity of a pressed key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A key producing a single character, including space
    Char(char),
    /// A named, non-printing key
    Named(NamedKey),
    /// A function key, `F1` through `F24`
    Function(u8),
    /// Anything the host could not identify (dead keys, IME composition, media keys...)
    Unidentified,
}

impl FromStr for Key {
    type Err = Infallible;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let mut chars = name.chars();
        if let (Some(char), None) = (chars.next(), chars.next()) {
            return Ok(Self::Char(char));
        }

        if let Ok(named) = name.parse::<NamedKey>() {
            return Ok(Self::Named(named));
        }

        let function = name
            .strip_prefix('F')
            .and_then(|number| number.parse::<u8>().ok())
            .filter(|number| (1..=24).contains(number));

        Ok(function.map_or(Self::Unidentified, Self::Function))
    }
}

impl From<char> for Key {
    fn from(value: char) -> Self {
        Self::Char(value)
    }
}

impl From<NamedKey> for Key {
    fn from(value: NamedKey) -> Self {
        Self::Named(value)
    }
}

/// Modifier keys held while a key was pressed
///
/// Shift is deliberately absent: it only changes which character a key produces.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        ctrl: false,
        alt: false,
        meta: false,
    };

    /// Returns true if any modifier is held
    pub const fn any(self) -> bool {
        self.ctrl || self.alt || self.meta
    }
}

/// What a key event means to a typing session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// The key is not typing input
    Ignored,
    /// Delete the last typed character
    Backspace,
    /// Type a character
    Char(char),
}

/// A raw key event as delivered by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub const fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    /// A key event for a plain character without modifiers
    pub const fn char(char: char) -> Self {
        Self::new(Key::Char(char), Modifiers::NONE)
    }

    /// A key event for a named key without modifiers
    pub const fn named(key: NamedKey) -> Self {
        Self::new(Key::Named(key), Modifiers::NONE)
    }

    /// Parse a DOM-style key name into an event without modifiers
    pub fn parse(name: &str) -> Self {
        let Ok(key) = name.parse::<Key>();
        Self::new(key, Modifiers::NONE)
    }

    /// Decide what the event means to a typing session
    ///
    /// Shortcuts (anything with Ctrl, Alt or Meta held), modifiers, navigation keys, function keys
    /// and unidentified keys are ignored. `Enter` types a newline.
    pub const fn classify(&self) -> Input {
        if self.modifiers.any() {
            return Input::Ignored;
        }

        match self.key {
            Key::Char(char) => Input::Char(char),
            Key::Named(NamedKey::Backspace) => Input::Backspace,
            Key::Named(NamedKey::Enter) => Input::Char('\n'),
            Key::Named(_) | Key::Function(_) | Key::Unidentified => Input::Ignored,
        }
    }
}
