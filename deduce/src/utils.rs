use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, ModifierKeyCode};
use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block, BorderType},
};
use scribe::{Key, Modifiers, NamedKey};
use web_time::SystemTime;

/// A block with a rounded border
pub const ROUNDED_BLOCK: Block = Block::bordered().border_type(BorderType::Rounded);

pub fn center(area: Rect, horizontal: Constraint, vertical: Constraint) -> Rect {
    let [area_horizontal] = Layout::horizontal([horizontal])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::vertical([vertical])
        .flex(Flex::Center)
        .areas(area_horizontal);
    area
}

/// A trait defining helper methods for keyevents
pub trait KeyEventHelper {
    /// Returns true if the keyevent contains a pressed key
    fn is_press(&self) -> bool;

    /// Returns true if the keyevent contains the given modifiers
    fn has_mods(&self, mods: KeyModifiers) -> bool;

    /// Returns true if the keyevent contains a character that matches the input
    fn is_char(&self, character: char) -> bool;

    /// Returns true if the keyevent matches the given character, and is being pressed with CTRL as
    /// a modifier.
    fn is_ctrl_press_char(&self, character: char) -> bool {
        self.is_press() && self.has_mods(KeyModifiers::CONTROL) && self.is_char(character)
    }

    /// The keyevent as the typing engine sees it
    fn to_scribe(&self) -> scribe::KeyEvent;
}

impl KeyEventHelper for KeyEvent {
    fn is_press(&self) -> bool {
        self.kind == KeyEventKind::Press
    }

    fn is_char(&self, character: char) -> bool {
        self.code == KeyCode::Char(character)
    }

    fn has_mods(&self, mods: KeyModifiers) -> bool {
        self.modifiers.contains(mods)
    }

    fn to_scribe(&self) -> scribe::KeyEvent {
        let modifiers = Modifiers {
            ctrl: self.has_mods(KeyModifiers::CONTROL),
            alt: self.has_mods(KeyModifiers::ALT),
            meta: self.modifiers.intersects(KeyModifiers::SUPER | KeyModifiers::META),
        };

        scribe::KeyEvent::new(key_of(self.code), modifiers)
    }
}

fn key_of(code: KeyCode) -> Key {
    let named = match code {
        KeyCode::Char(char) => return Key::Char(char),
        KeyCode::F(number) => return Key::Function(number),
        KeyCode::Backspace => NamedKey::Backspace,
        KeyCode::Enter => NamedKey::Enter,
        KeyCode::Tab | KeyCode::BackTab => NamedKey::Tab,
        KeyCode::Esc => NamedKey::Escape,
        KeyCode::Left => NamedKey::ArrowLeft,
        KeyCode::Right => NamedKey::ArrowRight,
        KeyCode::Up => NamedKey::ArrowUp,
        KeyCode::Down => NamedKey::ArrowDown,
        KeyCode::Home => NamedKey::Home,
        KeyCode::End => NamedKey::End,
        KeyCode::PageUp => NamedKey::PageUp,
        KeyCode::PageDown => NamedKey::PageDown,
        KeyCode::Insert => NamedKey::Insert,
        KeyCode::Delete => NamedKey::Delete,
        KeyCode::CapsLock => NamedKey::CapsLock,
        KeyCode::Modifier(modifier) => match modifier {
            ModifierKeyCode::LeftShift | ModifierKeyCode::RightShift => NamedKey::Shift,
            ModifierKeyCode::LeftControl | ModifierKeyCode::RightControl => NamedKey::Control,
            ModifierKeyCode::LeftAlt | ModifierKeyCode::RightAlt => NamedKey::Alt,
            ModifierKeyCode::IsoLevel3Shift | ModifierKeyCode::IsoLevel5Shift => {
                NamedKey::AltGraph
            }
            _ => NamedKey::Meta,
        },
        _ => return Key::Unidentified,
    };

    Key::Named(named)
}

/// How long ago `timestamp` was, e.g. `3h 12m ago`
pub fn time_ago(timestamp: SystemTime, now: SystemTime) -> String {
    let secs = now.duration_since(timestamp).unwrap_or_default().as_secs();
    let days = secs / 86400;
    let hours = (secs % 86400) / 3600;
    let minutes = (secs % 3600) / 60;

    if days > 0 {
        format!("{days}d {hours}h ago")
    } else if hours > 0 {
        format!("{hours}h {minutes}m ago")
    } else if minutes > 0 {
        format!("{minutes}m ago")
    } else {
        "just now".to_string()
    }
}

/// Move a list selection one step up, wrapping around
pub const fn select_previous(index: &mut usize, len: usize) {
    if len == 0 {
        return;
    }
    *index = if *index == 0 { len - 1 } else { *index - 1 }
}

/// Move a list selection one step down, wrapping around
pub const fn select_next(index: &mut usize, len: usize) {
    if len == 0 {
        return;
    }
    *index = (*index + 1) % len
}

#[cfg(test)]
mod tests {
    use scribe::Input;
    use web_time::Duration;

    use super::*;

    fn classify(code: KeyCode, modifiers: KeyModifiers) -> Input {
        KeyEvent::new(code, modifiers).to_scribe().classify()
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(
            classify(KeyCode::Char('a'), KeyModifiers::NONE),
            Input::Char('a')
        );
        assert_eq!(
            classify(KeyCode::Char('A'), KeyModifiers::SHIFT),
            Input::Char('A')
        );
        assert_eq!(
            classify(KeyCode::Char(' '), KeyModifiers::NONE),
            Input::Char(' ')
        );
        assert_eq!(
            classify(KeyCode::Backspace, KeyModifiers::NONE),
            Input::Backspace
        );
        assert_eq!(
            classify(KeyCode::Enter, KeyModifiers::NONE),
            Input::Char('\n')
        );
    }

    #[test]
    fn test_ignored_keys() {
        assert_eq!(
            classify(KeyCode::Char('r'), KeyModifiers::CONTROL),
            Input::Ignored
        );
        assert_eq!(
            classify(KeyCode::Char('x'), KeyModifiers::ALT),
            Input::Ignored
        );
        assert_eq!(
            classify(KeyCode::Char('c'), KeyModifiers::SUPER),
            Input::Ignored
        );
        assert_eq!(classify(KeyCode::Left, KeyModifiers::NONE), Input::Ignored);
        assert_eq!(classify(KeyCode::F(5), KeyModifiers::NONE), Input::Ignored);
        assert_eq!(
            classify(
                KeyCode::Modifier(ModifierKeyCode::LeftShift),
                KeyModifiers::SHIFT
            ),
            Input::Ignored
        );
        assert_eq!(classify(KeyCode::Null, KeyModifiers::NONE), Input::Ignored);
    }

    #[test]
    fn test_ctrl_press_char() {
        let event = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert!(event.is_ctrl_press_char('q'));
        assert!(!event.is_ctrl_press_char('r'));
        assert!(!KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE).is_ctrl_press_char('q'));
    }

    #[test]
    fn test_time_ago() {
        let now = SystemTime::UNIX_EPOCH + Duration::from_secs(10 * 86400);
        let ago = |secs| time_ago(now - Duration::from_secs(secs), now);

        assert_eq!(ago(5), "just now");
        assert_eq!(ago(125), "2m ago");
        assert_eq!(ago(3 * 3600 + 60), "3h 1m ago");
        assert_eq!(ago(2 * 86400 + 3600), "2d 1h ago");
        // Clock skew
        assert_eq!(time_ago(now + Duration::from_secs(60), now), "just now");
    }

    #[test]
    fn test_selection_wraps() {
        let mut index = 0;
        select_previous(&mut index, 3);
        assert_eq!(index, 2);
        select_next(&mut index, 3);
        assert_eq!(index, 0);

        select_next(&mut index, 0);
        assert_eq!(index, 0);
    }
}
