use std::ops::Deref;

use crossterm::event::{KeyCode, KeyEvent as crosstermKeyEvent, KeyModifiers};

/// Name of a key press as shown in help messages, e.g. `ctrl-s`, `space` or `backtab`
pub fn key_event_to_string(key_event: &crosstermKeyEvent) -> String {
    let char;
    let code = match key_event.code {
        KeyCode::Char(' ') => "space",
        KeyCode::Char(c) => {
            char = c.to_string();
            &char
        }
        KeyCode::F(n) => {
            char = format!("f{n}");
            &char
        }
        KeyCode::Esc => "esc",
        KeyCode::Enter => "enter",
        KeyCode::Tab => "tab",
        KeyCode::BackTab => "backtab",
        KeyCode::Backspace => "backspace",
        KeyCode::Delete => "delete",
        KeyCode::Insert => "insert",
        KeyCode::Left => "left",
        KeyCode::Right => "right",
        KeyCode::Up => "up",
        KeyCode::Down => "down",
        KeyCode::Home => "home",
        KeyCode::End => "end",
        KeyCode::PageUp => "pageup",
        KeyCode::PageDown => "pagedown",
        _ => "",
    };

    [
        (KeyModifiers::CONTROL, "ctrl-"),
        (KeyModifiers::ALT, "alt-"),
        (KeyModifiers::SHIFT, "shift-"),
    ]
    .into_iter()
    .filter(|(modifier, _)| key_event.modifiers.intersects(*modifier))
    .map(|(_, prefix)| prefix)
    .chain(std::iter::once(code))
    .collect()
}

#[derive(Clone, Debug, PartialEq)]
pub struct KeyEvent(pub crosstermKeyEvent);

impl From<crosstermKeyEvent> for KeyEvent {
    fn from(key_event: crosstermKeyEvent) -> Self {
        Self(key_event)
    }
}
impl From<KeyCode> for KeyEvent {
    fn from(key_code: KeyCode) -> Self {
        Self(crosstermKeyEvent::new(key_code, KeyModifiers::NONE))
    }
}
impl From<char> for KeyEvent {
    fn from(c: char) -> Self {
        Self(crosstermKeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
    }
}
impl AsRef<crosstermKeyEvent> for KeyEvent {
    fn as_ref(&self) -> &crosstermKeyEvent {
        &self.0
    }
}
impl From<KeyEvent> for crosstermKeyEvent {
    fn from(val: KeyEvent) -> Self {
        val.0
    }
}
impl Deref for KeyEvent {
    type Target = crosstermKeyEvent;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
impl From<KeyEvent> for String {
    fn from(val: KeyEvent) -> Self {
        key_event_to_string(&val.0)
    }
}
impl std::fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", key_event_to_string(self))
    }
}

#[cfg(test)]
pub mod test_utils {
    use crate::tui::Event;

    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

    pub fn get_key_evt(key: KeyCode) -> Event {
        Event::Key(crosstermKeyEvent::new(key, KeyModifiers::NONE))
    }
    pub fn get_ctrl_evt(key: char) -> Event {
        Event::Key(crosstermKeyEvent::new(
            KeyCode::Char(key),
            KeyModifiers::CONTROL,
        ))
    }
    pub fn get_click_evt(column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_key_event_to_string() {
        assert_eq!(KeyEvent::from(KeyCode::Enter).to_string(), "enter");
        assert_eq!(KeyEvent::from(' ').to_string(), "space");
        assert_eq!(
            KeyEvent::from(crosstermKeyEvent::new(
                KeyCode::Char('s'),
                KeyModifiers::CONTROL
            ))
            .to_string(),
            "ctrl-s"
        );
        assert_eq!(KeyEvent::from(KeyCode::BackTab).to_string(), "backtab");
        assert_eq!(KeyEvent::from(KeyCode::Tab).to_string(), "tab");
        assert_eq!(KeyEvent::from(KeyCode::Esc).to_string(), "esc");
        assert_eq!(KeyEvent::from(KeyCode::F(2)).to_string(), "f2");
    }
}
