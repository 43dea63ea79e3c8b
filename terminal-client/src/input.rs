use std::time::Duration;

use anyhow::Result;
use crossterm::event::{poll, read, Event, KeyCode, KeyModifiers};
use hexe_messages::{redraw::Size, Key, KeyEvent, KeyMods};

/// Wait time between consecutive resize events before the last one is used
const RESIZE_SETTLE: Duration = Duration::from_millis(20);

/// Input relevant to the editor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Key(KeyEvent),
    Resize(Size),
}

/// Block until the next input event
pub(crate) fn next_input() -> Result<Input> {
    loop {
        match read()? {
            Event::Key(key) => return Ok(Input::Key(convert_key_event(key))),
            Event::Resize(mut width, mut height) => {
                // Terminals send a burst of these while resizing
                while poll(RESIZE_SETTLE)? {
                    match read()? {
                        Event::Resize(w, h) => {
                            width = w;
                            height = h;
                        }
                        Event::Key(key) => {
                            log::debug!("Key pressed while resizing, dropped {:?}", key);
                        }
                        Event::Mouse(_) => {}
                    }
                }

                let size = Size::new(width as usize, height as usize);
                return Ok(Input::Resize(size));
            }
            Event::Mouse(_) => {}
        }
    }
}

pub(crate) fn convert_key_event(key: crossterm::event::KeyEvent) -> KeyEvent {
    let plain_key = match key.code {
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Enter => Key::Enter,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        KeyCode::Tab => Key::Tab,
        KeyCode::BackTab => Key::BackTab,
        KeyCode::Delete => Key::Delete,
        KeyCode::Insert => Key::Insert,
        KeyCode::F(n) => Key::F(n),
        KeyCode::Char(ch) => Key::Char(ch),
        KeyCode::Esc => Key::Esc,
        KeyCode::Null => Key::Unknown,
    };

    let mut mods = KeyMods::empty();

    if key.modifiers.contains(KeyModifiers::ALT) {
        mods |= KeyMods::ALT;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        mods |= KeyMods::CONTROL;
    }

    KeyEvent::new(plain_key, mods)
}

#[cfg(test)]
mod test {
    use super::*;

    fn convert(code: KeyCode, modifiers: KeyModifiers) -> String {
        let event = crossterm::event::KeyEvent::new(code, modifiers);
        convert_key_event(event).to_string()
    }

    #[test]
    fn keys() {
        assert_eq!("a", convert(KeyCode::Char('a'), KeyModifiers::NONE));
        // Shift is part of the character
        assert_eq!("G", convert(KeyCode::Char('G'), KeyModifiers::SHIFT));
        assert_eq!("ctrl+s", convert(KeyCode::Char('s'), KeyModifiers::CONTROL));
        assert_eq!(
            "ctrl+alt+x",
            convert(
                KeyCode::Char('x'),
                KeyModifiers::CONTROL | KeyModifiers::ALT
            )
        );
        assert_eq!("esc", convert(KeyCode::Esc, KeyModifiers::NONE));
        assert_eq!("pagedown", convert(KeyCode::PageDown, KeyModifiers::NONE));
    }
}
