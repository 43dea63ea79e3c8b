use std::{collections::HashSet, fmt, str::FromStr};

use bitflags::bitflags;
use thiserror::Error;

bitflags! {
    pub struct KeyMods: u8 {
        const CONTROL = 0b00_00_01;
        const ALT = 0b00_00_10;
    }
}

/// Keyboard keys
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Key {
    Char(char),
    F(u8),
    Enter,
    Esc,
    Tab,
    BackTab,
    Up,
    Down,
    Left,
    Right,
    Backspace,
    Delete,
    Home,
    End,
    PageUp,
    PageDown,
    Insert,
    Unknown,
}

#[derive(Debug, Hash, PartialEq, Eq, Clone, Copy)]
pub struct KeyEvent {
    key: Key,
    mods: KeyMods,
}

impl KeyEvent {
    pub fn new(key: Key, mods: KeyMods) -> KeyEvent {
        KeyEvent { key, mods }
    }

    /// Key press without modifiers
    pub fn plain(key: Key) -> KeyEvent {
        KeyEvent::new(key, KeyMods::empty())
    }

    pub fn key(&self) -> &Key {
        &self.key
    }

    pub fn mods(&self) -> KeyMods {
        self.mods
    }

    pub fn control_pressed(&self) -> bool {
        self.mods.contains(KeyMods::CONTROL)
    }

    pub fn alt_pressed(&self) -> bool {
        self.mods.contains(KeyMods::ALT)
    }

    /// Character typed by this key press, if it is a plain character
    pub fn typed_char(&self) -> Option<char> {
        match self.key {
            Key::Char(ch) if self.mods.is_empty() => Some(ch),
            _ => None,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyParseError {
    #[error("Keybinding contains multiple same tokens {0}")]
    Repeated(String),

    #[error("Failed to parse keybinding {0}")]
    Invalid(String),
}

/// Separator for different key presses.
pub(crate) const KEY_PRESS_SEPARATOR: char = ' ';

/// Separator for different keys in a single key press.
pub(crate) const KEY_SEPARATOR: &str = "+";

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.mods.contains(KeyMods::CONTROL) {
            write!(f, "ctrl{}", KEY_SEPARATOR)?;
        }

        if self.mods.contains(KeyMods::ALT) {
            write!(f, "alt{}", KEY_SEPARATOR)?;
        }

        match self.key {
            Key::Char(' ') => f.write_str("space"),
            Key::Char(ch) => write!(f, "{}", ch),
            Key::F(n) => write!(f, "F{}", n),
            Key::Enter => f.write_str("enter"),
            Key::Esc => f.write_str("esc"),
            Key::Tab => f.write_str("tab"),
            Key::BackTab => f.write_str("btab"),
            Key::Up => f.write_str("up"),
            Key::Down => f.write_str("down"),
            Key::Left => f.write_str("left"),
            Key::Right => f.write_str("right"),
            Key::Backspace => f.write_str("backspace"),
            Key::Delete => f.write_str("delete"),
            Key::Home => f.write_str("home"),
            Key::End => f.write_str("end"),
            Key::PageUp => f.write_str("pageup"),
            Key::PageDown => f.write_str("pagedown"),
            Key::Insert => f.write_str("insert"),
            Key::Unknown => f.write_str("???"),
        }
    }
}

impl FromStr for KeyEvent {
    type Err = KeyParseError;

    fn from_str(string: &str) -> Result<KeyEvent, KeyParseError> {
        let mut mods = KeyMods::empty();
        let mut seen = HashSet::new();

        // A lone separator is the key itself
        if string == KEY_SEPARATOR {
            return Ok(KeyEvent::plain(Key::Char('+')));
        }

        for token in string.split(KEY_SEPARATOR) {
            if !seen.insert(token) {
                return Err(KeyParseError::Repeated(string.into()));
            }

            match token {
                "alt" => mods |= KeyMods::ALT,
                "ctrl" | "ctl" => mods |= KeyMods::CONTROL,
                token => {
                    let mut chars = token.chars();
                    let key = match (chars.next(), chars.next()) {
                        (Some(ch), None) => Key::Char(ch),
                        _ => parse_named_key(token)
                            .ok_or_else(|| KeyParseError::Invalid(string.into()))?,
                    };

                    return Ok(KeyEvent::new(key, mods));
                }
            }
        }

        Err(KeyParseError::Invalid(string.into()))
    }
}

fn parse_named_key(token: &str) -> Option<Key> {
    let key = match token {
        "enter" => Key::Enter,
        "esc" => Key::Esc,
        "tab" => Key::Tab,
        "btab" | "backtab" => Key::BackTab,
        "insert" => Key::Insert,
        "delete" | "del" => Key::Delete,
        "home" => Key::Home,
        "end" => Key::End,
        "pageup" | "pgup" => Key::PageUp,
        "pagedown" | "pgdown" => Key::PageDown,
        "up" => Key::Up,
        "down" => Key::Down,
        "left" => Key::Left,
        "right" => Key::Right,
        "space" => Key::Char(' '),
        "backspace" | "bs" => Key::Backspace,
        _ => {
            let n = token.strip_prefix('F')?.parse().ok()?;
            Key::F(n)
        }
    };

    Some(key)
}

pub fn keyevents_to_string(events: &[KeyEvent]) -> String {
    let mut result = String::new();
    for event in events {
        if !result.is_empty() {
            result.push(KEY_PRESS_SEPARATOR);
        }

        result.push_str(&event.to_string());
    }
    result
}

/// Parse a whitespace separated sequence of key presses, for example
/// `"g g"` or `"ctrl+x ctrl+s"`
pub fn try_parse_keyevents(string: &str) -> Result<Vec<KeyEvent>, KeyParseError> {
    let events: Vec<KeyEvent> = string
        .split(KEY_PRESS_SEPARATOR)
        .filter(|s| !s.is_empty())
        .map(KeyEvent::from_str)
        .collect::<Result<_, _>>()?;

    if events.is_empty() {
        return Err(KeyParseError::Invalid(string.into()));
    }

    Ok(events)
}
