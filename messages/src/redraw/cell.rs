use std::fmt::Display;

use super::Style;

#[derive(PartialEq, Eq, Debug, Clone)]
pub struct Cell {
    pub text: String,
    pub style: Style,
}

impl Cell {
    pub fn new(ch: char, style: Style) -> Cell {
        let mut cell = Cell::from(ch);
        cell.style = style;
        cell
    }

    pub fn with_style(style: Style) -> Cell {
        Cell {
            text: String::from(" "),
            style,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_blank(&self) -> bool {
        self.text.chars().all(char::is_whitespace)
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::with_style(Style::default())
    }
}

impl From<char> for Cell {
    fn from(ch: char) -> Self {
        let mut buf = [0u8; 4];
        let string = ch.encode_utf8(&mut buf);
        Cell {
            text: string.to_string(),
            style: Style::default(),
        }
    }
}

impl PartialEq<str> for Cell {
    fn eq(&self, other: &str) -> bool {
        self.text == other
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}
