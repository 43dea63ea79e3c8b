use core::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Color {
    Black,
    White,
    Rgb(Rgb),
}

impl FromStr for Color {
    type Err = HexStringError;

    /// Parse `black`, `white` or a `#rrggbb` hex string
    fn from_str(string: &str) -> Result<Color, HexStringError> {
        match string {
            "black" => Ok(Color::Black),
            "white" => Ok(Color::White),
            _ => Rgb::from_hex(string).map(Color::Rgb),
        }
    }
}

#[derive(PartialEq, Eq, Clone, Copy, Hash)]
pub struct Rgb {
    red: u8,
    green: u8,
    blue: u8,
}

impl fmt::Debug for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rgb({})", self.name())
    }
}

impl Rgb {
    pub const fn new(red: u8, green: u8, blue: u8) -> Rgb {
        Rgb { red, green, blue }
    }

    pub fn from_hex(string: &str) -> Result<Rgb, HexStringError> {
        // #123456 => 7 chars
        if string.len() != 7 {
            return Err(HexStringError::InvalidLength);
        }

        let mut chars = string.char_indices();
        if let Some((_, ch)) = chars.next().filter(|(_, ch)| *ch != '#') {
            return Err(HexStringError::InvalidCharacter {
                pos: 0,
                found: ch,
                expected: "#",
            });
        }

        if let Some((pos, found)) = chars.find(|(_, ch)| !ch.is_ascii_hexdigit()) {
            return Err(HexStringError::InvalidCharacter {
                pos,
                found,
                expected: "0-9 or A-F or a-f",
            });
        }

        let component = |i: usize| {
            u8::from_str_radix(&string[i..i + 2], 16).map_err(|_| HexStringError::InvalidLength)
        };

        Ok(Rgb {
            red: component(1)?,
            green: component(3)?,
            blue: component(5)?,
        })
    }

    pub fn name(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }

    pub fn get(&self) -> (u8, u8, u8) {
        (self.red, self.green, self.blue)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HexStringError {
    #[error("Hex string has invalid length")]
    InvalidLength,

    #[error("Hex string has invalid character at pos {pos}, found {found}, expected {expected}")]
    InvalidCharacter {
        pos: usize,
        expected: &'static str,
        found: char,
    },
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_hex() {
        let color: Color = "#1a2B3c".parse().unwrap();
        assert_eq!(Color::Rgb(Rgb::new(0x1a, 0x2b, 0x3c)), color);
        assert_eq!("#1a2b3c", Rgb::new(0x1a, 0x2b, 0x3c).name());
        assert_eq!(Ok(Color::Black), "black".parse::<Color>());
    }

    #[test]
    fn parse_hex_errors() {
        assert_eq!(Err(HexStringError::InvalidLength), Rgb::from_hex("#123"));
        assert!(matches!(
            Rgb::from_hex("x123456"),
            Err(HexStringError::InvalidCharacter { pos: 0, .. })
        ));
        assert!(matches!(
            Rgb::from_hex("#12345g"),
            Err(HexStringError::InvalidCharacter { pos: 6, .. })
        ));
    }
}
