use std::str::FromStr;

use thiserror::Error;

use super::{Color, HexStringError, TextStyle};

#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub struct Style {
    pub text_style: Option<TextStyle>,
    pub bg: Option<Color>,
    pub fg: Option<Color>,
}

impl Style {
    pub const fn new(bg: Option<Color>, fg: Option<Color>, text_style: Option<TextStyle>) -> Style {
        Style { text_style, bg, fg }
    }

    /// use self as a base style and apply overrides
    pub fn override_with(&mut self, style: &Style) {
        if let Some(bg) = style.bg {
            self.bg = Some(bg);
        }

        if let Some(fg) = style.fg {
            self.fg = Some(fg);
        }

        if let Some(s) = style.text_style {
            self.text_style = Some(s);
        }
    }
}

impl FromStr for Style {
    type Err = StyleError;

    /// Parse a style from a string of form "bg,fg,text_styles[,text_styles]".
    /// Empty colors are left unset.
    fn from_str(string: &str) -> Result<Style, StyleError> {
        if string.is_empty() {
            return Ok(Style::default());
        }

        let splits: Vec<&str> = string.splitn(3, ',').map(str::trim).collect();
        if splits.len() < 3 {
            return Err(StyleError::Split);
        }

        let color = |s: &str| -> Result<Option<Color>, StyleError> {
            if s.is_empty() {
                Ok(None)
            } else {
                Ok(Some(s.parse()?))
            }
        };
        let text_style = TextStyle::parse(splits[2]);

        Ok(Style {
            bg: color(splits[0])?,
            fg: color(splits[1])?,
            text_style: (!text_style.is_empty()).then_some(text_style),
        })
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StyleError {
    #[error("Failed to parse color: {0}")]
    Color(#[from] HexStringError),

    #[error("Too few splits, the format is bg,fg,attr[,attr]*")]
    Split,
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::redraw::Rgb;

    #[test]
    fn parse() {
        let style: Style = "#000000,white,bold,reverse".parse().unwrap();
        assert_eq!(Some(Color::Rgb(Rgb::new(0, 0, 0))), style.bg);
        assert_eq!(Some(Color::White), style.fg);
        assert_eq!(
            Some(TextStyle::BOLD | TextStyle::REVERSE),
            style.text_style
        );

        let style: Style = ",,underline".parse().unwrap();
        assert_eq!(None, style.bg);
        assert_eq!(Some(TextStyle::UNDERLINE), style.text_style);

        assert_eq!(Err(StyleError::Split), "black".parse::<Style>());
        assert!(matches!(
            "nocolor,,".parse::<Style>(),
            Err(StyleError::Color(_))
        ));
    }

    #[test]
    fn override_keeps_unset() {
        let mut base: Style = "black,white,".parse().unwrap();
        base.override_with(&",#ff0000,bold".parse().unwrap());
        assert_eq!(Some(Color::Black), base.bg);
        assert_eq!(Some(Color::Rgb(Rgb::new(255, 0, 0))), base.fg);
        assert_eq!(Some(TextStyle::BOLD), base.text_style);
    }
}
