use hexe_messages::redraw::Style;

use super::config::ThemeOptions;

/// Styles used when drawing
#[derive(Debug, Clone, Default)]
pub(crate) struct Theme {
    pub default: Style,
    pub offset: Style,
    pub cursor: Style,
    pub edited: Style,
    pub statusline: Style,
    pub info: Style,
    pub error: Style,
}

impl Theme {
    /// Parse the configured styles, invalid styles are logged and left as
    /// default
    pub fn new(opts: &ThemeOptions) -> Theme {
        let parse = |name: &str, value: &str| match value.parse::<Style>() {
            Ok(style) => style,
            Err(e) => {
                log::error!("Invalid style for {}: '{}': {}", name, value, e);
                Style::default()
            }
        };

        Theme {
            default: parse("default", &opts.default),
            offset: parse("offset", &opts.offset),
            cursor: parse("cursor", &opts.cursor),
            edited: parse("edited", &opts.edited),
            statusline: parse("statusline", &opts.statusline),
            info: parse("info", &opts.info),
            error: parse("error", &opts.error),
        }
    }
}

#[cfg(test)]
mod test {
    use hexe_messages::redraw::TextStyle;

    use super::*;

    #[test]
    fn invalid_style_falls_back() {
        let opts = ThemeOptions {
            cursor: "not a style".into(),
            ..ThemeOptions::default()
        };
        let theme = Theme::new(&opts);
        assert_eq!(Style::default(), theme.cursor);
        assert_eq!(Some(TextStyle::BOLD), theme.edited.text_style);
    }
}
