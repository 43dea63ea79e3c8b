use bitflags::bitflags;

bitflags! {
    pub struct TextStyle: u8 {
        const BOLD = 1 << 0;
        const UNDERLINE = 1 << 1;
        const ITALIC = 1 << 2;
        const REVERSE = 1 << 3;
    }
}

impl TextStyle {
    /// Parse comma separated attribute names, unknown names are ignored
    pub fn parse(string: &str) -> TextStyle {
        let mut style = TextStyle::empty();

        for s in string.split(',').map(str::trim) {
            match s {
                "bold" => style |= TextStyle::BOLD,
                "underline" => style |= TextStyle::UNDERLINE,
                "italic" => style |= TextStyle::ITALIC,
                "reverse" => style |= TextStyle::REVERSE,
                _ => {}
            }
        }
        style
    }
}
