use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// Used to determine where to send input, and what to redraw
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, AsRefStr, Display, EnumIter, EnumString,
)]
#[strum(serialize_all = "lowercase")]
pub enum Mode {
    #[default]
    Normal,
    Insert,
    Replace,
    Command,
    Search,
}

impl Mode {
    /// Whether typed hex digits edit the buffer in this mode
    pub fn is_editing(&self) -> bool {
        matches!(self, Mode::Insert | Mode::Replace)
    }

    /// Whether typed characters go to the prompt in this mode
    pub fn is_prompt(&self) -> bool {
        matches!(self, Mode::Command | Mode::Search)
    }
}
