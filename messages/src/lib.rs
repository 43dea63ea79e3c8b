pub mod key;
pub mod redraw;

pub use key::{keyevents_to_string, try_parse_keyevents, Key, KeyEvent, KeyMods, KeyParseError};
