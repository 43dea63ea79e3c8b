mod actions;
mod common;
mod draw;
mod editor;
mod error;

pub use editor::{
    config::Config,
    options::{EditorOptions, WindowOptions},
    window::Mode,
    Editor,
};
pub use error::EditorError;
