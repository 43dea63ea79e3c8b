mod cell;
mod color;
mod grid;
mod point;
mod size;
mod style;
mod text_style;

pub use cell::*;
pub use color::*;
pub use grid::*;
pub use point::*;
pub use size::*;
pub use style::*;
pub use text_style::*;
