mod input;
mod terminal;

use anyhow::Result;
use hexe_messages::redraw::{Grid, Size};

pub use input::Input;
use terminal::Terminal;

/// Terminal frontend: draws grids produced by the editor and reads input.
/// The terminal is restored when dropped.
pub struct TerminalClient {
    terminal: Terminal,
}

impl TerminalClient {
    pub fn new() -> Result<TerminalClient> {
        let terminal = Terminal::new()?;
        log::info!("Terminal size {:?}", terminal.size());
        Ok(TerminalClient { terminal })
    }

    pub fn size(&self) -> Size {
        self.terminal.size()
    }

    pub fn draw(&mut self, grid: &Grid) -> Result<()> {
        self.terminal.draw(grid)
    }

    /// Block until the next key press or resize. Resizes are applied to the
    /// terminal before returning.
    pub fn next_input(&mut self) -> Result<Input> {
        let input = input::next_input()?;
        if let Input::Resize(size) = input {
            log::debug!("Resize to {:?}", size);
            self.terminal.resize(size)?;
        }
        Ok(input)
    }
}
