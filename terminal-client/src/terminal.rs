use std::io::{stdout, BufWriter, Stdout, Write};

use anyhow::Result;
use crossterm::{cursor, execute, queue, style, terminal::*};
use hexe_messages::redraw::{Cell, Color, Grid, Size, Style, TextStyle};

/// Raw mode alternate screen terminal. Only cells that changed since the
/// last draw are written.
pub struct Terminal {
    out: BufWriter<Stdout>,
    written: Vec<Vec<Cell>>,
    brush: Style,
    cursor_shown: bool,
}

impl Terminal {
    pub fn new() -> Result<Terminal> {
        enable_raw_mode()?;
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide, Clear(ClearType::All))?;
        let size = terminal_size();

        Ok(Terminal {
            out: BufWriter::with_capacity(1 << 16, stdout),
            written: vec![vec![Cell::default(); size.width]; size.height],
            brush: Style::default(),
            cursor_shown: false,
        })
    }

    pub fn resize(&mut self, size: Size) -> Result<()> {
        // Just clear on resize
        self.written = vec![vec![Cell::default(); size.width]; size.height];
        self.brush = Style::default();
        queue!(
            self.out,
            style::SetAttribute(style::Attribute::Reset),
            style::ResetColor,
            Clear(ClearType::All)
        )?;
        Ok(())
    }

    /// Draw a full screen grid and place the cursor
    pub fn draw(&mut self, grid: &Grid) -> Result<()> {
        for (y, row) in grid.rows().iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                self.draw_cell(cell, x, y)?;
            }
        }

        match grid.cursor() {
            Some(point) => {
                self.goto(point.x, point.y)?;
                self.show_cursor()?;
            }
            None => self.hide_cursor()?,
        }

        self.flush()
    }

    pub fn draw_cell(&mut self, cell: &Cell, x: usize, y: usize) -> Result<()> {
        if let Some(written) = self.written.get(y).and_then(|row| row.get(x)) {
            if written != cell {
                self.set_style(cell.style)?;
                self.goto(x, y)?;
                write!(self.out, "{}", cell)?;
                self.written[y][x] = cell.clone();
            }
        }

        Ok(())
    }

    pub fn show_cursor(&mut self) -> Result<()> {
        if !self.cursor_shown {
            queue!(self.out, cursor::Show)?;
            self.cursor_shown = true;
        }
        Ok(())
    }

    pub fn hide_cursor(&mut self) -> Result<()> {
        if self.cursor_shown {
            queue!(self.out, cursor::Hide)?;
            self.cursor_shown = false;
        }
        Ok(())
    }

    pub fn goto(&mut self, x: usize, y: usize) -> Result<()> {
        queue!(self.out, cursor::MoveTo(x as u16, y as u16))?;
        Ok(())
    }

    pub fn set_style(&mut self, style: Style) -> Result<()> {
        if self.brush == style {
            return Ok(());
        }
        self.set_text_style(style.text_style)?;
        self.set_color(style.bg, true)?;
        self.set_color(style.fg, false)?;
        self.brush = style;

        Ok(())
    }

    fn set_color(&mut self, color: Option<Color>, is_bg: bool) -> Result<()> {
        let color = color_to_crossterm_color(color.as_ref());
        if is_bg {
            queue!(self.out, style::SetBackgroundColor(color))?;
        } else {
            queue!(self.out, style::SetForegroundColor(color))?;
        }

        Ok(())
    }

    fn set_text_style(&mut self, style: Option<TextStyle>) -> Result<()> {
        // Attributes are not unset individually, start from a clean state
        queue!(self.out, style::SetAttribute(style::Attribute::Reset))?;

        if let Some(style) = style {
            let mut attrs = style::Attributes::default();
            if style.contains(TextStyle::BOLD) {
                attrs.set(style::Attribute::Bold);
            }

            if style.contains(TextStyle::UNDERLINE) {
                attrs.set(style::Attribute::Underlined);
            }

            if style.contains(TextStyle::ITALIC) {
                attrs.set(style::Attribute::Italic);
            }

            if style.contains(TextStyle::REVERSE) {
                attrs.set(style::Attribute::Reverse);
            }
            queue!(self.out, style::SetAttributes(attrs))?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }

    pub fn size(&self) -> Size {
        let height = self.written.len();
        let width = self.written.first().map_or(0, |row| row.len());
        Size::new(width, height)
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        if disable_raw_mode().is_err() {
            log::error!("Failed to disable raw mode");
        }

        if execute!(self.out, cursor::Show, LeaveAlternateScreen).is_err() {
            log::error!("Failed to leave alternate screen");
        }
    }
}

pub(crate) fn terminal_size() -> Size {
    size().map_or(Size::new(80, 24), |(x, y)| Size::new(x as usize, y as usize))
}

pub(crate) fn color_to_crossterm_color(color: Option<&Color>) -> style::Color {
    match color {
        Some(Color::Black) => style::Color::Black,
        Some(Color::White) => style::Color::White,
        Some(Color::Rgb(rgb)) => {
            let (r, g, b) = rgb.get();
            style::Color::Rgb { r, g, b }
        }
        None => style::Color::Reset,
    }
}

#[cfg(test)]
mod test {
    use hexe_messages::redraw::Rgb;

    use super::*;

    #[test]
    fn colors() {
        assert_eq!(style::Color::Reset, color_to_crossterm_color(None));
        assert_eq!(
            style::Color::Black,
            color_to_crossterm_color(Some(&Color::Black))
        );
        let rgb = Color::Rgb(Rgb::new(0x12, 0x34, 0x56));
        assert_eq!(
            style::Color::Rgb {
                r: 0x12,
                g: 0x34,
                b: 0x56
            },
            color_to_crossterm_color(Some(&rgb))
        );
    }
}
