use std::fmt;

use super::{Cell, Point, Size, Style};

/// Screen contents drawn by the editor, a fixed size 2D array of cells and
/// an optional terminal cursor position.
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    size: Size,
    cells: Vec<Vec<Cell>>,
    cursor: Option<Point>,
}

impl Grid {
    pub fn new(size: Size) -> Grid {
        Grid {
            size,
            cells: vec![vec![Cell::default(); size.width]; size.height],
            cursor: None,
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.cells
    }

    pub fn cursor(&self) -> Option<Point> {
        self.cursor
    }

    pub fn set_cursor(&mut self, cursor: Option<Point>) {
        self.cursor = cursor;
    }

    /// Cells outside the grid are silently dropped
    pub fn put(&mut self, at: Point, cell: Cell) {
        if let Some(slot) = self.cells.get_mut(at.y).and_then(|row| row.get_mut(at.x)) {
            *slot = cell;
        }
    }

    /// Write `string` one char per cell starting from `at`.
    /// Returns the number of cells written.
    pub fn put_str(&mut self, at: Point, string: &str, style: Style) -> usize {
        let mut written = 0;
        for (i, ch) in string.chars().enumerate() {
            let x = at.x + i;
            if x >= self.size.width {
                break;
            }

            self.put(Point::new(x, at.y), Cell::new(ch, style));
            written += 1;
        }
        written
    }

    /// Apply `style` over the existing style of the cells in row `y` columns
    /// `x..x + width`
    pub fn style_row(&mut self, y: usize, x: usize, width: usize, style: Style) {
        if let Some(row) = self.cells.get_mut(y) {
            for cell in row.iter_mut().skip(x).take(width) {
                cell.style.override_with(&style);
            }
        }
    }

    /// Text content of a row, mainly for tests and logging
    pub fn row_text(&self, y: usize) -> String {
        self.cells
            .get(y)
            .map(|row| row.iter().map(Cell::as_str).collect())
            .unwrap_or_default()
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grid")
            .field("width", &self.size.width)
            .field("height", &self.size.height)
            .field("cursor", &self.cursor)
            .finish()
    }
}
