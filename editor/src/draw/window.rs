use std::ops::Range;

use hexe_messages::redraw::{Grid, Point, Style};

use crate::{
    common::hex,
    editor::{themes::Theme, window::Window},
};

/// Column positions of one hex view row
struct Layout {
    offset_width: usize,
    bytes_per_row: usize,
    group_size: usize,
}

impl Layout {
    fn new(win: &Window) -> Layout {
        let digits = format!("{:x}", win.len()).len();
        Layout {
            offset_width: digits.max(8),
            bytes_per_row: win.bytes_per_row() as usize,
            group_size: win.options.group_size.max(1),
        }
    }

    fn hex_start(&self) -> usize {
        self.offset_width + 2
    }

    /// Column of the high nibble of the `i`th byte on a row
    fn hex_x(&self, i: usize) -> usize {
        self.hex_start() + i * 2 + i / self.group_size
    }

    fn ascii_start(&self) -> usize {
        let bpr = self.bytes_per_row;
        self.hex_start() + bpr * 2 + (bpr - 1) / self.group_size + 2
    }

    fn ascii_x(&self, i: usize) -> usize {
        self.ascii_start() + i
    }
}

/// Draw the hex view to the first `rows` rows of the grid. Returns the
/// position of the terminal cursor.
pub(crate) fn draw_window(
    grid: &mut Grid,
    win: &Window,
    theme: &Theme,
    rows: usize,
) -> Option<Point> {
    let layout = Layout::new(win);
    let bpr = layout.bytes_per_row;
    let len = win.len();
    let cursor = win.cursor();
    let start = win.view_offset();

    let bytes = {
        let buf = win.buffer();
        match buf.bytes_at(start, rows * bpr) {
            Ok(bytes) => bytes,
            Err(e) => {
                log::error!("Failed to read view at {}: {}", start, e);
                vec![]
            }
        }
    };
    let edited: Vec<Range<u64>> = win.buffer().edited_indices();
    let is_edited = |pos: u64| edited.iter().any(|range| range.contains(&pos));

    let mut point = None;
    for y in 0..rows {
        let row_start = start + (y * bpr) as u64;
        // Rows that have no content and do not contain the cursor
        if row_start >= len && !(row_start <= cursor && cursor < row_start + bpr as u64) {
            grid.put_str(Point::new(0, y), "~", theme.offset);
            continue;
        }

        let offset = format!("{:0width$x}", row_start, width = layout.offset_width);
        grid.put_str(Point::new(0, y), &offset, theme.offset);

        for i in 0..bpr {
            let pos = row_start + i as u64;
            let hex_at = Point::new(layout.hex_x(i), y);
            let ascii_at = Point::new(layout.ascii_x(i), y);
            let index = y * bpr + i;

            if let Some(byte) = bytes.get(index).copied() {
                let mut style = theme.default;
                if is_edited(pos) {
                    style.override_with(&theme.edited);
                }

                grid.put_str(hex_at, &format!("{:02x}", byte), style);
                grid.put_str(ascii_at, &hex::printable(byte).to_string(), style);
            }

            if pos == cursor {
                let style = cursor_style(theme);
                grid.style_row(y, hex_at.x, 2, style);
                grid.style_row(y, ascii_at.x, 1, style);

                let nibble = usize::from(win.pending_nibble().is_some());
                point = Some(Point::new(hex_at.x + nibble, y));
            }
        }
    }

    point
}

fn cursor_style(theme: &Theme) -> Style {
    let mut style = theme.default;
    style.override_with(&theme.cursor);
    style
}
