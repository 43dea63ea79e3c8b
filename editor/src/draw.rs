mod prompt;
mod statusline;
mod window;

use hexe_messages::redraw::{Cell, Grid, Point, Size};

use crate::editor::Editor;

use self::{prompt::draw_message_line, statusline::draw_statusline, window::draw_window};

/// Number of rows available for the hex view, the statusline and the message
/// line take one row each
pub(crate) fn view_rows(size: Size) -> usize {
    size.height.saturating_sub(2).max(1)
}

pub(crate) fn draw(editor: &Editor, size: Size) -> Grid {
    let mut grid = Grid::new(size);
    let theme = editor.theme();
    for y in 0..size.height {
        for x in 0..size.width {
            grid.put(Point::new(x, y), Cell::with_style(theme.default));
        }
    }

    let rows = view_rows(size);
    let win = editor.window();
    let view_cursor = draw_window(&mut grid, win, theme, rows);

    if size.height >= 3 {
        draw_statusline(&mut grid, win, theme, editor.pending_keys(), rows);
    }

    let prompt_cursor = if size.height >= 2 {
        draw_message_line(&mut grid, win, theme, size.height - 1)
    } else {
        None
    };

    grid.set_cursor(prompt_cursor.or(view_cursor));
    grid
}
