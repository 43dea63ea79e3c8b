use hexe_messages::redraw::{Grid, Point};

use crate::editor::{
    themes::Theme,
    window::{Severity, Window},
};

/// Draw the open prompt or the current message to row `y`. Returns the
/// cursor position if a prompt is open.
pub(crate) fn draw_message_line(
    grid: &mut Grid,
    win: &Window,
    theme: &Theme,
    y: usize,
) -> Option<Point> {
    if let Some(prompt) = win.prompt.as_ref() {
        let written = grid.put_str(Point::new(0, y), prompt.message(), theme.default);
        grid.put_str(Point::new(written, y), prompt.input(), theme.default);
        let x = written + prompt.cursor_chars();
        return Some(Point::new(x.min(grid.size().width.saturating_sub(1)), y));
    }

    if let Some(msg) = win.message() {
        let mut style = theme.default;
        match msg.severity {
            Severity::Info => style.override_with(&theme.info),
            Severity::Error => style.override_with(&theme.error),
        }
        grid.put_str(Point::new(0, y), &msg.message, style);
    }

    None
}
