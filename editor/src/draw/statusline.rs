use hexe_messages::{
    keyevents_to_string,
    redraw::{Grid, Point},
    KeyEvent,
};

use crate::editor::{themes::Theme, window::Window};

pub(crate) fn draw_statusline(
    grid: &mut Grid,
    win: &Window,
    theme: &Theme,
    pending: &[KeyEvent],
    y: usize,
) {
    let width = grid.size().width;
    let mut style = theme.default;
    style.override_with(&theme.statusline);
    grid.put_str(Point::new(0, y), &" ".repeat(width), style);

    let name = win
        .path()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "[No Name]".into());
    let modified = if win.is_modified() { " [+]" } else { "" };
    let left = format!(
        " {} | {}{}",
        win.mode().as_ref().to_uppercase(),
        name,
        modified
    );
    grid.put_str(Point::new(0, y), &left, style);

    let keys = keyevents_to_string(pending);
    let right = format!("{}  {:#x} / {:#x} ", keys, win.cursor(), win.len());
    let right_len = right.chars().count();
    let left_len = left.chars().count();
    if left_len + right_len < width {
        grid.put_str(Point::new(width - right_len, y), &right, style);
    }
}

#[cfg(test)]
mod test {
    use std::path::PathBuf;

    use hexe_buffer::Buffer;
    use hexe_messages::redraw::Size;

    use super::*;
    use crate::editor::options::WindowOptions;

    #[test]
    fn shows_mode_name_and_position() {
        let mut win = Window::new(
            Buffer::from_bytes(vec![0u8; 32]),
            Some(PathBuf::from("data.bin")),
            WindowOptions::default(),
            10,
        );
        win.goto(17);
        win.delete_at_cursor().unwrap();

        let mut grid = Grid::new(Size::new(60, 1));
        draw_statusline(&mut grid, &win, &Theme::default(), &[], 0);
        let text = grid.row_text(0);
        assert!(text.starts_with(" NORMAL | data.bin [+]"));
        assert!(text.ends_with("0x11 / 0x1f "));
    }

    #[test]
    fn unnamed_buffer() {
        let win = Window::new(Buffer::new(), None, WindowOptions::default(), 10);
        let mut grid = Grid::new(Size::new(60, 1));
        draw_statusline(&mut grid, &win, &Theme::default(), &[], 0);
        assert!(grid.row_text(0).starts_with(" NORMAL | [No Name]  "));
    }
}
