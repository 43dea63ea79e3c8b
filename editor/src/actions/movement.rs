action!("Cursor: next byte", fn next_byte(editor) {
    editor.window_mut().cursor_next();
});

action!("Cursor: previous byte", fn prev_byte(editor) {
    editor.window_mut().cursor_prev();
});

action!("Cursor: same column on the next row", fn next_row(editor) {
    editor.window_mut().cursor_down();
});

action!("Cursor: same column on the previous row", fn prev_row(editor) {
    editor.window_mut().cursor_up();
});

action!("Cursor: start of the next row", fn next_row_start(editor) {
    editor.window_mut().cursor_next_row();
});

action!("Cursor: start of the current or previous row", fn prev_row_start(editor) {
    editor.window_mut().cursor_prev_row();
});

action!("Cursor: start of row", fn row_start(editor) {
    editor.window_mut().cursor_row_start();
});

action!("Cursor: end of row", fn row_end(editor) {
    editor.window_mut().cursor_row_end();
});

action!("Cursor: start of buffer", fn buffer_start(editor) {
    editor.window_mut().cursor_buffer_start();
});

action!("Cursor: end of buffer", fn buffer_end(editor) {
    editor.window_mut().cursor_buffer_end();
});

action!("View: scroll down one page", fn page_down(editor) {
    editor.window_mut().page_down();
});

action!("View: scroll up one page", fn page_up(editor) {
    editor.window_mut().page_up();
});
