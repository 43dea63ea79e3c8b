use crate::editor::window::Mode;

action!("Mode: back to normal mode", fn normal_mode(editor) {
    editor.window_mut().set_mode(Mode::Normal);
});

action!("Mode: insert bytes before the cursor", fn insert_mode(editor) {
    editor.window_mut().set_mode(Mode::Insert);
});

action!("Mode: insert bytes after the cursor", fn append_mode(editor) {
    let win = editor.window_mut();
    let empty = win.len() == 0;
    win.set_mode(Mode::Insert);
    if !empty {
        win.cursor_next();
    }
});

action!("Mode: overwrite bytes", fn replace_mode(editor) {
    editor.window_mut().set_mode(Mode::Replace);
});
