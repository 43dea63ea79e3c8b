action!("Text: delete byte under the cursor", fn delete_byte(editor) {
    let result = editor.window_mut().delete_at_cursor();
    editor.report(result);
});

action!("Text: delete byte before the cursor", fn delete_byte_before(editor) {
    let result = editor.window_mut().delete_before_cursor();
    editor.report(result);
});

action!("History: undo", fn undo(editor) {
    let win = editor.window_mut();
    if !win.undo() {
        win.info("Already at oldest change");
    }
});

action!("History: redo", fn redo(editor) {
    let win = editor.window_mut();
    if !win.redo() {
        win.info("Already at newest change");
    }
});

action!("File: save", fn save(editor) {
    let result = editor.window_mut().save(None);
    if let Some(written) = editor.report(result) {
        let win = editor.window_mut();
        let name = win.path().map(|p| p.display().to_string()).unwrap_or_default();
        win.info(format!("\"{}\" {} bytes written", name, written));
    }
});
