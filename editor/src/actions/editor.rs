use crate::error::EditorError;

action!("Editor: quit, fails if there are unsaved changes", fn quit(editor) {
    if editor.window().is_modified() {
        editor.report::<()>(Err(EditorError::Unsaved));
        return;
    }

    editor.quit();
});

action!("Editor: quit without saving", fn force_quit(editor) {
    editor.quit();
});
