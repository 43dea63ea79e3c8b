use std::sync::Arc;

use super::command;
use crate::editor::{window::Mode, Editor};

action!("Prompt: open command line", fn command_prompt(editor) {
    editor.open_prompt(
        Mode::Command,
        ":",
        Arc::new(|editor: &mut Editor, input: &str| {
            let result = command::execute(editor, input);
            editor.report(result);
        }),
    );
});

action!("Prompt: run the prompt input", fn prompt_confirm(editor) {
    let win = editor.window_mut();
    if let Some(prompt) = win.prompt.take() {
        win.set_mode(Mode::Normal);
        let action = prompt.action();
        (action)(editor, prompt.input());
    }
});

action!("Prompt: close", fn prompt_close(editor) {
    let win = editor.window_mut();
    win.prompt = None;
    win.set_mode(Mode::Normal);
});

action!("Prompt: remove character before the cursor", fn prompt_remove_char_before_cursor(editor) {
    let win = editor.window_mut();
    let empty = win.prompt.as_ref().map_or(true, |p| p.input().is_empty());
    if empty {
        // Backspace on an empty prompt closes it
        win.prompt = None;
        win.set_mode(Mode::Normal);
    } else if let Some(prompt) = win.prompt.as_mut() {
        prompt.remove_char_before_cursor();
    }
});

action!("Prompt: next character", fn prompt_next_char(editor) {
    if let Some(prompt) = editor.window_mut().prompt.as_mut() {
        prompt.next_char();
    }
});

action!("Prompt: previous character", fn prompt_prev_char(editor) {
    if let Some(prompt) = editor.window_mut().prompt.as_mut() {
        prompt.prev_char();
    }
});
