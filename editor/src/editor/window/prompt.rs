use std::sync::Arc;

use crate::editor::Editor;

/// Called with the prompt input when the prompt is confirmed
pub(crate) type PromptAction = Arc<dyn Fn(&mut Editor, &str) + Send + Sync>;

pub(crate) struct Prompt {
    message: String,
    input: String,
    /// Byte index into input
    cursor: usize,

    /// Callback called on confirm
    on_confirm: PromptAction,
}

impl Prompt {
    pub fn new(message: &str, on_confirm: PromptAction) -> Prompt {
        Prompt {
            message: String::from(message),
            input: String::new(),
            cursor: 0,
            on_confirm,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Cursor position counted in characters
    pub fn cursor_chars(&self) -> usize {
        self.input[..self.cursor].chars().count()
    }

    pub fn action(&self) -> PromptAction {
        self.on_confirm.clone()
    }

    pub fn next_char(&mut self) {
        if let Some(ch) = self.input[self.cursor..].chars().next() {
            self.cursor += ch.len_utf8();
        }
    }

    pub fn prev_char(&mut self) {
        if let Some(ch) = self.input[..self.cursor].chars().next_back() {
            self.cursor -= ch.len_utf8();
        }
    }

    pub fn remove_char_before_cursor(&mut self) {
        let end = self.cursor;
        self.prev_char();
        self.input.replace_range(self.cursor..end, "");
    }

    pub fn insert_char_at_cursor(&mut self, ch: char) {
        self.input.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
    }
}

impl std::fmt::Debug for Prompt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Prompt")
            .field("message", &self.message)
            .field("input", &self.input)
            .field("cursor", &self.cursor)
            .finish_non_exhaustive()
    }
}
