pub(crate) mod config;
pub(crate) mod history;
pub(crate) mod keymap;
pub(crate) mod options;
pub(crate) mod themes;
pub(crate) mod window;


use std::{
    io, mem,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context};
use hexe_buffer::Buffer;
use hexe_messages::{
    redraw::{Grid, Size},
    KeyEvent,
};

use self::{
    config::Config,
    keymap::{KeymapResult, Keymaps},
    themes::Theme,
    window::{Mode, Prompt, PromptAction, Window},
};
use crate::{common::hex, draw, error::EditorError};

pub struct Editor {
    window: Window,
    keymaps: Keymaps,
    /// Keys of a partially typed key sequence
    keys: Vec<KeyEvent>,
    theme: Theme,
    is_running: bool,
}

impl Editor {
    /// Editor with an empty unnamed buffer
    pub fn new(config: &Config) -> Editor {
        Editor::with_buffer(Buffer::new(), None, config)
    }

    /// Open the file at `path`. A file that does not exist yet is created when
    /// saved.
    pub fn open(path: &Path, config: &Config) -> anyhow::Result<Editor> {
        if path.is_dir() {
            bail!("{:?} is a directory", path);
        }

        let (buf, is_new) = match Buffer::from_path(path) {
            Ok(buf) => (buf, false),
            Err(e) if e.kind() == io::ErrorKind::NotFound => (Buffer::new(), true),
            Err(e) => return Err(e).with_context(|| format!("Failed to open {:?}", path)),
        };

        log::info!("Opened {:?}, {} bytes", path, buf.len());
        let mut editor = Editor::with_buffer(buf, Some(path.to_path_buf()), config);
        if is_new {
            editor.window.info(format!("\"{}\" [New]", path.display()));
        }

        Ok(editor)
    }

    pub fn with_buffer(buf: Buffer, path: Option<PathBuf>, config: &Config) -> Editor {
        let mut keymaps = Keymaps::new();
        let errors = keymaps.configure(&config.keymap);
        let mut window = Window::new(
            buf,
            path,
            config.window.clone(),
            config.editor.history_size,
        );

        for error in &errors {
            log::error!("{}", error);
        }
        if let Some(error) = errors.first() {
            window.error(error.clone());
        }

        Editor {
            window,
            keymaps,
            keys: vec![],
            theme: Theme::new(&config.theme),
            is_running: true,
        }
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn quit(&mut self) {
        log::info!("Quit");
        self.is_running = false;
    }

    pub fn mode(&self) -> Mode {
        self.window.mode()
    }

    pub fn cursor(&self) -> u64 {
        self.window.cursor()
    }

    /// Current buffer contents
    pub fn contents(&self) -> Buffer {
        self.window.buffer().clone()
    }

    pub(crate) fn window(&self) -> &Window {
        &self.window
    }

    pub(crate) fn window_mut(&mut self) -> &mut Window {
        &mut self.window
    }

    pub(crate) fn theme(&self) -> &Theme {
        &self.theme
    }

    pub(crate) fn pending_keys(&self) -> &[KeyEvent] {
        &self.keys
    }

    /// Show the error in the message line, returns the value on success
    pub(crate) fn report<T>(&mut self, result: Result<T, EditorError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                self.window.error(e.to_string());
                None
            }
        }
    }

    pub(crate) fn open_prompt(&mut self, mode: Mode, message: &str, on_confirm: PromptAction) {
        debug_assert!(mode.is_prompt());
        self.window.set_mode(mode);
        self.window.prompt = Some(Prompt::new(message, on_confirm));
    }

    pub fn handle_key(&mut self, event: KeyEvent) {
        log::debug!("KeyEvent '{event}'");
        if self.keys.is_empty() && !self.window.mode().is_prompt() {
            self.window.clear_message();
        }

        self.keys.push(event);
        let mode = self.window.mode();

        match self.keymaps.get(mode, &self.keys) {
            KeymapResult::Matched(action) => {
                self.keys.clear();
                log::debug!("Action {:?}", action);
                action.execute(self);
            }
            KeymapResult::Pending => return,
            KeymapResult::NotFound => {
                let events = mem::take(&mut self.keys);
                for event in events {
                    self.handle_unbound(event);
                }
            }
        }

        // Everything outside of insert and replace modes is a complete edit
        if !self.window.mode().is_editing() {
            self.window.commit();
        }
    }

    /// Typed characters that are not bound to anything are input in editing
    /// and prompt modes
    fn handle_unbound(&mut self, event: KeyEvent) {
        let Some(ch) = event.typed_char() else {
            return;
        };

        let mode = self.window.mode();
        if mode.is_editing() {
            if let Some(digit) = hex::hex_digit(ch) {
                let result = self.window.input_nibble(digit);
                self.report(result);
            }
        } else if mode.is_prompt() {
            if let Some(prompt) = self.window.prompt.as_mut() {
                prompt.insert_char_at_cursor(ch);
            }
        }
    }

    /// Draw the editor to a grid of `size`
    pub fn draw(&mut self, size: Size) -> Grid {
        self.window.set_rows(draw::view_rows(size));
        draw::draw(self, size)
    }
}
