mod message;
mod mode;
mod prompt;

use std::{
    cmp,
    path::{Path, PathBuf},
    sync::Arc,
};

use hexe_buffer::Buffer;
use parking_lot::{Mutex, MutexGuard};

pub(crate) use self::message::{Message, Severity};
pub use self::mode::Mode;
pub(crate) use self::prompt::{Prompt, PromptAction};

use super::{
    history::{History, Snapshot},
    options::WindowOptions,
};
use crate::{common::file, error::EditorError};

/// Last confirmed search, repeated with `n` and `N`
#[derive(Debug, Clone)]
pub(crate) struct LastSearch {
    pub(crate) pattern: Vec<u8>,
    pub(crate) backward: bool,
}

/// Byte being typed one nibble at a time
#[derive(Debug, Clone, Copy)]
struct PendingByte {
    high: u8,
    /// Byte that was overwritten, none if the byte was inserted
    replaced: Option<u8>,
}

/// Single view to a buffer, holds everything related to editing it.
#[derive(Debug)]
pub(crate) struct Window {
    buf: Arc<Mutex<Buffer>>,
    path: Option<PathBuf>,

    cursor: u64,
    /// Offset of the first byte on the first visible row
    view_offset: u64,
    /// Number of visible rows
    rows: usize,

    mode: Mode,
    pending: Option<PendingByte>,
    /// Buffer was edited after the last undo point
    dirty: bool,

    message: Option<Message>,
    pub(crate) prompt: Option<Prompt>,
    pub(crate) last_search: Option<LastSearch>,
    history: History,
    pub(crate) options: WindowOptions,
}

impl Window {
    pub fn new(
        buf: Buffer,
        path: Option<PathBuf>,
        options: WindowOptions,
        history_size: usize,
    ) -> Window {
        let initial = Snapshot {
            buffer: buf.clone(),
            cursor: 0,
            view_offset: 0,
        };

        Window {
            buf: Arc::new(Mutex::new(buf)),
            path,
            cursor: 0,
            view_offset: 0,
            rows: 1,
            mode: Mode::Normal,
            pending: None,
            dirty: false,
            message: None,
            prompt: None,
            last_search: None,
            history: History::new(initial, history_size),
            options,
        }
    }

    pub fn buffer(&self) -> MutexGuard<'_, Buffer> {
        self.buf.lock()
    }

    pub fn len(&self) -> u64 {
        self.buf.lock().len()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn cursor(&self) -> u64 {
        self.cursor
    }

    pub fn view_offset(&self) -> u64 {
        self.view_offset
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn pending_nibble(&self) -> Option<u8> {
        self.pending.map(|pending| pending.high)
    }

    pub fn is_modified(&self) -> bool {
        self.dirty || !self.history.is_saved_point()
    }

    pub fn bytes_per_row(&self) -> u64 {
        cmp::max(self.options.bytes_per_row, 1) as u64
    }

    pub fn message(&self) -> Option<&Message> {
        self.message.as_ref()
    }

    pub fn info<S: Into<String>>(&mut self, message: S) {
        self.message = Some(Message {
            severity: Severity::Info,
            message: message.into(),
        });
    }

    pub fn error<S: Into<String>>(&mut self, message: S) {
        let message = message.into();
        log::error!("{}", message);
        self.message = Some(Message {
            severity: Severity::Error,
            message,
        });
    }

    pub fn clear_message(&mut self) {
        self.message = None;
    }

    pub fn set_rows(&mut self, rows: usize) {
        self.rows = cmp::max(rows, 1);
        self.view_to_cursor();
    }

    pub fn set_options(&mut self, options: WindowOptions) {
        self.options = options;
        self.view_offset -= self.view_offset % self.bytes_per_row();
        self.view_to_cursor();
    }

    /// Largest valid cursor position. In insert mode the cursor may be placed
    /// after the last byte to append.
    fn max_cursor(&self) -> u64 {
        let len = self.len();
        if self.mode == Mode::Insert {
            len
        } else {
            len.saturating_sub(1)
        }
    }

    pub fn set_mode(&mut self, mode: Mode) {
        if self.mode == mode {
            return;
        }

        // Leaving the mode keeps a half typed byte as it is
        if self.mode.is_editing() {
            self.pending = None;
            self.commit();
        }

        log::debug!("Mode {} -> {}", self.mode, mode);
        self.mode = mode;
        self.cursor = cmp::min(self.cursor, self.max_cursor());
        self.view_to_cursor();
    }

    /// Move cursor to `pos`, clamped to the buffer. A half typed byte is
    /// dropped.
    pub fn goto(&mut self, mut pos: u64) {
        match self.discard_pending() {
            Ok(true) if pos > self.cursor => pos -= 1,
            Ok(_) => {}
            Err(e) => log::error!("Failed to drop half typed byte: {}", e),
        }

        self.cursor = cmp::min(pos, self.max_cursor());
        self.view_to_cursor();
    }

    pub fn cursor_next(&mut self) {
        self.goto(self.cursor.saturating_add(1));
    }

    pub fn cursor_prev(&mut self) {
        self.goto(self.cursor.saturating_sub(1));
    }

    pub fn cursor_down(&mut self) {
        let bpr = self.bytes_per_row();
        let target = self.cursor + bpr;
        // Stay put if there is no next row
        if target / bpr * bpr <= self.max_cursor() {
            self.goto(target);
        }
    }

    pub fn cursor_up(&mut self) {
        let bpr = self.bytes_per_row();
        if self.cursor >= bpr {
            self.goto(self.cursor - bpr);
        }
    }

    pub fn cursor_row_start(&mut self) {
        let bpr = self.bytes_per_row();
        self.goto(self.cursor - self.cursor % bpr);
    }

    pub fn cursor_row_end(&mut self) {
        let bpr = self.bytes_per_row();
        self.goto(self.cursor - self.cursor % bpr + bpr - 1);
    }

    pub fn cursor_next_row(&mut self) {
        let bpr = self.bytes_per_row();
        let target = self.cursor - self.cursor % bpr + bpr;
        if target <= self.max_cursor() {
            self.goto(target);
        }
    }

    pub fn cursor_prev_row(&mut self) {
        let bpr = self.bytes_per_row();
        let start = self.cursor - self.cursor % bpr;
        if start == self.cursor {
            self.goto(start.saturating_sub(bpr));
        } else {
            self.goto(start);
        }
    }

    pub fn cursor_buffer_start(&mut self) {
        self.goto(0);
    }

    pub fn cursor_buffer_end(&mut self) {
        self.goto(u64::MAX);
    }

    fn page_size(&self) -> u64 {
        self.rows as u64 * self.bytes_per_row()
    }

    pub fn page_down(&mut self) {
        let page = self.page_size();
        let last_row = self.max_cursor() - self.max_cursor() % self.bytes_per_row();
        self.view_offset = cmp::min(self.view_offset + page, last_row);
        self.goto(self.cursor + page);
    }

    pub fn page_up(&mut self) {
        let page = self.page_size();
        self.view_offset = self.view_offset.saturating_sub(page);
        self.goto(self.cursor.saturating_sub(page));
    }

    /// Scroll the view so the cursor is visible with `scroll_off` rows of
    /// context where possible
    pub fn view_to_cursor(&mut self) {
        let bpr = self.bytes_per_row();
        let rows = self.rows as u64;
        let scroll_off = cmp::min(self.options.scroll_off as u64, (rows - 1) / 2);
        let cursor_row = self.cursor / bpr;
        let mut top = self.view_offset / bpr;

        if cursor_row < top + scroll_off {
            top = cursor_row.saturating_sub(scroll_off);
        } else if cursor_row + scroll_off >= top + rows {
            top = cursor_row + scroll_off + 1 - rows;
        }

        // Do not scroll past the end of the buffer
        let last_row = self.max_cursor() / bpr;
        if top + rows > last_row + 1 + scroll_off {
            top = cmp::min(top, (last_row + 1 + scroll_off).saturating_sub(rows));
        }

        self.view_offset = top * bpr;
    }

    /// Type a hex digit. In insert mode the first digit inserts a new byte
    /// with the digit as its high nibble and the second digit completes it.
    /// In replace mode the digits overwrite the byte under the cursor.
    pub fn input_nibble(&mut self, digit: u8) -> Result<(), EditorError> {
        debug_assert!(digit < 16);
        let pos = self.cursor;
        let mut buf = self.buf.lock();

        match (self.mode, self.pending) {
            (Mode::Insert, None) => {
                buf.insert(pos, digit << 4)?;
                self.pending = Some(PendingByte {
                    high: digit,
                    replaced: None,
                });
            }
            (Mode::Replace, None) => {
                let replaced = if pos >= buf.len() {
                    buf.insert(pos, digit << 4)?;
                    None
                } else {
                    let old = buf.bytes_at(pos, 1)?.first().copied().unwrap_or(0);
                    buf.replace(pos, digit << 4 | old & 0x0f)?;
                    Some(old)
                };
                self.pending = Some(PendingByte {
                    high: digit,
                    replaced,
                });
            }
            (Mode::Insert | Mode::Replace, Some(pending)) => {
                buf.replace(pos, pending.high << 4 | digit)?;
                self.pending = None;
                self.cursor += 1;
            }
            _ => return Ok(()),
        }

        drop(buf);
        self.dirty = true;
        // In replace mode the cursor cannot move past the last byte
        self.cursor = cmp::min(self.cursor, self.max_cursor_after_edit());
        self.view_to_cursor();
        Ok(())
    }

    fn max_cursor_after_edit(&self) -> u64 {
        if self.mode == Mode::Replace {
            // Replace mode appends at the end like insert
            self.len()
        } else {
            self.max_cursor()
        }
    }

    /// Delete the byte under the cursor
    pub fn delete_at_cursor(&mut self) -> Result<(), EditorError> {
        let pos = self.cursor;
        {
            let mut buf = self.buf.lock();
            if pos >= buf.len() {
                return Ok(());
            }
            buf.delete(pos)?;
        }

        self.pending = None;
        self.dirty = true;
        self.goto(pos);
        Ok(())
    }

    /// Delete the byte before the cursor. A half typed byte is dropped
    /// instead.
    pub fn delete_before_cursor(&mut self) -> Result<(), EditorError> {
        if self.pending.is_some() {
            self.discard_pending()?;
            return Ok(());
        }

        if self.cursor == 0 {
            return Ok(());
        }

        let pos = self.cursor - 1;
        self.buf.lock().delete(pos)?;
        self.dirty = true;
        self.goto(pos);
        Ok(())
    }

    /// Drop a half typed byte: an inserted byte is removed and an overwritten
    /// one restored. Returns whether a byte was removed.
    fn discard_pending(&mut self) -> Result<bool, EditorError> {
        let pending = match self.pending.take() {
            Some(pending) => pending,
            None => return Ok(false),
        };

        let mut buf = self.buf.lock();
        match pending.replaced {
            Some(byte) => {
                buf.replace(self.cursor, byte)?;
                Ok(false)
            }
            None => {
                buf.delete(self.cursor)?;
                Ok(true)
            }
        }
    }

    /// Complete the current edit and create an undo point if anything was
    /// changed
    pub fn commit(&mut self) {
        if !self.dirty {
            return;
        }

        let snapshot = Snapshot {
            buffer: self.buf.lock().clone(),
            cursor: self.cursor,
            view_offset: self.view_offset,
        };
        self.history.push(snapshot);
        self.dirty = false;
        log::debug!("Undo point added, {} in history", self.history.len());
    }

    fn restore(&mut self, snapshot: Snapshot) {
        *self.buf.lock() = snapshot.buffer;
        self.cursor = snapshot.cursor;
        self.view_offset = snapshot.view_offset;
        self.pending = None;
        self.cursor = cmp::min(self.cursor, self.max_cursor());
        self.view_to_cursor();
    }

    pub fn undo(&mut self) -> bool {
        self.commit();
        if self.history.undo().is_none() {
            return false;
        }

        self.restore(self.history.current().clone());
        true
    }

    pub fn redo(&mut self) -> bool {
        self.commit();
        if self.history.redo().is_none() {
            return false;
        }

        self.restore(self.history.current().clone());
        true
    }

    /// Save the buffer to `path` or to the buffer's own path if not given.
    /// Saving to a new path makes it the buffer's path.
    pub fn save(&mut self, path: Option<&Path>) -> Result<u64, EditorError> {
        let target = match path.or(self.path.as_deref()) {
            Some(p) => p.to_path_buf(),
            None => return Err(EditorError::NoPath),
        };

        self.commit();
        log::info!("Saving to {:?}", target);
        let written = {
            let buf = self.buf.lock();
            file::write_atomic(&target, &buf)?
        };

        self.history.mark_saved();
        self.path = Some(target);
        Ok(written)
    }
}
