//! Abstraction over the editable text surface the keyboard is attached to.
//!
//! Host platforms expose the document through a cursor-relative window: a
//! bounded run of text before the cursor, a bounded run after it, and the
//! current selection. Whole-document reads require walking the cursor (see
//! `sampler`). All offsets here are in characters, never bytes, because the
//! host counts user-perceived positions.

use std::sync::{Arc, Mutex};

/// The editable-text surface contract.
///
/// Reads reflect a possibly-asynchronous underlying document: after a
/// `move_cursor`, the context windows may briefly return stale text, which is
/// why the sampler inserts a settle delay between a move and the next read.
pub trait TextSurface {
    /// Bounded run of text immediately before the cursor, `None` if the host
    /// has nothing to report.
    fn text_before_cursor(&self) -> Option<String>;

    /// Bounded run of text immediately after the cursor.
    fn text_after_cursor(&self) -> Option<String>;

    /// The current selection, if any.
    fn selected_text(&self) -> Option<String>;

    /// Move the cursor by `offset` characters (negative = left). Hosts clamp
    /// to the document bounds.
    fn move_cursor(&mut self, offset: i64);

    /// Insert text at the cursor.
    fn insert_text(&mut self, text: &str);

    /// Delete one character before the cursor.
    fn delete_backward(&mut self);
}

// Lets a host (or a test) keep its own handle to a surface while the worker
// owns the boxed trait object.
impl<S: TextSurface> TextSurface for Arc<Mutex<S>> {
    fn text_before_cursor(&self) -> Option<String> {
        self.lock().ok()?.text_before_cursor()
    }

    fn text_after_cursor(&self) -> Option<String> {
        self.lock().ok()?.text_after_cursor()
    }

    fn selected_text(&self) -> Option<String> {
        self.lock().ok()?.selected_text()
    }

    fn move_cursor(&mut self, offset: i64) {
        if let Ok(mut s) = self.lock() {
            s.move_cursor(offset);
        }
    }

    fn insert_text(&mut self, text: &str) {
        if let Ok(mut s) = self.lock() {
            s.insert_text(text);
        }
    }

    fn delete_backward(&mut self) {
        if let Ok(mut s) = self.lock() {
            s.delete_backward();
        }
    }
}

/// In-process [`TextSurface`] over a character buffer.
///
/// Context reads are limited to `window` characters on each side of the
/// cursor, mimicking the bounded windows real hosts provide. Used by tests
/// and by hosts that mirror the document into the keyboard process.
#[derive(Debug, Clone)]
pub struct BufferSurface {
    chars: Vec<char>,
    cursor: usize,
    window: usize,
}

impl BufferSurface {
    /// Empty surface with the given context window size.
    pub fn new(window: usize) -> Self {
        Self {
            chars: Vec::new(),
            cursor: 0,
            window: window.max(1),
        }
    }

    /// Surface pre-filled with `text`, cursor at the end.
    pub fn with_text(text: &str, window: usize) -> Self {
        let chars: Vec<char> = text.chars().collect();
        let cursor = chars.len();
        Self {
            chars,
            cursor,
            window: window.max(1),
        }
    }

    /// Full document contents.
    pub fn text(&self) -> String {
        self.chars.iter().collect()
    }

    /// Cursor position in characters from the start of the document.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Replace the whole document, cursor moved to the end.
    pub fn set_text(&mut self, text: &str) {
        self.chars = text.chars().collect();
        self.cursor = self.chars.len();
    }
}

impl TextSurface for BufferSurface {
    fn text_before_cursor(&self) -> Option<String> {
        let start = self.cursor.saturating_sub(self.window);
        Some(self.chars[start..self.cursor].iter().collect())
    }

    fn text_after_cursor(&self) -> Option<String> {
        let end = (self.cursor + self.window).min(self.chars.len());
        Some(self.chars[self.cursor..end].iter().collect())
    }

    fn selected_text(&self) -> Option<String> {
        // The buffer surface does not model selections.
        None
    }

    fn move_cursor(&mut self, offset: i64) {
        let target = self.cursor as i64 + offset;
        self.cursor = target.clamp(0, self.chars.len() as i64) as usize;
    }

    fn insert_text(&mut self, text: &str) {
        for ch in text.chars() {
            self.chars.insert(self.cursor, ch);
            self.cursor += 1;
        }
    }

    fn delete_backward(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.chars.remove(self.cursor);
        }
    }
}
