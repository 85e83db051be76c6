//! Document sampling over a cursor-windowed text surface.
//!
//! Hosts only expose a bounded context window around the cursor, so the
//! whole document can only be reconstructed by walking the cursor outward
//! chunk by chunk. The context window refreshes asynchronously relative to
//! cursor motion, so each step sleeps for a short settle delay before the
//! next read; without it the walk re-reads stale windows and loops. The
//! fixed delay is a latency/correctness tradeoff to revisit if hosts ever
//! grow a context-refreshed signal.
//!
//! All walks run on the orchestrator's worker thread, which is the only
//! place cursor access happens, so a walk can never interleave with a poll
//! cycle's reads.

use std::thread;
use std::time::Duration;

use crate::surface::TextSurface;

/// Reconstructs sentence- or document-level text from bounded window reads.
#[derive(Debug, Clone)]
pub struct DocumentSampler {
    settle: Duration,
}

impl DocumentSampler {
    pub fn new(settle: Duration) -> Self {
        Self { settle }
    }

    fn settle(&self) {
        if !self.settle.is_zero() {
            thread::sleep(self.settle);
        }
    }

    /// The locally visible context: before-window + selection + after-window,
    /// read once each. No cursor motion.
    pub fn current_sentence(&self, surface: &dyn TextSurface) -> String {
        let before = surface.text_before_cursor().unwrap_or_default();
        let selected = surface.selected_text().unwrap_or_default();
        let after = surface.text_after_cursor().unwrap_or_default();
        format!("{before}{selected}{after}")
    }

    /// Reconstruct the whole document by walking the cursor to both ends.
    ///
    /// Walks backward prepending each before-window and stepping the cursor
    /// left until the window comes back empty, restores the cursor, then
    /// mirrors the walk forward, and restores the cursor again. The cursor
    /// ends where it started; the return value is everything before plus
    /// everything after it.
    pub fn full_document_context(&self, surface: &mut dyn TextSurface) -> String {
        let mut before_acc = String::new();
        loop {
            let chunk = match surface.text_before_cursor() {
                Some(chunk) if !chunk.is_empty() => chunk,
                _ => break,
            };
            let step = chunk.chars().count() as i64;
            before_acc.insert_str(0, &chunk);
            surface.move_cursor(-step);
            self.settle();
        }

        // Back to the original position before walking the other way.
        surface.move_cursor(before_acc.chars().count() as i64);
        self.settle();

        let mut after_acc = String::new();
        loop {
            let chunk = match surface.text_after_cursor() {
                Some(chunk) if !chunk.is_empty() => chunk,
                _ => break,
            };
            let step = chunk.chars().count() as i64;
            after_acc.push_str(&chunk);
            surface.move_cursor(step);
            self.settle();
        }

        surface.move_cursor(-(after_acc.chars().count() as i64));

        format!("{before_acc}{after_acc}")
    }

    /// Jump the cursor past the visible after-window. One bounded move, used
    /// before applying a replacement in sentence mode.
    pub fn move_to_end_of_sentence(&self, surface: &mut dyn TextSurface) {
        if let Some(after) = surface.text_after_cursor() {
            if !after.is_empty() {
                surface.move_cursor(after.chars().count() as i64);
            }
        }
    }

    /// Walk the cursor to the very end of the document, settling between
    /// steps like [`full_document_context`](Self::full_document_context).
    pub fn move_to_end_of_document(&self, surface: &mut dyn TextSurface) {
        loop {
            let chunk = match surface.text_after_cursor() {
                Some(chunk) if !chunk.is_empty() => chunk,
                _ => break,
            };
            surface.move_cursor(chunk.chars().count() as i64);
            self.settle();
        }
    }
}
