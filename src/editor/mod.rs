//! Line-oriented document buffer.
//!
//! The sync engine never owns the document. It reads and writes single
//! lines through the [`LineBuffer`] trait, re-reading on every evaluation;
//! [`EditorBuffer`] is the rope-backed implementation used by the
//! interactive host and the batch/watch modes.

mod buffer;

pub use buffer::{Cursor, Direction, EditorBuffer};

/// Line-level access to a document owned by a host editor.
pub trait LineBuffer {
    /// Content of line `idx` without its trailing newline, or `None` if
    /// `idx` is past the end of the document.
    fn line(&self, idx: usize) -> Option<String>;

    /// Index of the last line.
    fn last_line_index(&self) -> usize;

    /// Replace the content of line `idx`. `text` may contain embedded
    /// newlines, which expand into multiple physical lines.
    fn set_line(&mut self, idx: usize, text: &str);

    /// Current cursor position.
    fn cursor(&self) -> Cursor;

    /// Whether the host editor has focus.
    fn has_focus(&self) -> bool;
}
