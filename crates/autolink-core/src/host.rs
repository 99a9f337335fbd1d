//! Host seam: the editor surface and the notification primitive the commands drive.

use std::fmt;
use std::ops::Range;

/// Zero-based line and character position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Cursor {
    pub line: usize,
    pub ch: usize,
}

impl Cursor {
    pub fn new(line: usize, ch: usize) -> Self {
        Self { line, ch }
    }
}

/// The host refused a cursor position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorError {
    pub requested: Cursor,
}

impl fmt::Display for CursorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cursor position {}:{} is outside the document",
            self.requested.line, self.requested.ch
        )
    }
}

impl std::error::Error for CursorError {}

/// Live document buffer of the host editor.
pub trait Editor {
    fn text(&self) -> String;
    fn set_text(&mut self, text: String);
    fn selection(&self) -> String;
    fn replace_selection(&mut self, replacement: &str);
    fn cursor(&self) -> Cursor;
    fn set_cursor(&mut self, cursor: Cursor) -> Result<(), CursorError>;
}

/// Transient status messages (fire-and-forget).
pub trait Notifier {
    fn notify(&self, message: &str);
}

/// Notifier that drops every message.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn notify(&self, _message: &str) {}
}

/// Notifier that keeps messages, in order.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: std::sync::Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.messages
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(message.to_string());
    }
}

/// In-memory editor over a string with a byte-range selection.
///
/// Replacing the selection collapses it and leaves the cursor at the end of
/// the inserted text.
#[derive(Debug, Clone, Default)]
pub struct BufferEditor {
    text: String,
    selection: Range<usize>,
    cursor: Cursor,
}

impl BufferEditor {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            selection: 0..0,
            cursor: Cursor::default(),
        }
    }

    /// Select a byte range. Out-of-range or non-boundary offsets are clamped
    /// back to the nearest preceding character boundary.
    pub fn with_selection(mut self, range: Range<usize>) -> Self {
        self.select(range);
        self
    }

    pub fn select(&mut self, range: Range<usize>) {
        let start = floor_boundary(&self.text, range.start);
        let end = floor_boundary(&self.text, range.end.max(range.start));
        self.selection = start..end;
        self.cursor = position_of(&self.text, end);
    }

    pub fn selection_range(&self) -> Range<usize> {
        self.selection.clone()
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

impl Editor for BufferEditor {
    fn text(&self) -> String {
        self.text.clone()
    }

    fn set_text(&mut self, text: String) {
        self.text = text;
        self.select(self.selection.clone());
    }

    fn selection(&self) -> String {
        self.text[self.selection.clone()].to_string()
    }

    fn replace_selection(&mut self, replacement: &str) {
        let start = self.selection.start;
        self.text.replace_range(self.selection.clone(), replacement);
        let end = start + replacement.len();
        self.selection = end..end;
        self.cursor = position_of(&self.text, end);
    }

    fn cursor(&self) -> Cursor {
        self.cursor
    }

    fn set_cursor(&mut self, cursor: Cursor) -> Result<(), CursorError> {
        let Some(line) = self.text.split('\n').nth(cursor.line) else {
            return Err(CursorError { requested: cursor });
        };
        if cursor.ch > line.chars().count() {
            return Err(CursorError { requested: cursor });
        }
        self.cursor = cursor;
        Ok(())
    }
}

fn floor_boundary(text: &str, offset: usize) -> usize {
    let mut offset = offset.min(text.len());
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

fn position_of(text: &str, offset: usize) -> Cursor {
    let before = &text[..offset];
    let line = before.matches('\n').count();
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    Cursor::new(line, before[line_start..].chars().count())
}
