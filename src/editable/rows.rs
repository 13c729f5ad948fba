//! Row buffer: the edited text held as a sequence of display rows.
//!
//! A row that ends a paragraph carries a trailing `'\n'` sentinel; rows
//! produced purely by word-wrap do not. Concatenating every row verbatim
//! yields the logical text, so the sentinel doubles as the paragraph's
//! newline character and scalar positions count it like any other char.

use std::fmt;
use std::ops::Range;
use std::sync::Arc;

use ropey::Rope;

use super::cursor::Position;
use super::measure::{Monospace, TextMeasure};

/// Paragraph terminator stored at the end of a row
pub const SENTINEL: char = '\n';

/// Split `text` into display rows no wider than `width`.
///
/// Wrapping is greedy at character granularity: each row takes the widest
/// prefix that fits, and always at least one character so that glyphs wider
/// than the whole row still make progress. `None` disables wrapping.
/// Joining the returned rows reproduces `text` exactly.
pub fn wrap(text: &str, width: Option<f32>, measure: &dyn TextMeasure) -> Vec<String> {
    let mut rows = Vec::new();

    for piece in text.split_inclusive(SENTINEL) {
        let (body, terminated) = match piece.strip_suffix(SENTINEL) {
            Some(body) => (body, true),
            None => (piece, false),
        };

        let mut rest = body;
        loop {
            let split = match width {
                Some(width) => {
                    let take = measure.fit(rest, width).max(1);
                    rest.char_indices()
                        .nth(take)
                        .map(|(i, _)| i)
                        .unwrap_or(rest.len())
                }
                None => rest.len(),
            };
            let (head, tail) = rest.split_at(split);
            if tail.is_empty() {
                let mut row = head.to_string();
                if terminated {
                    row.push(SENTINEL);
                }
                rows.push(row);
                break;
            }
            rows.push(head.to_string());
            rest = tail;
        }
    }

    rows
}

/// Ordered display rows plus the wrap width they were computed against.
#[derive(Clone)]
pub struct RowBuffer {
    rows: Vec<String>,
    width: Option<u32>,
    measure: Arc<dyn TextMeasure>,
}

impl RowBuffer {
    /// Empty buffer (one empty row) that wraps at `width`, or never when `None`
    pub fn new(width: Option<u32>, measure: Arc<dyn TextMeasure>) -> Self {
        Self {
            rows: vec![String::new()],
            width,
            measure,
        }
    }

    /// Unwrapped buffer measuring in columns
    pub fn unwrapped() -> Self {
        Self::new(None, Arc::new(Monospace::columns()))
    }

    /// Build a buffer from explicit rows, kept as given
    pub fn from_rows<I, S>(rows: I, width: Option<u32>, measure: Arc<dyn TextMeasure>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut buffer = Self {
            rows: rows.into_iter().map(Into::into).collect(),
            width,
            measure,
        };
        buffer.sanitize();
        buffer
    }

    pub fn measure(&self) -> &dyn TextMeasure {
        self.measure.as_ref()
    }

    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn last_row(&self) -> usize {
        self.rows.len().saturating_sub(1)
    }

    pub fn get(&self, row: usize) -> Option<&str> {
        self.rows.get(row).map(String::as_str)
    }

    /// Row content with the sentinel stripped
    pub fn visible(&self, row: usize) -> &str {
        self.get(row)
            .map(|s| s.strip_suffix(SENTINEL).unwrap_or(s))
            .unwrap_or("")
    }

    /// Whether `row` ends its paragraph
    pub fn has_sentinel(&self, row: usize) -> bool {
        self.get(row).is_some_and(|s| s.ends_with(SENTINEL))
    }

    /// Visible length of `row` in characters (sentinel excluded)
    pub fn row_len(&self, row: usize) -> usize {
        self.visible(row).chars().count()
    }

    /// Stored length of `row` in characters (sentinel included)
    pub fn raw_len(&self, row: usize) -> usize {
        self.get(row).map(|s| s.chars().count()).unwrap_or(0)
    }

    pub fn insert_row(&mut self, row: usize, content: impl Into<String>) {
        let row = row.min(self.rows.len());
        self.rows.insert(row, content.into());
    }

    pub fn remove_row(&mut self, row: usize) -> Option<String> {
        if row >= self.rows.len() {
            return None;
        }
        Some(self.rows.remove(row))
    }

    pub fn replace_row(&mut self, row: usize, content: impl Into<String>) {
        if let Some(slot) = self.rows.get_mut(row) {
            *slot = content.into();
        }
    }

    pub fn replace_row_with(&mut self, row: usize, f: impl FnOnce(&str) -> String) {
        if let Some(slot) = self.rows.get_mut(row) {
            *slot = f(slot);
        }
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }

    /// Guarantee at least one row
    pub fn sanitize(&mut self) {
        if self.rows.is_empty() {
            self.rows.push(String::new());
        }
    }

    /// Verbatim concatenation of all rows, which is the logical text
    pub fn text(&self) -> String {
        self.rows.concat()
    }

    /// Replace all rows with a fresh wrap of `text`
    pub fn set_text(&mut self, text: &str) {
        self.rows = wrap(text, self.wrap_width(), self.measure.as_ref());
        self.sanitize();
    }

    /// Paragraphs without their newline characters
    pub fn lines(&self) -> Vec<String> {
        self.text().split(SENTINEL).map(str::to_string).collect()
    }

    pub fn set_lines<S: AsRef<str>>(&mut self, lines: &[S]) {
        let text = lines
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join("\n");
        self.set_text(&text);
    }

    pub fn width(&self) -> Option<u32> {
        self.width
    }

    /// Change the wrap width; returns true when rows were recomputed
    pub fn set_width(&mut self, width: Option<u32>) -> bool {
        if self.width == width {
            return false;
        }
        self.width = width;
        self.rewrap();
        true
    }

    fn wrap_width(&self) -> Option<f32> {
        self.width.map(|w| w as f32)
    }

    /// An empty last row following a sentinel row: a caret slot for an
    /// empty trailing paragraph that wrapping alone would not produce.
    pub fn has_trailing_slot(&self) -> bool {
        let n = self.rows.len();
        n > 1 && self.rows[n - 1].is_empty() && self.rows[n - 2].ends_with(SENTINEL)
    }

    /// Re-wrap the current text, keeping a trailing caret slot
    pub fn rewrap(&mut self) {
        let text = self.text();
        self.reflow(&text);
    }

    /// Replace the text after an edit, keeping a trailing caret slot when
    /// the new text still ends with a newline.
    pub fn reflow(&mut self, text: &str) {
        let keep_slot = self.has_trailing_slot() && text.ends_with(SENTINEL);
        self.set_text(text);
        if keep_slot && !self.has_trailing_slot() {
            self.rows.push(String::new());
        }
    }

    /// Append the trailing caret slot if the text ends with a newline
    pub fn open_trailing_slot(&mut self) -> bool {
        let last = self.last_row();
        if self.has_sentinel(last) {
            self.rows.push(String::new());
            true
        } else {
            false
        }
    }

    /// Total length of the logical text in characters
    pub fn char_len(&self) -> usize {
        self.rows.iter().map(|r| r.chars().count()).sum()
    }

    /// Scalar offset of `(row, column)` into the logical text
    pub fn position_of(&self, row: usize, column: usize) -> usize {
        let row = row.min(self.last_row());
        let before: usize = self.rows[..row].iter().map(|r| r.chars().count()).sum();
        before + column.min(self.row_len(row))
    }

    /// Inverse of [`position_of`](Self::position_of).
    ///
    /// An offset sitting exactly on a wrap boundary resolves to the start of
    /// the following row, matching where rightward movement lands.
    pub fn offset_to_position(&self, offset: usize) -> Position {
        let last = self.last_row();
        let mut start = 0;
        for row in 0..self.rows.len() {
            let visible = self.row_len(row);
            let sentinel = self.has_sentinel(row);
            let end = start + visible;
            if offset < end || (offset == end && (sentinel || row == last)) {
                return Position::new(row, offset.saturating_sub(start));
            }
            start = end + usize::from(sentinel);
        }
        Position::new(last, self.row_len(last))
    }

    /// Logical text as a rope for char-indexed editing
    pub fn rope(&self) -> Rope {
        self.rows.iter().map(String::as_str).collect()
    }

    /// Characters in `range` of the logical text
    pub fn slice(&self, range: Range<usize>) -> String {
        let rope = self.rope();
        let end = range.end.min(rope.len_chars());
        let start = range.start.min(end);
        rope.slice(start..end).to_string()
    }

    /// Logical text with `range` replaced by `insert`, without mutating the buffer
    pub fn spliced(&self, range: Range<usize>, insert: &str) -> String {
        let mut rope = self.rope();
        let end = range.end.min(rope.len_chars());
        let start = range.start.min(end);
        if start < end {
            rope.remove(start..end);
        }
        if !insert.is_empty() {
            rope.insert(start, insert);
        }
        rope.to_string()
    }
}

impl fmt::Debug for RowBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowBuffer")
            .field("rows", &self.rows)
            .field("width", &self.width)
            .finish()
    }
}

impl Default for RowBuffer {
    fn default() -> Self {
        Self::unwrapped()
    }
}
