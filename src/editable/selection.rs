//! Anchor/follower selection over the row buffer.

use std::ops::Range;

use super::cursor::{Cursor, Position};
use super::rows::RowBuffer;

/// A text selection with an anchor (where it began) and a follower
/// (tracking the live cursor). Meaningless while inactive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    /// Where the selection started (fixed point)
    pub anchor: Position,
    /// Where the cursor is (moving point)
    pub follower: Position,
    pub active: bool,
}

impl Selection {
    pub fn new(anchor: Position, follower: Position) -> Self {
        Self {
            anchor,
            follower,
            active: true,
        }
    }

    /// Begin a selection at the cursor
    pub fn start_at(&mut self, cursor: &Cursor) {
        self.anchor = cursor.position();
        self.follower = cursor.position();
        self.active = true;
    }

    /// Start a selection before a movement, but only when extending and no
    /// selection is already in progress.
    pub fn try_start(&mut self, cursor: &Cursor, shift: bool) {
        if shift && !self.active {
            self.start_at(cursor);
        }
    }

    /// Track the cursor after a movement, or drop the selection entirely
    /// when the movement was not extending it.
    pub fn follow(&mut self, cursor: &Cursor, shift: bool) {
        if shift {
            self.follower = cursor.position();
        } else {
            self.cancel();
        }
    }

    pub fn cancel(&mut self) {
        *self = Self::default();
    }

    pub fn start(&self) -> Position {
        self.anchor.min(self.follower)
    }

    pub fn end(&self) -> Position {
        self.anchor.max(self.follower)
    }

    /// Check if selection is empty (anchor == follower)
    pub fn is_empty(&self) -> bool {
        self.anchor == self.follower
    }

    /// Active and spanning at least one character
    pub fn has_content(&self) -> bool {
        self.active && !self.is_empty()
    }

    /// Check if selection is reversed (follower before anchor)
    pub fn is_reversed(&self) -> bool {
        self.follower < self.anchor
    }

    pub fn is_row_selected(&self, row: usize) -> bool {
        self.has_content() && (self.start().row..=self.end().row).contains(&row)
    }

    /// Highlighted `[start, end)` columns of `row`, whose visible length is `row_len`
    pub fn row_span(&self, row: usize, row_len: usize) -> Option<Range<usize>> {
        if !self.is_row_selected(row) {
            return None;
        }
        let (start, end) = (self.start(), self.end());
        let from = if row == start.row { start.column } else { 0 };
        let to = if row == end.row { end.column } else { row_len };
        Some(from.min(row_len)..to.min(row_len).max(from.min(row_len)))
    }

    /// Cover the whole buffer, follower at the end
    pub fn select_all(&mut self, rows: &RowBuffer) {
        let last = rows.last_row();
        self.anchor = Position::zero();
        self.follower = Position::new(last, rows.row_len(last));
        self.active = true;
    }

    /// Scalar range of the selection in the logical text
    pub fn offsets(&self, rows: &RowBuffer) -> Range<usize> {
        let (start, end) = (self.start(), self.end());
        rows.position_of(start.row, start.column)..rows.position_of(end.row, end.column)
    }

    /// Whether the selection reaches from document start to document end
    pub fn covers_all(&self, rows: &RowBuffer) -> bool {
        let last = rows.last_row();
        self.start() == Position::zero() && self.end() >= Position::new(last, rows.row_len(last))
    }

    /// Clamp both endpoints into the buffer
    pub fn sanitize(&mut self, rows: &RowBuffer) {
        for pos in [&mut self.anchor, &mut self.follower] {
            pos.row = pos.row.min(rows.last_row());
            pos.column = pos.column.min(rows.row_len(pos.row));
        }
    }

    /// Selected text, or `""` when nothing is selected
    pub fn extract(&self, rows: &RowBuffer) -> String {
        if !self.has_content() {
            return String::new();
        }
        let (start, end) = (self.start(), self.end());
        if start.row == end.row {
            return rows
                .visible(start.row)
                .chars()
                .skip(start.column)
                .take(end.column.saturating_sub(start.column))
                .collect();
        }
        rows.slice(self.offsets(rows))
    }
}
