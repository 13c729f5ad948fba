//! EditableState - the row buffer together with its cursor, selection and
//! scroll window, and every movement and edit operation over them.

use std::ops::Range;
use std::sync::Arc;

use super::constraints::EditConstraints;
use super::cursor::{Cursor, Position};
use super::measure::TextMeasure;
use super::messages::MoveTarget;
use super::render::DisplayRow;
use super::rows::RowBuffer;
use super::selection::Selection;
use super::viewport::ScrollWindow;

/// Editable text with one cursor, one selection and a scroll window.
///
/// Single-line editing is the one-row case: wrapping is off, newlines are
/// rejected by the constraints and vertical movement is ignored.
#[derive(Debug, Clone)]
pub struct EditableState {
    /// The display rows
    pub buffer: RowBuffer,
    pub cursor: Cursor,
    pub selection: Selection,
    pub scroll: ScrollWindow,
    /// Constraints for this editing context
    pub constraints: EditConstraints,
    /// Bumped after every applied mutation
    revision: u64,
}

impl EditableState {
    /// Create a new EditableState with the given buffer and constraints
    pub fn new(buffer: RowBuffer, constraints: EditConstraints) -> Self {
        let mut state = Self {
            buffer,
            cursor: Cursor::default(),
            selection: Selection::default(),
            scroll: ScrollWindow::default(),
            constraints,
            revision: 0,
        };
        state.sanitize();
        state
    }

    /// Wrapped multi-row editing
    pub fn multi_line(width: Option<u32>, measure: Arc<dyn TextMeasure>) -> Self {
        Self::new(RowBuffer::new(width, measure), EditConstraints::multi_line())
    }

    /// One unwrapped row
    pub fn single_line(measure: Arc<dyn TextMeasure>) -> Self {
        Self::new(RowBuffer::new(None, measure), EditConstraints::single_line())
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Logical text (rows concatenated verbatim)
    pub fn text(&self) -> String {
        self.buffer.text()
    }

    pub fn lines(&self) -> Vec<String> {
        self.buffer.lines()
    }

    pub fn cursor_position(&self) -> Position {
        self.cursor.position()
    }

    pub fn first_visible_row(&self) -> usize {
        self.scroll.first_visible_row
    }

    /// Get the selected text (empty string if no selection)
    pub fn selected_text(&self) -> String {
        self.selection.extract(&self.buffer)
    }

    pub fn has_selection(&self) -> bool {
        self.selection.has_content()
    }

    pub fn cancel_selection(&mut self) {
        self.selection.cancel();
    }

    /// Clamp cursor, selection and scroll window into the buffer
    pub fn sanitize(&mut self) {
        self.buffer.sanitize();
        self.cursor.sanitize(&self.buffer);
        if self.selection.active {
            self.selection.sanitize(&self.buffer);
        }
        self.reconcile_scroll();
    }

    /// Describe the first broken structural invariant, if any
    pub fn check_invariants(&self) -> Result<(), String> {
        if self.buffer.is_empty() {
            return Err("buffer has no rows".to_string());
        }
        if !self.cursor.is_valid(&self.buffer) {
            return Err(format!(
                "cursor ({}, {}) outside buffer of {} rows",
                self.cursor.row,
                self.cursor.column,
                self.buffer.len()
            ));
        }
        let first = self.scroll.first_visible_row;
        let shown = self.scroll.displayed_row_count;
        if self.cursor.row < first || self.cursor.row >= first + shown {
            return Err(format!(
                "cursor row {} outside window {}..{}",
                self.cursor.row,
                first,
                first + shown
            ));
        }
        if first > self.buffer.len().saturating_sub(shown) {
            return Err(format!("window starts past the end at {}", first));
        }
        Ok(())
    }

    fn reconcile_scroll(&mut self) {
        self.scroll.reconcile(self.cursor.row, self.buffer.len());
    }

    pub fn set_displayed_row_count(&mut self, count: usize) {
        self.scroll
            .set_displayed_row_count(count, self.cursor.row, self.buffer.len());
    }
}

// =============================================================================
// Cursor Movement
// =============================================================================

impl EditableState {
    /// Move the cursor, extending the selection when `extend_selection` is set.
    /// Returns false when the movement is not available in this context.
    pub fn move_cursor(&mut self, target: MoveTarget, extend_selection: bool) -> bool {
        if target.is_vertical() && !self.constraints.allow_multiline {
            return false;
        }

        self.selection.try_start(&self.cursor, extend_selection);

        let rows = &self.buffer;
        match target {
            MoveTarget::Left => self.cursor.move_horizontal(rows, -1),
            MoveTarget::Right => self.cursor.move_horizontal(rows, 1),
            MoveTarget::Up => self.cursor.move_vertical(rows, -1),
            MoveTarget::Down => self.cursor.move_vertical(rows, 1),
            MoveTarget::LineStart => self.cursor.to_line_start(),
            MoveTarget::LineEnd => self.cursor.to_row_end(rows),
            MoveTarget::DocumentStart => self.cursor.to_document_start(),
            MoveTarget::DocumentEnd => self.cursor.to_document_end(rows),
            MoveTarget::PageUp => {
                let delta = -(self.cursor.row as isize);
                self.cursor.move_vertical(rows, delta);
            }
            MoveTarget::PageDown => {
                let delta = rows.last_row().saturating_sub(self.cursor.row) as isize;
                self.cursor.move_vertical(rows, delta);
            }
        }

        self.reconcile_scroll();
        self.selection.follow(&self.cursor, extend_selection);

        tracing::trace!(
            target: "cursor",
            "{:?} -> ({}, {}) last_column={}",
            target,
            self.cursor.row,
            self.cursor.column,
            self.cursor.last_column
        );
        if self.selection.active {
            tracing::trace!(
                target: "selection",
                "anchor={:?} follower={:?}",
                self.selection.anchor,
                self.selection.follower
            );
        }
        true
    }

    pub fn move_left(&mut self, extend_selection: bool) {
        self.move_cursor(MoveTarget::Left, extend_selection);
    }

    pub fn move_right(&mut self, extend_selection: bool) {
        self.move_cursor(MoveTarget::Right, extend_selection);
    }

    pub fn move_up(&mut self, extend_selection: bool) {
        self.move_cursor(MoveTarget::Up, extend_selection);
    }

    pub fn move_down(&mut self, extend_selection: bool) {
        self.move_cursor(MoveTarget::Down, extend_selection);
    }

    pub fn move_line_start(&mut self, extend_selection: bool) {
        self.move_cursor(MoveTarget::LineStart, extend_selection);
    }

    pub fn move_line_end(&mut self, extend_selection: bool) {
        self.move_cursor(MoveTarget::LineEnd, extend_selection);
    }

    pub fn move_document_start(&mut self, extend_selection: bool) {
        self.move_cursor(MoveTarget::DocumentStart, extend_selection);
    }

    pub fn move_document_end(&mut self, extend_selection: bool) {
        self.move_cursor(MoveTarget::DocumentEnd, extend_selection);
    }

    /// Put the cursor at `(row, column)`, clamped, e.g. from a mouse click
    pub fn place_cursor(&mut self, row: usize, column: usize, extend_selection: bool) {
        let row = row.min(self.buffer.last_row());
        let column = column.min(self.buffer.row_len(row));

        self.selection.try_start(&self.cursor, extend_selection);
        self.cursor.set_position(Position::new(row, column));
        self.reconcile_scroll();
        self.selection.follow(&self.cursor, extend_selection);
    }

    /// Select everything, leaving the cursor at the document end
    pub fn select_all(&mut self) {
        self.selection.select_all(&self.buffer);
        self.cursor.to_document_end(&self.buffer);
        self.reconcile_scroll();
    }
}

// =============================================================================
// Editing Operations
// =============================================================================

impl EditableState {
    /// Replace the whole text, moving the cursor to the end.
    /// Returns false if the constraints reject `text`.
    pub fn set_text(&mut self, text: &str) -> bool {
        let text = normalize_newlines(text);
        if !self.constraints.accepts(&text) {
            tracing::debug!("Rejected set_text: {:?}", text);
            return false;
        }
        self.buffer.set_text(&text);
        self.cursor.to_document_end(&self.buffer);
        self.finish_edit();
        true
    }

    pub fn set_lines<S: AsRef<str>>(&mut self, lines: &[S]) -> bool {
        let text = lines
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join("\n");
        self.set_text(&text)
    }

    /// Empty the text; rejected like any other edit if the predicate refuses ""
    pub fn clear(&mut self) -> bool {
        self.set_text("")
    }

    /// Re-wrap for a new width, keeping the caret and selection on the same
    /// characters.
    pub fn set_width(&mut self, width: Option<u32>) {
        let caret = self.cursor.offset(&self.buffer);
        let anchor = self
            .buffer
            .position_of(self.selection.anchor.row, self.selection.anchor.column);
        let follower = self
            .buffer
            .position_of(self.selection.follower.row, self.selection.follower.column);

        if !self.buffer.set_width(width) {
            return;
        }

        self.cursor
            .set_position(self.buffer.offset_to_position(caret));
        if self.selection.active {
            self.selection.anchor = self.buffer.offset_to_position(anchor);
            self.selection.follower = self.buffer.offset_to_position(follower);
        }
        self.sanitize();
        tracing::debug!("Re-wrapped to {:?}: {} rows", width, self.buffer.len());
    }

    /// Insert a character at the cursor, replacing any selection.
    /// Returns true if the character was inserted, false if rejected by constraints
    pub fn insert_char(&mut self, ch: char) -> bool {
        if ch == '\n' {
            return self.insert_newline();
        }
        let mut utf8 = [0u8; 4];
        self.replace_range(ch.encode_utf8(&mut utf8))
    }

    /// Insert text at the cursor (paste), replacing any selection.
    /// The cursor advances past every inserted character.
    pub fn insert_text(&mut self, text: &str) -> bool {
        let text = normalize_newlines(text);
        if text.is_empty() && !self.selection.has_content() {
            return false;
        }
        self.replace_range(&text)
    }

    /// Start a new paragraph at the cursor
    pub fn insert_newline(&mut self) -> bool {
        if !self.constraints.allow_multiline {
            return false;
        }

        let last = self.buffer.last_row();
        if !self.selection.has_content()
            && self.cursor.row == last
            && self.cursor.column == self.buffer.row_len(last)
        {
            return self.append_paragraph();
        }

        self.replace_range("\n")
    }

    /// Newline at the very end: terminate the last row and open an empty
    /// row below it rather than re-wrapping.
    fn append_paragraph(&mut self) -> bool {
        let last = self.buffer.last_row();
        if !self.buffer.has_sentinel(last) {
            let mut text = self.buffer.text();
            text.push('\n');
            if !self.constraints.accepts(&text) {
                tracing::debug!("Rejected newline at end of text");
                return false;
            }
            self.buffer.replace_row_with(last, |row| format!("{}\n", row));
        }
        self.buffer.insert_row(last + 1, String::new());
        self.cursor.set_position(Position::new(last + 1, 0));
        self.finish_edit();
        true
    }

    /// Delete character before cursor (Backspace)
    pub fn delete_backward(&mut self) -> bool {
        if self.erase_selection() {
            return true;
        }

        let row = self.cursor.row;
        if self.buffer.row_len(row) == 0 && self.buffer.len() > 1 {
            if !self.remove_row_checked(row) {
                return false;
            }
            let landing = match row.checked_sub(1) {
                Some(prev) => Position::new(prev, self.buffer.row_len(prev)),
                None => Position::zero(),
            };
            self.cursor.set_position(landing);
            self.finish_edit();
            return true;
        }

        let offset = self.cursor.offset(&self.buffer);
        if offset == 0 {
            return false;
        }
        let text = self.buffer.spliced(offset - 1..offset, "");
        self.commit(text, offset - 1)
    }

    /// Delete character after cursor (Delete)
    pub fn delete_forward(&mut self) -> bool {
        if self.erase_selection() {
            return true;
        }

        let row = self.cursor.row;
        if self.buffer.row_len(row) == 0 && row < self.buffer.last_row() {
            if !self.remove_row_checked(row) {
                return false;
            }
            self.cursor.set_position(Position::new(row, 0));
            self.finish_edit();
            return true;
        }

        let offset = self.cursor.offset(&self.buffer);
        if offset >= self.buffer.char_len() {
            return false;
        }
        let text = self.buffer.spliced(offset..offset + 1, "");
        self.commit(text, offset)
    }

    /// Remove the row under the cursor entirely
    pub fn delete_row(&mut self) -> bool {
        if !self.constraints.allow_multiline {
            return false;
        }
        let row = self.cursor.row;
        if !self.remove_row_checked(row) {
            return false;
        }
        tracing::debug!("Deleted row {}", row);
        self.cursor.sanitize(&self.buffer);
        self.cursor.last_column = self.cursor.column;
        self.finish_edit();
        true
    }

    /// Delete the selected span and put the cursor at its start.
    ///
    /// Returns false when there is nothing to erase. A span whose removal the
    /// constraints reject still counts as consumed, leaving the text as is.
    pub fn erase_selection(&mut self) -> bool {
        if !self.selection.active {
            return false;
        }
        if self.selection.is_empty() {
            self.selection.cancel();
            return false;
        }

        if self.selection.covers_all(&self.buffer) {
            if !self.constraints.accepts("") {
                tracing::debug!("Rejected erasing the whole text");
                return true;
            }
            self.buffer.set_text("");
            self.cursor = Cursor::default();
            self.finish_edit();
            return true;
        }

        let range = self.selection.offsets(&self.buffer);
        let text = self.buffer.spliced(range.clone(), "");
        if !self.constraints.accepts(&text) {
            tracing::debug!("Rejected erasing selection {:?}", range);
            return true;
        }
        self.buffer.reflow(&text);
        self.cursor
            .set_position(self.buffer.offset_to_position(range.start));
        self.finish_edit();
        true
    }

    /// Remove the selection, returning what was removed
    pub fn cut(&mut self) -> Option<String> {
        let text = self.selected_text();
        if text.is_empty() {
            return None;
        }
        let before = self.revision;
        self.erase_selection();
        (self.revision != before).then_some(text)
    }

    /// Span an insertion replaces: the selection if any, else the caret
    fn edit_range(&self) -> Range<usize> {
        if self.selection.has_content() {
            self.selection.offsets(&self.buffer)
        } else {
            let caret = self.cursor.offset(&self.buffer);
            caret..caret
        }
    }

    fn replace_range(&mut self, insert: &str) -> bool {
        let range = self.edit_range();
        let caret = range.start + insert.chars().count();
        let text = self.buffer.spliced(range, insert);
        self.commit(text, caret)
    }

    /// Apply a new logical text and put the caret at scalar offset `caret`,
    /// or leave everything untouched if the constraints reject it.
    fn commit(&mut self, text: String, caret: usize) -> bool {
        if !self.constraints.accepts(&text) {
            tracing::debug!("Rejected edit producing {:?}", text);
            return false;
        }

        self.buffer.reflow(&text);
        if self.constraints.allow_multiline && caret >= self.buffer.char_len() {
            self.buffer.open_trailing_slot();
        }
        self.cursor
            .set_position(self.buffer.offset_to_position(caret));
        self.finish_edit();
        true
    }

    fn remove_row_checked(&mut self, row: usize) -> bool {
        let start = self.buffer.position_of(row, 0);
        let end = start + self.buffer.raw_len(row);
        let text = self.buffer.spliced(start..end, "");
        if !self.constraints.accepts(&text) {
            tracing::debug!("Rejected removing row {}", row);
            return false;
        }
        self.buffer.remove_row(row);
        self.buffer.sanitize();
        true
    }

    fn finish_edit(&mut self) {
        self.selection.cancel();
        self.sanitize();
        self.revision = self.revision.wrapping_add(1);
    }
}

// =============================================================================
// Rendering Queries
// =============================================================================

impl EditableState {
    /// Rows inside the scroll window with their selection highlight
    pub fn display_rows(&self) -> Vec<DisplayRow> {
        self.scroll
            .visible_range(self.buffer.len())
            .map(|index| {
                let selection = self
                    .selection
                    .row_span(index, self.buffer.row_len(index));
                DisplayRow {
                    index,
                    content: self.buffer.visible(index).to_string(),
                    selected: selection.is_some(),
                    selection,
                }
            })
            .collect()
    }

    /// Caret position relative to the first visible row
    pub fn cursor_screen_position(&self) -> Position {
        Position::new(
            self.cursor.row.saturating_sub(self.scroll.first_visible_row),
            self.cursor.column,
        )
    }
}

fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}
