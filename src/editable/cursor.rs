//! Cursor and position types for row-based text editing.

use super::rows::RowBuffer;

/// A position in the row buffer (row and column, both 0-indexed).
///
/// Ordering is lexicographic: row first, then column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub row: usize,
    pub column: usize,
}

impl Position {
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }

    pub const fn zero() -> Self {
        Self { row: 0, column: 0 }
    }
}

/// The caret, with a remembered column for vertical movement.
///
/// Equality only compares `(row, column)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Cursor {
    pub row: usize,
    pub column: usize,
    /// Horizontal target kept across up/down moves so that travelling
    /// through a short row and back does not lose the original column.
    pub last_column: usize,
}

impl PartialEq for Cursor {
    fn eq(&self, other: &Self) -> bool {
        self.row == other.row && self.column == other.column
    }
}

impl Eq for Cursor {}

impl Cursor {
    pub const fn new(row: usize, column: usize) -> Self {
        Self {
            row,
            column,
            last_column: column,
        }
    }

    pub fn at_position(pos: Position) -> Self {
        Self::new(pos.row, pos.column)
    }

    pub const fn position(&self) -> Position {
        Position::new(self.row, self.column)
    }

    /// Jump to `pos`, remembering its column
    pub fn set_position(&mut self, pos: Position) {
        self.row = pos.row;
        self.column = pos.column;
        self.last_column = pos.column;
    }

    /// Scalar offset into the logical text
    pub fn offset(&self, rows: &RowBuffer) -> usize {
        rows.position_of(self.row, self.column)
    }

    /// Move by `delta` characters, crossing row boundaries.
    ///
    /// Moving past the end of a row lands on column 0 of the next one, moving
    /// before column 0 lands at the end of the previous one. Both ends of the
    /// document clamp.
    pub fn move_horizontal(&mut self, rows: &RowBuffer, delta: isize) {
        for _ in 0..delta.unsigned_abs() {
            if delta > 0 {
                self.step_right(rows);
            } else {
                self.step_left(rows);
            }
        }
        self.last_column = self.column;
    }

    fn step_right(&mut self, rows: &RowBuffer) {
        if self.column < rows.row_len(self.row) {
            self.column += 1;
        } else if self.row < rows.last_row() {
            self.row += 1;
            self.column = 0;
        }
    }

    fn step_left(&mut self, rows: &RowBuffer) {
        if self.column > 0 {
            self.column -= 1;
        } else if self.row > 0 {
            self.row -= 1;
            self.column = rows.row_len(self.row);
        }
    }

    /// Move by `delta` rows, restoring the remembered column where the row
    /// is long enough. Leaves `last_column` untouched.
    pub fn move_vertical(&mut self, rows: &RowBuffer, delta: isize) {
        let target = self.row as isize + delta;
        self.row = target.clamp(0, rows.last_row() as isize) as usize;
        self.column = self.last_column.min(rows.row_len(self.row));
    }

    pub fn to_line_start(&mut self) {
        self.column = 0;
        self.last_column = 0;
    }

    /// End of the current row, not counting its sentinel
    pub fn to_row_end(&mut self, rows: &RowBuffer) {
        self.column = rows.row_len(self.row);
        self.last_column = self.column;
    }

    pub fn to_document_start(&mut self) {
        self.row = 0;
        self.to_line_start();
    }

    pub fn to_document_end(&mut self, rows: &RowBuffer) {
        self.row = rows.last_row();
        self.to_row_end(rows);
    }

    /// Clamp into the buffer after a structural change
    pub fn sanitize(&mut self, rows: &RowBuffer) {
        self.row = self.row.min(rows.last_row());
        self.column = self.column.min(rows.row_len(self.row));
    }

    pub fn is_valid(&self, rows: &RowBuffer) -> bool {
        self.row < rows.len() && self.column <= rows.row_len(self.row)
    }
}

impl From<Position> for Cursor {
    fn from(pos: Position) -> Self {
        Self::at_position(pos)
    }
}

impl From<Cursor> for Position {
    fn from(cursor: Cursor) -> Self {
        cursor.position()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editable::measure::Monospace;
    use std::sync::Arc;

    fn rows(rows: &[&str]) -> RowBuffer {
        RowBuffer::from_rows(rows.iter().copied(), Some(10), Arc::new(Monospace::columns()))
    }

    #[test]
    fn test_position_ordering() {
        let a = Position::new(0, 5);
        let b = Position::new(1, 0);
        let c = Position::new(1, 3);

        assert!(a < b);
        assert!(b < c);
        assert!(a < c);
    }

    #[test]
    fn test_equality_ignores_last_column() {
        let mut a = Cursor::new(1, 2);
        let b = Cursor::new(1, 2);
        a.last_column = 9;
        assert_eq!(a, b);
    }

    #[test]
    fn test_right_crosses_wrap_boundary() {
        let buf = rows(&["ab", "cd\n"]);
        let mut cursor = Cursor::new(0, 2);
        cursor.move_horizontal(&buf, 1);
        assert_eq!(cursor.position(), Position::new(1, 0));
        assert_eq!(cursor.last_column, 0);
    }

    #[test]
    fn test_right_clamps_on_last_row() {
        let buf = rows(&["ab", "cd\n"]);
        let mut cursor = Cursor::new(1, 2);
        cursor.move_horizontal(&buf, 1);
        assert_eq!(cursor.position(), Position::new(1, 2));
    }

    #[test]
    fn test_left_goes_to_previous_row_end() {
        let buf = rows(&["abc\n", "d"]);
        let mut cursor = Cursor::new(1, 0);
        cursor.move_horizontal(&buf, -1);
        assert_eq!(cursor.position(), Position::new(0, 3));

        let mut start = Cursor::new(0, 0);
        start.move_horizontal(&buf, -1);
        assert_eq!(start.position(), Position::zero());
    }

    #[test]
    fn test_multi_step_horizontal() {
        let buf = rows(&["ab\n", "cd"]);
        let mut cursor = Cursor::new(0, 1);
        cursor.move_horizontal(&buf, 3);
        assert_eq!(cursor.position(), Position::new(1, 1));
        cursor.move_horizontal(&buf, -10);
        assert_eq!(cursor.position(), Position::zero());
    }

    #[test]
    fn test_vertical_keeps_last_column() {
        let buf = rows(&["long line\n", "ab\n", "long line"]);
        let mut cursor = Cursor::new(0, 7);
        cursor.move_vertical(&buf, 1);
        assert_eq!(cursor.position(), Position::new(1, 2));
        assert_eq!(cursor.last_column, 7);
        cursor.move_vertical(&buf, 1);
        assert_eq!(cursor.position(), Position::new(2, 7));
    }

    #[test]
    fn test_vertical_clamps_row() {
        let buf = rows(&["a\n", "b"]);
        let mut cursor = Cursor::new(0, 1);
        cursor.move_vertical(&buf, -3);
        assert_eq!(cursor.row, 0);
        cursor.move_vertical(&buf, 8);
        assert_eq!(cursor.row, 1);
    }

    #[test]
    fn test_row_end_excludes_sentinel() {
        let buf = rows(&["abc\n", "de"]);
        let mut cursor = Cursor::new(0, 0);
        cursor.to_row_end(&buf);
        assert_eq!(cursor.column, 3);

        cursor.to_document_end(&buf);
        assert_eq!(cursor.position(), Position::new(1, 2));
        cursor.to_document_start();
        assert_eq!(cursor.position(), Position::zero());
    }

    #[test]
    fn test_offset_and_sanitize() {
        let buf = rows(&["line one\n", "line two\n"]);
        let cursor = Cursor::new(1, 4);
        assert_eq!(cursor.offset(&buf), 13);

        let mut stray = Cursor::new(5, 40);
        assert!(!stray.is_valid(&buf));
        stray.sanitize(&buf);
        assert_eq!(stray.position(), Position::new(1, 8));
    }
}
