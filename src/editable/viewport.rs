//! Vertical scroll window for multi-row editing.

use std::ops::Range;

/// Which rows are on screen, given a fixed number of displayable rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollWindow {
    pub first_visible_row: usize,
    pub displayed_row_count: usize,
}

impl Default for ScrollWindow {
    fn default() -> Self {
        Self::new(1)
    }
}

impl ScrollWindow {
    pub fn new(displayed_row_count: usize) -> Self {
        Self {
            first_visible_row: 0,
            displayed_row_count: displayed_row_count.max(1),
        }
    }

    /// Adjust the window so `cursor_row` is visible and the window does not
    /// run past the end of a `row_count`-row buffer.
    pub fn reconcile(&mut self, cursor_row: usize, row_count: usize) {
        if cursor_row < self.first_visible_row {
            self.first_visible_row = cursor_row;
        }

        let last_window = row_count.saturating_sub(self.displayed_row_count);
        if self.first_visible_row > last_window {
            self.first_visible_row = last_window;
        }

        if cursor_row >= self.first_visible_row + self.displayed_row_count {
            self.first_visible_row = cursor_row + 1 - self.displayed_row_count;
        }
    }

    pub fn set_displayed_row_count(&mut self, count: usize, cursor_row: usize, row_count: usize) {
        self.displayed_row_count = count.max(1);
        self.reconcile(cursor_row, row_count);
    }

    /// Rows currently on screen, clipped to the buffer
    pub fn visible_range(&self, row_count: usize) -> Range<usize> {
        let start = self.first_visible_row.min(row_count);
        let end = (self.first_visible_row + self.displayed_row_count).min(row_count);
        start..end
    }

    pub fn is_visible(&self, row: usize) -> bool {
        row >= self.first_visible_row && row < self.first_visible_row + self.displayed_row_count
    }
}
