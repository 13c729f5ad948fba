//! Multi-line text area.

use std::fmt;
use std::sync::Arc;

use crate::config::WidgetConfig;
use crate::editable::{
    Clipboard, DisplayRow, EditableState, MoveTarget, Position, TextEditMsg, TextMeasure,
};
use crate::update::update_text_edit;

use super::{is_printable, ChangeListener};

/// Wrapped, scrollable, multi-row text input.
pub struct TextArea {
    state: EditableState,
    pub focused: bool,
    /// Disabled widgets ignore all input
    pub active: bool,
    /// Read-only widgets still move, select and copy
    pub editable: bool,
    line_height: f32,
    on_change: Option<ChangeListener>,
}

impl fmt::Debug for TextArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextArea")
            .field("state", &self.state)
            .field("focused", &self.focused)
            .field("active", &self.active)
            .field("editable", &self.editable)
            .field("line_height", &self.line_height)
            .finish_non_exhaustive()
    }
}

impl TextArea {
    pub fn new(width: Option<u32>, displayed_rows: usize, measure: Arc<dyn TextMeasure>) -> Self {
        let mut state = EditableState::multi_line(width, measure);
        state.set_displayed_row_count(displayed_rows);
        Self {
            state,
            focused: false,
            active: true,
            editable: true,
            line_height: 9.0,
            on_change: None,
        }
    }

    pub fn from_config(config: &WidgetConfig) -> Self {
        Self::new(config.wrap_width, config.displayed_rows, config.measure())
            .with_line_height(config.line_height)
    }

    pub fn with_line_height(mut self, line_height: f32) -> Self {
        self.line_height = line_height.max(1.0);
        self
    }

    pub fn set_on_change(&mut self, listener: impl FnMut(&str) + Send + 'static) {
        self.on_change = Some(Box::new(listener));
    }

    pub fn state(&self) -> &EditableState {
        &self.state
    }

    pub fn text(&self) -> String {
        self.state.text()
    }

    pub fn lines(&self) -> Vec<String> {
        self.state.lines()
    }

    pub fn set_text(&mut self, text: &str) -> bool {
        self.edit(|state| state.set_text(text))
    }

    pub fn set_lines<S: AsRef<str>>(&mut self, lines: &[S]) -> bool {
        self.edit(|state| state.set_lines(lines))
    }

    fn accepts_input(&self) -> bool {
        self.focused && self.active
    }

    /// A character typed on the keyboard
    pub fn char_typed(&mut self, ch: char) -> bool {
        if !self.accepts_input() || !self.editable || !is_printable(ch) {
            return false;
        }
        self.edit(|state| state.insert_char(ch))
    }

    /// A command from the host's key handling
    pub fn handle(&mut self, msg: &TextEditMsg, clipboard: &mut dyn Clipboard) -> bool {
        if !self.accepts_input() {
            return false;
        }
        let editable = self.editable;
        self.edit(|state| update_text_edit(state, msg, clipboard, editable))
    }

    /// Paste whatever the clipboard holds
    pub fn paste_from(&mut self, clipboard: &mut dyn Clipboard) -> bool {
        match clipboard.get_text() {
            Some(text) => self.handle(&TextEditMsg::Paste(text), clipboard),
            None => false,
        }
    }

    /// Place the cursor at a point relative to the text origin
    pub fn mouse_click(&mut self, x: f32, y: f32, extend_selection: bool) -> bool {
        if !self.active {
            return false;
        }
        self.focused = true;

        let state = &mut self.state;
        if y < 0.0 {
            state.move_cursor(MoveTarget::DocumentStart, extend_selection);
            return true;
        }

        let row = state.first_visible_row() + (y / self.line_height) as usize;
        if row >= state.buffer.len() {
            state.move_cursor(MoveTarget::DocumentEnd, extend_selection);
            return true;
        }

        let column = state
            .buffer
            .measure()
            .fit(state.buffer.visible(row), x.max(0.0));
        state.place_cursor(row, column, extend_selection);
        tracing::trace!(target: "cursor", "click ({}, {}) -> ({}, {})", x, y, row, column);
        true
    }

    /// Wheel movement; positive `amount` scrolls up
    pub fn mouse_scroll(&mut self, amount: f32) -> bool {
        if !self.accepts_input() {
            return false;
        }
        let target = if amount > 0.0 {
            MoveTarget::Up
        } else {
            MoveTarget::Down
        };
        self.state.move_cursor(target, false)
    }

    /// The host layout gave the text a new width
    pub fn width_changed(&mut self, width: Option<u32>) {
        self.state.set_width(width);
    }

    pub fn set_displayed_rows(&mut self, count: usize) {
        self.state.set_displayed_row_count(count);
    }

    pub fn display_rows(&self) -> Vec<DisplayRow> {
        self.state.display_rows()
    }

    pub fn cursor_screen_position(&self) -> Position {
        self.state.cursor_screen_position()
    }

    /// Run an operation and notify the listener if the text changed
    fn edit(&mut self, op: impl FnOnce(&mut EditableState) -> bool) -> bool {
        let before = self.state.revision();
        let result = op(&mut self.state);
        if self.state.revision() != before {
            if let Some(listener) = self.on_change.as_mut() {
                listener(&self.state.text());
            }
        }
        result
    }
}
