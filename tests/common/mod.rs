//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::sync::Arc;

use quill::editable::{
    EditConstraints, EditableState, MemoryClipboard, Monospace, Position, RowBuffer, TextEditMsg,
};
use quill::update::update_text_edit;
use quill::widget::{TextArea, TextField};

/// Multi-line state wrapped at `width` columns, with `text` loaded and the
/// cursor moved to `(row, column)`
pub fn test_state(text: &str, width: u32, row: usize, column: usize) -> EditableState {
    let mut state = EditableState::multi_line(Some(width), Arc::new(Monospace::columns()));
    state.set_displayed_row_count(25);
    assert!(state.set_text(text));
    state.place_cursor(row, column, false);
    state
}

/// Multi-line state over literal rows, no re-wrapping applied
pub fn state_from_rows(rows: &[&str], width: u32) -> EditableState {
    let buffer = RowBuffer::from_rows(
        rows.iter().copied(),
        Some(width),
        Arc::new(Monospace::columns()),
    );
    let mut state = EditableState::new(buffer, EditConstraints::multi_line());
    state.set_displayed_row_count(25);
    state
}

/// Same as `test_state` but with a selection from anchor to head; the
/// cursor ends at the head
pub fn test_state_with_selection(
    text: &str,
    width: u32,
    anchor: (usize, usize),
    head: (usize, usize),
) -> EditableState {
    let mut state = test_state(text, width, anchor.0, anchor.1);
    state.place_cursor(head.0, head.1, true);
    state
}

/// Focused text area measured in columns, one unit per row
pub fn test_area(width: u32, displayed_rows: usize) -> TextArea {
    let mut area = TextArea::new(Some(width), displayed_rows, Arc::new(Monospace::columns()))
        .with_line_height(1.0);
    area.focused = true;
    area
}

/// Focused single-line field `inner_width` columns wide
pub fn test_field(inner_width: f32) -> TextField {
    let mut field = TextField::builder("test", inner_width).build();
    field.focused = true;
    field
}

/// Dispatch a message with a throwaway clipboard
pub fn send(state: &mut EditableState, msg: TextEditMsg) -> bool {
    let mut clipboard = MemoryClipboard::new();
    update_text_edit(state, &msg, &mut clipboard, true)
}

pub fn cursor(state: &EditableState) -> (usize, usize) {
    let Position { row, column } = state.cursor_position();
    (row, column)
}

pub fn rows(state: &EditableState) -> Vec<String> {
    state.buffer.rows().to_vec()
}

/// Panic with context if any structural invariant is broken
pub fn assert_invariants(state: &EditableState, context: &str) {
    if let Err(e) = state.check_invariants() {
        panic!("{}: {} (rows {:?})", context, e, state.buffer.rows());
    }
}
