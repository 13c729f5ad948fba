//! Text edit update handler.
//!
//! Applies a [`TextEditMsg`] to an [`EditableState`], calling out to the
//! host clipboard for copy and cut.

use crate::editable::{Clipboard, EditableState, TextEditMsg};

/// Apply a message to an EditableState.
///
/// Returns true if the message changed the state. When `editable` is false
/// only movement, selection and copy are honoured.
pub fn apply_text_edit_msg(
    state: &mut EditableState,
    msg: &TextEditMsg,
    clipboard: &mut dyn Clipboard,
    editable: bool,
) -> bool {
    if msg.is_editing() && !editable {
        tracing::debug!("Ignoring {:?} on read-only text", msg);
        return false;
    }

    match msg {
        // === Movement ===
        TextEditMsg::Move(target) => state.move_cursor(*target, false),
        TextEditMsg::MoveWithSelection(target) => state.move_cursor(*target, true),

        // === Insertion ===
        TextEditMsg::InsertChar(ch) => state.insert_char(*ch),
        TextEditMsg::InsertText(text) => state.insert_text(text),
        TextEditMsg::InsertNewline => state.insert_newline(),

        // === Deletion ===
        TextEditMsg::DeleteBackward => state.delete_backward(),
        TextEditMsg::DeleteForward => state.delete_forward(),
        TextEditMsg::DeleteRow => state.delete_row(),

        // === Selection ===
        TextEditMsg::SelectAll => {
            state.select_all();
            true
        }

        // === Clipboard ===
        TextEditMsg::Copy => {
            if !state.has_selection() {
                return false;
            }
            clipboard.set_text(&state.selected_text());
            false
        }
        TextEditMsg::Cut => match state.cut() {
            Some(text) => {
                clipboard.set_text(&text);
                true
            }
            None => false,
        },
        TextEditMsg::Paste(text) => state.insert_text(text),
    }
}
