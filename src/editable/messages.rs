//! Message types for the text editing core.
//!
//! These are the abstract inbound commands a host translates its key and
//! mouse events into.

use serde::{Deserialize, Serialize};

/// Target for cursor movement operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveTarget {
    /// Move one character left
    Left,
    /// Move one character right
    Right,
    /// Move one row up
    Up,
    /// Move one row down
    Down,
    /// Move to start of row
    LineStart,
    /// Move to end of row
    LineEnd,
    /// Move to start of document
    DocumentStart,
    /// Move to end of document
    DocumentEnd,
    /// Move to the first row
    PageUp,
    /// Move to the last row
    PageDown,
}

impl MoveTarget {
    pub fn is_vertical(self) -> bool {
        matches!(
            self,
            MoveTarget::Up | MoveTarget::Down | MoveTarget::PageUp | MoveTarget::PageDown
        )
    }
}

/// Message type for all text editing operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextEditMsg {
    // === Movement ===
    /// Move cursor without affecting selection
    Move(MoveTarget),
    /// Move cursor and extend selection
    MoveWithSelection(MoveTarget),

    // === Insertion ===
    /// Insert a single character
    InsertChar(char),
    /// Insert a string at the cursor
    InsertText(String),
    /// Insert a newline (ignored in single-line context)
    InsertNewline,

    // === Deletion ===
    /// Delete character before cursor (Backspace)
    DeleteBackward,
    /// Delete character after cursor (Delete)
    DeleteForward,
    /// Delete the row under the cursor
    DeleteRow,

    // === Selection ===
    /// Select all text
    SelectAll,

    // === Clipboard ===
    /// Copy selection to clipboard
    Copy,
    /// Cut selection to clipboard
    Cut,
    /// Paste text read from the clipboard by the host
    Paste(String),
}

impl TextEditMsg {
    /// Movement message, extending the selection when `shift` is held
    pub fn movement(target: MoveTarget, shift: bool) -> Self {
        if shift {
            TextEditMsg::MoveWithSelection(target)
        } else {
            TextEditMsg::Move(target)
        }
    }

    /// Check if this message modifies the buffer
    pub fn is_editing(&self) -> bool {
        matches!(
            self,
            TextEditMsg::InsertChar(_)
                | TextEditMsg::InsertText(_)
                | TextEditMsg::InsertNewline
                | TextEditMsg::DeleteBackward
                | TextEditMsg::DeleteForward
                | TextEditMsg::DeleteRow
                | TextEditMsg::Cut
                | TextEditMsg::Paste(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_editing() {
        assert!(TextEditMsg::InsertChar('a').is_editing());
        assert!(TextEditMsg::DeleteBackward.is_editing());
        assert!(TextEditMsg::Cut.is_editing());
        assert!(!TextEditMsg::Copy.is_editing());
        assert!(!TextEditMsg::Move(MoveTarget::Left).is_editing());
        assert!(!TextEditMsg::SelectAll.is_editing());
    }

    #[test]
    fn test_movement_constructor() {
        assert_eq!(
            TextEditMsg::movement(MoveTarget::Up, true),
            TextEditMsg::MoveWithSelection(MoveTarget::Up)
        );
        assert_eq!(
            TextEditMsg::movement(MoveTarget::Up, false),
            TextEditMsg::Move(MoveTarget::Up)
        );
    }

    #[test]
    fn test_yaml_form() {
        let msg: TextEditMsg = serde_yaml::from_str("move_with_selection: line_end").unwrap();
        assert_eq!(msg, TextEditMsg::MoveWithSelection(MoveTarget::LineEnd));

        let msg: TextEditMsg = serde_yaml::from_str("delete_backward").unwrap();
        assert_eq!(msg, TextEditMsg::DeleteBackward);
    }
}
