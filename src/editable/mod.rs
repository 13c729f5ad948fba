//! Text editing core shared by the multi-line text area and the single-line
//! text field.
//!
//! # Architecture
//!
//! The core components are:
//!
//! - [`RowBuffer`]: the text as display rows, word-wrapped against a [`TextMeasure`]
//! - [`Cursor`] / [`Selection`]: caret with column memory, anchor/follower selection
//! - [`ScrollWindow`]: which rows are on screen
//! - [`EditableState`]: main state container composing the above
//! - [`EditConstraints`]: single-line vs multi-line, validation predicates
//! - [`TextEditMsg`]: abstract commands a host maps its input onto
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use quill::editable::{EditableState, Monospace, Position};
//!
//! let mut state = EditableState::multi_line(Some(5), Arc::new(Monospace::columns()));
//! state.set_text("hello world");
//! assert_eq!(state.buffer.rows(), &["hello", " worl", "d"]);
//!
//! state.move_up(false);
//! state.insert_char('!');
//! assert_eq!(state.text(), "hello !world");
//! assert_eq!(state.cursor_position(), Position::new(1, 2));
//! ```

mod clipboard;
mod constraints;
mod cursor;
mod measure;
mod messages;
mod render;
mod rows;
mod selection;
mod state;
mod viewport;

// Re-export main types
pub use clipboard::{Clipboard, MemoryClipboard, SystemClipboard};
pub use constraints::{
    is_double_input, is_float_input, is_integer_input, EditConstraints, TextPredicate, Validator,
};
pub use cursor::{Cursor, Position};
pub use measure::{FontMeasure, Monospace, TextMeasure};
pub use messages::{MoveTarget, TextEditMsg};
pub use render::{
    flag_invalid, plain, DisplayRow, RenderInput, RenderTransform, StyledSegment, Tone, Transform,
};
pub use rows::{wrap, RowBuffer, SENTINEL};
pub use selection::Selection;
pub use state::EditableState;
pub use viewport::ScrollWindow;
