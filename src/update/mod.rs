//! Update functions: every change to an editable state flows through here.

mod text_edit;

use crate::editable::{Clipboard, EditableState, TextEditMsg};

#[cfg(debug_assertions)]
use crate::tracing::CursorSnapshot;
#[cfg(debug_assertions)]
use tracing::{debug, span, warn, Level};

pub use text_edit::apply_text_edit_msg;

/// Main update function
///
/// In debug builds, this wraps with tracing instrumentation.
/// In release builds, it's a direct dispatch with zero overhead.
#[inline]
pub fn update_text_edit(
    state: &mut EditableState,
    msg: &TextEditMsg,
    clipboard: &mut dyn Clipboard,
    editable: bool,
) -> bool {
    #[cfg(debug_assertions)]
    {
        update_traced(state, msg, clipboard, editable)
    }
    #[cfg(not(debug_assertions))]
    {
        apply_text_edit_msg(state, msg, clipboard, editable)
    }
}

#[cfg(debug_assertions)]
fn update_traced(
    state: &mut EditableState,
    msg: &TextEditMsg,
    clipboard: &mut dyn Clipboard,
    editable: bool,
) -> bool {
    let msg_name = format!("{:?}", msg);
    let _span = span!(Level::DEBUG, "update", msg = %msg_name).entered();

    let before = CursorSnapshot::from_state(state);
    debug!(target: "message", msg = %msg_name, "processing");

    let changed = apply_text_edit_msg(state, msg, clipboard, editable);

    let after = CursorSnapshot::from_state(state);
    if let Some(diff) = before.diff(&after) {
        debug!(target: "cursor", %diff, "state changed");
    }

    if let Err(violation) = state.check_invariants() {
        warn!("Invariant violated after {}: {}", msg_name, violation);
    }

    changed
}
