//! Monkey tests - edge cases, fuzzing, and stress testing
//!
//! These tests intentionally push the editing core to its limits with
//! weird inputs, extreme widths, and long pseudo-random sequences of
//! operations, checking the structural invariants after every step.

mod common;

use common::{assert_invariants, cursor, rows, send, test_area, test_state};
use quill::editable::{EditableState, MemoryClipboard, MoveTarget, TextEditMsg, SENTINEL};
use quill::update_text_edit;

/// Seeded xorshift generator
struct Rng(u64);

impl Rng {
    fn next(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next() % n as u64) as usize
    }
}

const TARGETS: [MoveTarget; 10] = [
    MoveTarget::Left,
    MoveTarget::Right,
    MoveTarget::Up,
    MoveTarget::Down,
    MoveTarget::LineStart,
    MoveTarget::LineEnd,
    MoveTarget::DocumentStart,
    MoveTarget::DocumentEnd,
    MoveTarget::PageUp,
    MoveTarget::PageDown,
];

const ALPHABET: [char; 8] = ['a', 'b', ' ', 'é', '\n', 'Z', '字', '1'];

fn random_msg(rng: &mut Rng) -> TextEditMsg {
    match rng.below(12) {
        0 => TextEditMsg::Move(TARGETS[rng.below(TARGETS.len())]),
        1 => TextEditMsg::MoveWithSelection(TARGETS[rng.below(TARGETS.len())]),
        2 | 3 | 4 => TextEditMsg::InsertChar(ALPHABET[rng.below(ALPHABET.len())]),
        5 => TextEditMsg::InsertNewline,
        6 => TextEditMsg::DeleteBackward,
        7 => TextEditMsg::DeleteForward,
        8 => TextEditMsg::DeleteRow,
        9 => TextEditMsg::SelectAll,
        10 => TextEditMsg::Cut,
        _ => TextEditMsg::Paste("xy\nz".to_string()),
    }
}

/// Rows hold sentinels only at their end, and text is their concatenation
fn assert_row_shape(state: &EditableState, context: &str) {
    for (i, row) in state.buffer.rows().iter().enumerate() {
        let body = row.strip_suffix(SENTINEL).unwrap_or(row);
        assert!(
            !body.contains(SENTINEL),
            "{}: row {} has an inner newline: {:?}",
            context,
            i,
            row
        );
    }
    assert_eq!(state.text(), state.buffer.rows().concat(), "{}", context);
}

// ========================================================================
// Randomized sequences
// ========================================================================

#[test]
fn test_random_sequences_keep_invariants() {
    for seed in 1..=20u64 {
        let mut rng = Rng(seed.wrapping_mul(0x9E37_79B9_7F4A_7C15));
        let width = 1 + rng.below(12) as u32;
        let mut state = test_state("", width, 0, 0);
        state.set_displayed_row_count(1 + rng.below(5));
        let mut clipboard = MemoryClipboard::new();

        for step in 0..300 {
            let msg = random_msg(&mut rng);
            update_text_edit(&mut state, &msg, &mut clipboard, true);
            let context = format!("seed {} step {} after {:?}", seed, step, msg);
            assert_invariants(&state, &context);
            assert_row_shape(&state, &context);
        }
    }
}

#[test]
fn test_random_sequences_with_width_changes() {
    let mut rng = Rng(0xDEAD_BEEF);
    let mut state = test_state("the quick brown fox\njumps over", 8, 0, 0);
    let mut clipboard = MemoryClipboard::new();

    for step in 0..500 {
        if step % 25 == 0 {
            let width = match rng.below(4) {
                0 => None,
                _ => Some(rng.below(20) as u32),
            };
            let before = state.text();
            state.set_width(width);
            assert_eq!(state.text(), before, "rewrap changed text at step {}", step);
        }
        let msg = random_msg(&mut rng);
        update_text_edit(&mut state, &msg, &mut clipboard, true);
        let context = format!("step {} after {:?}", step, msg);
        assert_invariants(&state, &context);
        assert_row_shape(&state, &context);
    }
}

#[test]
fn test_random_sequences_single_line() {
    let mut rng = Rng(42);
    let mut field = quill::widget::TextField::builder("fuzz", 6.0).build();
    field.focused = true;
    let mut clipboard = MemoryClipboard::new();

    for _ in 0..500 {
        let msg = random_msg(&mut rng);
        field.handle(&msg, &mut clipboard);
        assert_eq!(field.state().buffer.len(), 1);
        assert!(!field.text().contains('\n'));
        assert!(field.cursor_screen_column() <= 6);
        assert_invariants(field.state(), "single line");
    }
}

// ========================================================================
// Width edge cases
// ========================================================================

#[test]
fn test_zero_width_wraps_one_char_per_row() {
    let mut state = test_state("abc", 0, 0, 0);
    assert_eq!(rows(&state), vec!["a", "b", "c"]);
    send(&mut state, TextEditMsg::Move(MoveTarget::DocumentEnd));
    assert_eq!(cursor(&state), (2, 1));
    assert_invariants(&state, "zero width");
}

#[test]
fn test_maximum_width() {
    let mut state = test_state("hello world", u32::MAX, 0, 0);
    assert_eq!(rows(&state), vec!["hello world"]);
    send(&mut state, TextEditMsg::InsertChar('!'));
    assert_eq!(state.text(), "!hello world");
}

#[test]
fn test_rapid_width_oscillation() {
    let mut area = test_area(10, 3);
    area.set_text("some text that wraps a few times\nand more");
    let text = area.text();
    for i in 0..100u32 {
        area.width_changed(if i % 2 == 0 { Some(0) } else { Some(i) });
        assert_eq!(area.text(), text);
        assert_invariants(area.state(), "oscillation");
    }
}

// ========================================================================
// Empty buffer
// ========================================================================

#[test]
fn test_operations_on_empty_buffer() {
    let mut state = test_state("", 10, 0, 0);
    for msg in [
        TextEditMsg::DeleteBackward,
        TextEditMsg::DeleteForward,
        TextEditMsg::DeleteRow,
        TextEditMsg::Cut,
        TextEditMsg::SelectAll,
        TextEditMsg::DeleteBackward,
    ] {
        send(&mut state, msg);
        assert_eq!(rows(&state), vec![""]);
        assert_eq!(cursor(&state), (0, 0));
    }
    for target in TARGETS {
        send(&mut state, TextEditMsg::MoveWithSelection(target));
        assert_eq!(cursor(&state), (0, 0));
    }
}

#[test]
fn test_delete_backward_on_empty_repeatedly() {
    let mut state = test_state("", 10, 0, 0);
    for _ in 0..100 {
        assert!(!send(&mut state, TextEditMsg::DeleteBackward));
    }
    assert_eq!(state.text(), "");
}

// ========================================================================
// Unicode
// ========================================================================

#[test]
fn test_multibyte_characters_count_as_one_column() {
    let mut state = test_state("日本語テキスト", 3, 0, 0);
    assert_eq!(rows(&state), vec!["日本語", "テキス", "ト"]);
    send(&mut state, TextEditMsg::Move(MoveTarget::DocumentEnd));
    send(&mut state, TextEditMsg::DeleteBackward);
    assert_eq!(state.text(), "日本語テキス");
    send(&mut state, TextEditMsg::MoveWithSelection(MoveTarget::LineStart));
    assert_eq!(state.selected_text(), "テキス");
}

#[test]
fn test_emoji_and_combining_marks() {
    let mut state = test_state("", 20, 0, 0);
    send(&mut state, TextEditMsg::InsertText("🎉e\u{301}".to_string()));
    assert_eq!(cursor(&state), (0, 3));
    send(&mut state, TextEditMsg::DeleteBackward);
    assert_eq!(state.text(), "🎉e");
    assert_invariants(&state, "emoji");
}

// ========================================================================
// Large documents
// ========================================================================

#[test]
fn test_large_document_navigation() {
    let text: String = (0..2000).map(|i| format!("row {}\n", i)).collect();
    let mut state = test_state(&text, 6, 0, 0);
    state.set_displayed_row_count(10);

    send(&mut state, TextEditMsg::Move(MoveTarget::PageDown));
    assert_eq!(state.cursor.row, state.buffer.last_row());
    assert_invariants(&state, "page down");

    send(&mut state, TextEditMsg::SelectAll);
    send(&mut state, TextEditMsg::DeleteBackward);
    assert_eq!(state.text(), "");
    assert_eq!(state.first_visible_row(), 0);
}

// ========================================================================
// Round trips and idempotence
// ========================================================================

#[test]
fn test_set_text_round_trips() {
    for text in ["", "a\nb\nc", "trailing\n", "\n\n", "wrap me please", "x\n\ny z\n"] {
        for width in [0, 3, 7, 100] {
            let state = test_state(text, width, 0, 0);
            assert_eq!(state.text(), text, "width {}", width);
            assert_eq!(state.lines().join("\n"), text, "width {}", width);
        }
    }
}

#[test]
fn test_sanitize_is_idempotent() {
    let mut state = test_state("one\ntwo\nthree", 4, 2, 3);
    send(&mut state, TextEditMsg::MoveWithSelection(MoveTarget::Up));
    state.sanitize();
    let once = (rows(&state), state.cursor, state.selection, state.scroll);
    state.sanitize();
    assert_eq!((rows(&state), state.cursor, state.selection, state.scroll), once);
}
