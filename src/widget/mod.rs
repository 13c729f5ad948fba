//! Host-facing text widgets built on the editing core.
//!
//! Widgets own focus and editability, translate mouse coordinates into
//! cursor placement and notify a change listener after every mutation.

mod text_area;
mod text_field;

pub use text_area::TextArea;
pub use text_field::{TextField, TextFieldBuilder};

/// Called with the new text after any mutating operation
pub type ChangeListener = Box<dyn FnMut(&str) + Send>;

/// Characters a widget accepts from `char_typed`
pub fn is_printable(ch: char) -> bool {
    !ch.is_control()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_printable() {
        assert!(is_printable('a'));
        assert!(is_printable('é'));
        assert!(is_printable(' '));
        assert!(!is_printable('\n'));
        assert!(!is_printable('\u{7f}'));
    }
}
