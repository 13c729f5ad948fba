//! Data handed to the host renderer: visible rows with their selection
//! highlight, and styled segments for single-line fields.

use std::fmt;
use std::ops::Range;
use std::sync::Arc;

use serde::Serialize;

/// One on-screen row of a text area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayRow {
    /// Row index in the buffer
    pub index: usize,
    /// Visible content, sentinel stripped
    pub content: String,
    pub selected: bool,
    /// Highlighted `[start, end)` columns
    pub selection: Option<Range<usize>>,
}

/// How a run of field text should be drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Normal,
    /// Text that does not form a complete valid value
    Invalid,
    /// Hint shown while the field is empty
    Placeholder,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyledSegment {
    pub text: String,
    pub tone: Tone,
}

impl StyledSegment {
    pub fn new(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }
}

/// What a render transform sees: the portion of the field currently on
/// screen, where it starts in the full text, and the full text itself.
#[derive(Debug, Clone, Copy)]
pub struct RenderInput<'a> {
    pub visible: &'a str,
    pub first_char_index: usize,
    pub full_text: &'a str,
}

/// Turns the displayed substring of a field into styled segments
pub type RenderTransform = Arc<dyn Fn(&RenderInput<'_>) -> Vec<StyledSegment> + Send + Sync>;

/// Everything in the normal tone
pub fn plain() -> RenderTransform {
    Arc::new(|input: &RenderInput<'_>| {
        vec![StyledSegment::new(input.visible, Tone::Normal)]
    })
}

/// Draw the field in the invalid tone whenever the full text fails `is_valid`
pub fn flag_invalid(is_valid: impl Fn(&str) -> bool + Send + Sync + 'static) -> RenderTransform {
    Arc::new(move |input: &RenderInput<'_>| {
        let tone = if is_valid(input.full_text) {
            Tone::Normal
        } else {
            Tone::Invalid
        };
        vec![StyledSegment::new(input.visible, tone)]
    })
}

/// Newtype so transforms can sit in `Debug` structs
#[derive(Clone)]
pub struct Transform(pub RenderTransform);

impl Transform {
    pub fn apply(&self, input: &RenderInput<'_>) -> Vec<StyledSegment> {
        (self.0)(input)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self(plain())
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Transform(..)")
    }
}
