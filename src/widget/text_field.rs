//! Single-line text field with validation and horizontal scrolling.

use std::fmt;
use std::ops::Range;
use std::sync::Arc;

use crate::editable::{
    flag_invalid, Clipboard, EditConstraints, EditableState, Monospace, RenderInput,
    RenderTransform, RowBuffer, StyledSegment, TextEditMsg, TextMeasure, TextPredicate, Tone,
    Transform, Validator,
};
use crate::update::update_text_edit;

use super::{is_printable, ChangeListener};

/// One-row text input.
///
/// Text wider than the field scrolls horizontally: `first_char_index` is the
/// first character drawn, kept so that the caret is always on screen.
pub struct TextField {
    state: EditableState,
    title: String,
    placeholder: Option<String>,
    inner_width: f32,
    first_char_index: usize,
    render: Transform,
    pub focused: bool,
    pub active: bool,
    pub editable: bool,
    on_change: Option<ChangeListener>,
}

impl fmt::Debug for TextField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextField")
            .field("title", &self.title)
            .field("text", &self.state.text())
            .field("cursor", &self.state.cursor)
            .field("first_char_index", &self.first_char_index)
            .field("focused", &self.focused)
            .field("editable", &self.editable)
            .finish_non_exhaustive()
    }
}

impl TextField {
    pub fn builder(title: impl Into<String>, inner_width: f32) -> TextFieldBuilder {
        TextFieldBuilder::new(title, inner_width)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn placeholder(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }

    pub fn state(&self) -> &EditableState {
        &self.state
    }

    pub fn text(&self) -> String {
        self.state.text()
    }

    pub fn first_char_index(&self) -> usize {
        self.first_char_index
    }

    /// Replace the text; rejected if it fails the field's predicate
    pub fn set_text(&mut self, text: &str) -> bool {
        self.edit(|state| state.set_text(text))
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

    /// Place the cursor at `x` pixels from the start of the drawn text
    pub fn mouse_click(&mut self, x: f32, extend_selection: bool) -> bool {
        if !self.active {
            return false;
        }
        self.focused = true;

        let offset = self
            .state
            .buffer
            .measure()
            .fit(&self.visible_text(), x.max(0.0));
        let column = self.first_char_index + offset;
        self.state.place_cursor(0, column, extend_selection);
        self.scroll_to_cursor();
        true
    }

    /// The host layout resized the field
    pub fn set_inner_width(&mut self, inner_width: f32) {
        self.inner_width = inner_width.max(0.0);
        self.scroll_to_cursor();
    }

    /// The part of the text that fits in the field
    pub fn visible_text(&self) -> String {
        let row = self.state.buffer.visible(0);
        let rest: String = row.chars().skip(self.first_char_index).collect();
        let take = self.state.buffer.measure().fit(&rest, self.inner_width);
        rest.chars().take(take).collect()
    }

    /// Styled segments to draw: the placeholder while empty, otherwise the
    /// visible text through the render transform
    pub fn render_segments(&self) -> Vec<StyledSegment> {
        let full_text = self.state.text();
        if full_text.is_empty() {
            return match &self.placeholder {
                Some(placeholder) => {
                    vec![StyledSegment::new(placeholder.as_str(), Tone::Placeholder)]
                }
                None => Vec::new(),
            };
        }
        let visible = self.visible_text();
        self.render.apply(&RenderInput {
            visible: &visible,
            first_char_index: self.first_char_index,
            full_text: &full_text,
        })
    }

    /// Highlighted columns of the visible text
    pub fn selection_span(&self) -> Option<Range<usize>> {
        let sel = &self.state.selection;
        if !sel.has_content() {
            return None;
        }
        let visible_len = self.visible_text().chars().count();
        let start = sel.start().column.saturating_sub(self.first_char_index);
        let end = sel
            .end()
            .column
            .saturating_sub(self.first_char_index)
            .min(visible_len);
        (start < end).then_some(start..end)
    }

    /// Caret column relative to the first drawn character
    pub fn cursor_screen_column(&self) -> usize {
        self.state.cursor.column.saturating_sub(self.first_char_index)
    }

    /// Shift the horizontal window so the caret is on screen, and pull it
    /// back while the text before it would fit in the free space on the right
    fn scroll_to_cursor(&mut self) {
        let row = self.state.buffer.visible(0);
        let chars: Vec<char> = row.chars().collect();
        let column = self.state.cursor.column.min(chars.len());
        let measure = self.state.buffer.measure();

        self.first_char_index = self.first_char_index.min(chars.len());
        if column < self.first_char_index {
            self.first_char_index = column;
        }
        while self.first_char_index < column {
            let span: String = chars[self.first_char_index..column].iter().collect();
            if measure.width(&span) <= self.inner_width {
                break;
            }
            self.first_char_index += 1;
        }

        while self.first_char_index > 0 {
            let tail: String = chars[self.first_char_index - 1..].iter().collect();
            if measure.width(&tail) > self.inner_width {
                break;
            }
            self.first_char_index -= 1;
        }
    }

    /// Run an operation, keep the caret visible and notify the listener if
    /// the text changed
    fn edit(&mut self, op: impl FnOnce(&mut EditableState) -> bool) -> bool {
        let before = self.state.revision();
        let result = op(&mut self.state);
        self.scroll_to_cursor();
        if self.state.revision() != before {
            if let Some(listener) = self.on_change.as_mut() {
                listener(&self.state.text());
            }
        }
        result
    }
}

/// Builder for [`TextField`].
pub struct TextFieldBuilder {
    title: String,
    inner_width: f32,
    placeholder: Option<String>,
    text: String,
    on_change: Option<ChangeListener>,
    predicate: Option<TextPredicate>,
    render: Option<RenderTransform>,
    measure: Arc<dyn TextMeasure>,
}

impl TextFieldBuilder {
    pub fn new(title: impl Into<String>, inner_width: f32) -> Self {
        Self {
            title: title.into(),
            inner_width,
            placeholder: None,
            text: String::new(),
            on_change: None,
            predicate: None,
            render: None,
            measure: Arc::new(Monospace::columns()),
        }
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Use the title as the placeholder
    pub fn placeholder_from_title(mut self) -> Self {
        self.placeholder = Some(self.title.clone());
        self
    }

    /// Initial text, ignored if it fails the predicate
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn on_change(mut self, listener: impl FnMut(&str) + Send + 'static) -> Self {
        self.on_change = Some(Box::new(listener));
        self
    }

    pub fn text_predicate(
        mut self,
        predicate: impl Fn(&str) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.predicate = Some(Arc::new(predicate));
        self
    }

    /// Validate with a built-in numeric predicate and flag incomplete values
    pub fn validator(mut self, validator: Validator) -> Self {
        self.predicate = Some(validator.predicate());
        self.render = Some(flag_invalid(move |text| validator.is_complete(text)));
        self
    }

    pub fn render_transform(mut self, render: RenderTransform) -> Self {
        self.render = Some(render);
        self
    }

    pub fn measure(mut self, measure: Arc<dyn TextMeasure>) -> Self {
        self.measure = measure;
        self
    }

    pub fn build(self) -> TextField {
        let constraints = EditConstraints {
            allow_multiline: false,
            predicate: self.predicate,
        };
        let mut state = EditableState::new(RowBuffer::new(None, self.measure), constraints);
        if !self.text.is_empty() && !state.set_text(&self.text) {
            tracing::warn!("Initial text {:?} rejected by field '{}'", self.text, self.title);
        }

        let mut field = TextField {
            state,
            title: self.title,
            placeholder: self.placeholder,
            inner_width: self.inner_width.max(0.0),
            first_char_index: 0,
            render: self.render.map(Transform).unwrap_or_default(),
            focused: false,
            active: true,
            editable: true,
            on_change: self.on_change,
        };
        field.scroll_to_cursor();
        field
    }
}
