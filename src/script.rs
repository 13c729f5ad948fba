//! Scripted input replay against a headless widget.
//!
//! A script is a YAML document:
//!
//! ```yaml
//! text: "initial text"
//! clipboard: "pasted later"
//! steps:
//!   - type: "hello"
//!   - move: { to: line_start, shift: true }
//!   - command: cut
//!   - click: { x: 12, y: 9 }
//!   - width: 30
//! ```

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::config::WidgetConfig;
use crate::editable::{Clipboard, DisplayRow, MoveTarget, StyledSegment, TextEditMsg, TextMeasure};
use crate::widget::{TextArea, TextField, TextFieldBuilder};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Script {
    /// Text the widget starts with
    pub text: Option<String>,
    /// Initial contents of the in-memory clipboard
    pub clipboard: Option<String>,
    pub steps: Vec<ScriptStep>,
}

/// One input event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptStep {
    /// Characters typed one by one
    Type(String),
    /// Any editing command
    Command(TextEditMsg),
    Move {
        to: MoveTarget,
        #[serde(default)]
        shift: bool,
    },
    /// Mouse click relative to the text origin
    Click {
        x: f32,
        #[serde(default)]
        y: f32,
        #[serde(default)]
        shift: bool,
    },
    /// Mouse wheel; positive scrolls up
    Scroll(f32),
    /// Paste the clipboard contents
    Paste,
    /// New available width, `~` to stop wrapping
    Width(Option<u32>),
    Rows(usize),
    Focus(bool),
    Editable(bool),
}

impl Script {
    pub fn from_yaml(source: &str) -> anyhow::Result<Self> {
        serde_yaml::from_str(source).context("Failed to parse script")
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?;
        Self::from_yaml(&source).with_context(|| format!("Invalid script {}", path.display()))
    }
}

/// The widget a script drives
#[derive(Debug)]
pub enum Widget {
    Area(TextArea),
    Field(TextField),
}

impl Widget {
    /// Build a focused widget from configuration
    pub fn from_config(config: &WidgetConfig, measure: Arc<dyn TextMeasure>) -> Self {
        if config.single_line {
            let inner_width = config.wrap_width.map(|w| w as f32).unwrap_or(f32::MAX);
            let mut builder = TextFieldBuilder::new("replay", inner_width).measure(measure);
            if let Some(validator) = config.validator {
                builder = builder.validator(validator);
            }
            let mut field = builder.build();
            field.focused = true;
            Widget::Field(field)
        } else {
            let mut area = TextArea::new(config.wrap_width, config.displayed_rows, measure)
                .with_line_height(config.line_height);
            area.focused = true;
            Widget::Area(area)
        }
    }

    pub fn set_text(&mut self, text: &str) -> bool {
        match self {
            Widget::Area(area) => area.set_text(text),
            Widget::Field(field) => field.set_text(text),
        }
    }

    /// Apply one step; returns whether the widget handled it
    pub fn apply(&mut self, step: &ScriptStep, clipboard: &mut dyn Clipboard) -> bool {
        match (self, step) {
            (Widget::Area(area), ScriptStep::Type(text)) => {
                text.chars().fold(false, |any, ch| {
                    let handled = if ch == '\n' {
                        area.handle(&TextEditMsg::InsertNewline, clipboard)
                    } else {
                        area.char_typed(ch)
                    };
                    any | handled
                })
            }
            (Widget::Field(field), ScriptStep::Type(text)) => {
                text.chars().fold(false, |any, ch| field.char_typed(ch) | any)
            }
            (Widget::Area(area), ScriptStep::Command(msg)) => area.handle(msg, clipboard),
            (Widget::Field(field), ScriptStep::Command(msg)) => field.handle(msg, clipboard),
            (Widget::Area(area), ScriptStep::Move { to, shift }) => {
                area.handle(&TextEditMsg::movement(*to, *shift), clipboard)
            }
            (Widget::Field(field), ScriptStep::Move { to, shift }) => {
                field.handle(&TextEditMsg::movement(*to, *shift), clipboard)
            }
            (Widget::Area(area), ScriptStep::Click { x, y, shift }) => {
                area.mouse_click(*x, *y, *shift)
            }
            (Widget::Field(field), ScriptStep::Click { x, shift, .. }) => {
                field.mouse_click(*x, *shift)
            }
            (Widget::Area(area), ScriptStep::Scroll(amount)) => area.mouse_scroll(*amount),
            (Widget::Field(_), ScriptStep::Scroll(_)) => false,
            (Widget::Area(area), ScriptStep::Paste) => area.paste_from(clipboard),
            (Widget::Field(field), ScriptStep::Paste) => field.paste_from(clipboard),
            (Widget::Area(area), ScriptStep::Width(width)) => {
                area.width_changed(*width);
                true
            }
            (Widget::Field(field), ScriptStep::Width(width)) => {
                field.set_inner_width(width.map(|w| w as f32).unwrap_or(f32::MAX));
                true
            }
            (Widget::Area(area), ScriptStep::Rows(rows)) => {
                area.set_displayed_rows(*rows);
                true
            }
            (Widget::Field(_), ScriptStep::Rows(_)) => false,
            (Widget::Area(area), ScriptStep::Focus(focused)) => {
                area.focused = *focused;
                true
            }
            (Widget::Field(field), ScriptStep::Focus(focused)) => {
                field.focused = *focused;
                true
            }
            (Widget::Area(area), ScriptStep::Editable(editable)) => {
                area.editable = *editable;
                true
            }
            (Widget::Field(field), ScriptStep::Editable(editable)) => {
                field.editable = *editable;
                true
            }
        }
    }

    pub fn report(&self) -> Report {
        match self {
            Widget::Area(area) => {
                let state = area.state();
                Report {
                    text: state.text(),
                    rows: area.display_rows(),
                    row_count: state.buffer.len(),
                    first_visible_row: state.first_visible_row(),
                    cursor: [state.cursor.row, state.cursor.column],
                    screen_cursor: {
                        let pos = area.cursor_screen_position();
                        [pos.row, pos.column]
                    },
                    selection: state.has_selection().then(|| state.selected_text()),
                    segments: Vec::new(),
                }
            }
            Widget::Field(field) => {
                let state = field.state();
                let selection = field.selection_span();
                Report {
                    text: state.text(),
                    rows: vec![DisplayRow {
                        index: 0,
                        content: field.visible_text(),
                        selected: selection.is_some(),
                        selection,
                    }],
                    row_count: 1,
                    first_visible_row: 0,
                    cursor: [0, state.cursor.column],
                    screen_cursor: [0, field.cursor_screen_column()],
                    selection: state.has_selection().then(|| state.selected_text()),
                    segments: field.render_segments(),
                }
            }
        }
    }
}

/// Final widget state after a replay
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub text: String,
    pub rows: Vec<DisplayRow>,
    pub row_count: usize,
    pub first_visible_row: usize,
    /// `[row, column]` in the buffer
    pub cursor: [usize; 2],
    /// `[row, column]` relative to the first visible row or character
    pub screen_cursor: [usize; 2],
    pub selection: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub segments: Vec<StyledSegment>,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "rows {}..{} of {}",
            self.first_visible_row,
            self.first_visible_row + self.rows.len(),
            self.row_count
        )?;
        for row in &self.rows {
            let marker = if row.selected { '*' } else { ' ' };
            writeln!(f, "{:>4}{}| {}", row.index, marker, row.content)?;
        }
        writeln!(f, "cursor: {}:{}", self.cursor[0], self.cursor[1])?;
        if let Some(selection) = &self.selection {
            writeln!(f, "selection: {:?}", selection)?;
        }
        writeln!(f, "text: {:?}", self.text)
    }
}

/// Run every step of `script` against `widget`
pub fn replay(script: &Script, mut widget: Widget, clipboard: &mut dyn Clipboard) -> Report {
    if let Some(text) = &script.text {
        if !widget.set_text(text) {
            tracing::warn!("Initial text rejected: {:?}", text);
        }
    }
    if let Some(contents) = &script.clipboard {
        clipboard.set_text(contents);
    }

    for (i, step) in script.steps.iter().enumerate() {
        let handled = widget.apply(step, clipboard);
        tracing::debug!("step {}: {:?} handled={}", i, step, handled);
    }

    widget.report()
}
