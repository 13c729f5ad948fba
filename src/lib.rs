//! Quill - text editing core for single-line and multi-line widgets
//!
//! This crate provides a wrapped row buffer with a caret, an anchor/follower
//! selection and a scroll window, plus the text area and text field widgets
//! built on top of it. Hosts drive the widgets with [`editable::TextEditMsg`]
//! commands and typed characters, then draw the rows they report.

pub mod cli;
pub mod config;
pub mod config_paths;
pub mod editable;
pub mod script;
pub mod tracing;
pub mod update;
pub mod widget;

// Re-export commonly used types
pub use config::WidgetConfig;
pub use editable::{EditableState, TextEditMsg};
pub use update::update_text_edit;
pub use widget::{TextArea, TextField};
