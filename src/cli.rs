//! Command-line argument parsing for the replay tool
//!
//! Supports:
//! - Choosing a text area or a single-line field
//! - Overriding wrap width, visible rows and validation from the config file
//! - Measuring with a real font instead of the monospace grid
//! - Plain text or JSON output

use clap::Parser;
use std::path::PathBuf;

use crate::config::WidgetConfig;
use crate::editable::Validator;

/// Replay text editing input against a headless text widget
#[derive(Parser, Debug)]
#[command(name = "quill", version, about)]
pub struct CliArgs {
    /// YAML script of input events
    #[arg(value_name = "SCRIPT")]
    pub script: PathBuf,

    /// Config file (defaults to ~/.config/quill/config.yaml)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Available width in pixels
    #[arg(long, value_name = "PX")]
    pub width: Option<u32>,

    /// Number of rows the widget displays
    #[arg(long, value_name = "N")]
    pub rows: Option<usize>,

    /// Replay against a single-line text field
    #[arg(short = 's', long)]
    pub single_line: bool,

    /// Built-in validator for the text field (integer, float, double)
    #[arg(long, value_name = "KIND")]
    pub validator: Option<Validator>,

    /// TTF/OTF font used to measure text
    #[arg(long, value_name = "PATH")]
    pub font: Option<PathBuf>,

    /// Font size in pixels (used with --font)
    #[arg(long, value_name = "PX", default_value_t = 16.0)]
    pub font_size: f32,

    /// Use the system clipboard instead of an in-memory one
    #[arg(long)]
    pub system_clipboard: bool,

    /// Print the final state as JSON
    #[arg(long)]
    pub json: bool,
}

impl CliArgs {
    /// Layer command-line overrides on top of the loaded config
    pub fn apply_to(&self, config: &mut WidgetConfig) {
        if let Some(width) = self.width {
            config.wrap_width = Some(width);
        }
        if let Some(rows) = self.rows {
            config.displayed_rows = rows.max(1);
        }
        if self.single_line {
            config.single_line = true;
        }
        if let Some(validator) = self.validator {
            config.validator = Some(validator);
            config.single_line = true;
        }
    }
}
