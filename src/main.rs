//! quill - replay scripted editing input against a text widget and print
//! the resulting state.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use quill::cli::CliArgs;
use quill::config::WidgetConfig;
use quill::editable::{Clipboard, FontMeasure, MemoryClipboard, SystemClipboard, TextMeasure};
use quill::script::{replay, Script, Widget};

fn main() -> Result<()> {
    quill::tracing::init();

    let args = CliArgs::parse();

    let mut config = match &args.config {
        Some(path) => WidgetConfig::load_from(path),
        None => WidgetConfig::load(),
    };
    args.apply_to(&mut config);

    let measure: Arc<dyn TextMeasure> = match &args.font {
        Some(path) => {
            let bytes = std::fs::read(path)
                .with_context(|| format!("Failed to read font {}", path.display()))?;
            let font = FontMeasure::from_bytes(&bytes, args.font_size)?;
            config.line_height = font.line_height();
            Arc::new(font)
        }
        None => config.measure(),
    };

    let script = Script::load(&args.script)?;

    let mut clipboard: Box<dyn Clipboard> = if args.system_clipboard {
        Box::new(SystemClipboard)
    } else {
        Box::new(MemoryClipboard::new())
    };

    let widget = Widget::from_config(&config, measure);
    let report = replay(&script, widget, clipboard.as_mut());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report);
    }

    Ok(())
}
