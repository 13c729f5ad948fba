//! Debug tracing infrastructure for development diagnostics
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=cursor=trace,selection=trace` - scoped filtering
//! - `RUST_LOG=quill::editable=debug` - module-level filtering
//!
//! # Log Files
//!
//! Logs are written to `~/.config/quill/logs/quill.log` with daily rotation.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::editable::EditableState;

/// Initialize tracing subscriber with console and file logging
///
/// Console output respects RUST_LOG (default `warn`). The file layer always
/// records debug level.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // Console goes to stderr so replay output on stdout stays clean
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, "quill.log");
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}

/// Lightweight snapshot of cursor/selection state for diffing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorSnapshot {
    pub row: usize,
    pub column: usize,
    pub anchor: (usize, usize),
    pub follower: (usize, usize),
    pub selection_active: bool,
    pub first_visible_row: usize,
    pub row_count: usize,
}

impl CursorSnapshot {
    pub fn from_state(state: &EditableState) -> Self {
        let sel = &state.selection;
        Self {
            row: state.cursor.row,
            column: state.cursor.column,
            anchor: (sel.anchor.row, sel.anchor.column),
            follower: (sel.follower.row, sel.follower.column),
            selection_active: sel.active,
            first_visible_row: state.scroll.first_visible_row,
            row_count: state.buffer.len(),
        }
    }

    /// Generate a diff description between two snapshots
    pub fn diff(&self, other: &CursorSnapshot) -> Option<String> {
        let mut changes = Vec::new();

        if self.row != other.row || self.column != other.column {
            changes.push(format!(
                "cursor ({},{}) → ({},{})",
                self.row, self.column, other.row, other.column
            ));
        }
        if self.selection_active != other.selection_active {
            let status = if other.selection_active {
                "active"
            } else {
                "cleared"
            };
            changes.push(format!("selection {}", status));
        } else if other.selection_active && self.follower != other.follower {
            changes.push(format!(
                "follower {:?} → {:?}",
                self.follower, other.follower
            ));
        }
        if self.first_visible_row != other.first_visible_row {
            changes.push(format!(
                "scroll {} → {}",
                self.first_visible_row, other.first_visible_row
            ));
        }
        if self.row_count != other.row_count {
            changes.push(format!("rows {} → {}", self.row_count, other.row_count));
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editable::Monospace;
    use std::sync::Arc;

    #[test]
    fn test_snapshot_diff() {
        let mut state = EditableState::multi_line(Some(10), Arc::new(Monospace::columns()));
        state.set_text("ab\ncd");
        let before = CursorSnapshot::from_state(&state);
        assert_eq!(before.diff(&before), None);

        state.move_up(true);
        let after = CursorSnapshot::from_state(&state);
        let diff = before.diff(&after).unwrap();
        assert!(diff.contains("cursor (1,2) → (0,2)"));
        assert!(diff.contains("selection active"));
    }
}
