//! Widget configuration persistence
//!
//! Stores defaults for headless widgets in `~/.config/quill/config.yaml`

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::editable::{Monospace, TextMeasure, Validator};

/// Layout and validation defaults for text widgets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    /// Available width in pixels; `None` disables wrapping
    pub wrap_width: Option<u32>,
    /// Rows the host can display at once
    pub displayed_rows: usize,
    /// Advance of one character for the monospace measure
    pub char_width: f32,
    /// Pixel height of one row, used for mouse hit-testing
    pub line_height: f32,
    /// Build a text field instead of a text area
    pub single_line: bool,
    /// Built-in validator for text fields
    pub validator: Option<Validator>,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            wrap_width: Some(200),
            displayed_rows: 5,
            char_width: 6.0,
            line_height: 9.0,
            single_line: false,
            validator: None,
        }
    }
}

impl WidgetConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load from an explicit path, falling back to defaults on any failure
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to `path`, creating the parent directory if needed
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = serde_yaml::to_string(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Save config to the default location
    pub fn save(&self) -> anyhow::Result<()> {
        let path = crate::config_paths::config_file().context("No config directory available")?;
        self.save_to(&path)
    }

    /// Monospace measure with the configured advance
    pub fn measure(&self) -> Arc<dyn TextMeasure> {
        Arc::new(Monospace::new(self.char_width))
    }
}
