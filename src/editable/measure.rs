//! Text measurement used for word-wrapping and mouse hit-testing.
//!
//! Widths are expressed in whatever unit the host lays text out in: pixels
//! for a real font, columns for a terminal-style monospace grid.

use std::fmt;

/// Width-of-substring service provided by the host.
pub trait TextMeasure: Send + Sync {
    /// Advance width of a single character
    fn char_width(&self, ch: char) -> f32;

    /// Total advance width of `text`
    fn width(&self, text: &str) -> f32 {
        text.chars().map(|ch| self.char_width(ch)).sum()
    }

    /// Number of leading characters of `text` whose combined width fits in `max_width`.
    fn fit(&self, text: &str, max_width: f32) -> usize {
        let mut used = 0.0;
        let mut count = 0;
        for ch in text.chars() {
            let w = self.char_width(ch);
            if used + w > max_width {
                break;
            }
            used += w;
            count += 1;
        }
        count
    }
}

/// Fixed advance for every character.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Monospace {
    pub advance: f32,
}

impl Monospace {
    pub const fn new(advance: f32) -> Self {
        Self { advance }
    }

    /// One unit per character, so widths are column counts
    pub const fn columns() -> Self {
        Self { advance: 1.0 }
    }
}

impl Default for Monospace {
    fn default() -> Self {
        Self::columns()
    }
}

impl TextMeasure for Monospace {
    fn char_width(&self, ch: char) -> f32 {
        if ch == '\n' {
            0.0
        } else {
            self.advance
        }
    }

    fn fit(&self, text: &str, max_width: f32) -> usize {
        if self.advance <= 0.0 {
            return text.chars().count();
        }
        let columns = (max_width / self.advance).floor().max(0.0) as usize;
        text.chars().take(columns).count()
    }
}

/// Measures glyph advances with a rasterizer font.
pub struct FontMeasure {
    font: fontdue::Font,
    px: f32,
}

impl FontMeasure {
    pub fn new(font: fontdue::Font, px: f32) -> Self {
        Self { font, px }
    }

    /// Load a TTF/OTF font from raw bytes
    pub fn from_bytes(bytes: &[u8], px: f32) -> anyhow::Result<Self> {
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|e| anyhow::anyhow!("Failed to load font: {}", e))?;
        Ok(Self::new(font, px))
    }

    pub fn px(&self) -> f32 {
        self.px
    }

    /// Height of one row of text at this size
    pub fn line_height(&self) -> f32 {
        self.font
            .horizontal_line_metrics(self.px)
            .map(|m| m.new_line_size)
            .unwrap_or(self.px)
    }
}

impl fmt::Debug for FontMeasure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontMeasure").field("px", &self.px).finish()
    }
}

impl TextMeasure for FontMeasure {
    fn char_width(&self, ch: char) -> f32 {
        if ch == '\n' {
            return 0.0;
        }
        self.font.metrics(ch, self.px).advance_width
    }
}
