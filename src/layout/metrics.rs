//! Font metrics provider contract.
//!
//! The provider parses encoded text into colored runs, breaks them into lines
//! and reports the natural extent of the result. Everything the engine knows
//! about glyph geometry comes through this trait.

use crate::engine::encoding::{EncodedText, TextRun};
use crate::error::EncodingError;

/// Font selection handed through to the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Font {
    pub family: String,
}

impl Font {
    pub fn new(family: impl Into<String>) -> Self {
        Self {
            family: family.into(),
        }
    }
}

impl Default for Font {
    fn default() -> Self {
        Self::new("monospace")
    }
}

/// One visual line of colored runs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WrappedLine {
    pub runs: Vec<TextRun>,
    /// Advance of the line in provider units (cells for [`CellMetrics`](super::CellMetrics)).
    pub advance: usize,
}

impl WrappedLine {
    /// Text of the line without colors.
    pub fn text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }
}

/// Word-wrapped text ready for a surface.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WrappedText {
    pub lines: Vec<WrappedLine>,
    /// Lines were dropped to honor a line count or height limit.
    pub truncated: bool,
}

impl WrappedText {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Line texts without colors.
    pub fn line_texts(&self) -> Vec<String> {
        self.lines.iter().map(WrappedLine::text).collect()
    }
}

/// Natural size of a block of text.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TextExtent {
    pub max_width: f32,
    pub max_height: f32,
}

/// Glyph metrics and line breaking.
///
/// `None` bounds are unconstrained. `max_lines == 0` means unlimited.
/// `on_layer` tells the provider the surface is layer-backed and clips its own
/// content, so height need not be enforced by dropping lines.
pub trait FontMetrics {
    #[allow(clippy::too_many_arguments)]
    fn wrap_lines(
        &self,
        font: &Font,
        text: &EncodedText,
        font_size: f32,
        max_width: Option<f32>,
        max_height: Option<f32>,
        max_lines: u32,
        on_layer: bool,
    ) -> Result<WrappedText, EncodingError>;

    fn measure_text(&self, font: &Font, text: &WrappedText, font_size: f32) -> TextExtent;
}
