//! Cell-grid text metrics.
//!
//! [`CellMetrics`] is a [`FontMetrics`] provider for monospace output: every
//! cell has the same advance and every line the same height, both expressed as
//! multiples of the font size. Widths come from `unicode-width` and grapheme
//! clusters from `unicode-segmentation`, so CJK and emoji take two cells.

mod width;
mod wrap;

pub use width::{char_width, grapheme_width, string_width};
pub use wrap::{wrap_runs, WrapOutput};

use crate::engine::encoding::{decode_runs, EncodedText};
use crate::error::EncodingError;
use crate::layout::metrics::{Font, FontMetrics, TextExtent, WrappedText};

/// Slack when converting a pixel bound into whole cells, so a bound that is a
/// float hair below an exact multiple still fits that many cells.
const CELL_EPSILON: f32 = 1e-3;

/// Monospace metrics on a cell grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellMetrics {
    /// Cell advance as a multiple of the font size.
    pub advance: f32,
    /// Line height as a multiple of the font size.
    pub line_height: f32,
}

impl Default for CellMetrics {
    /// 8x16 cells at a 16px font.
    fn default() -> Self {
        Self {
            advance: 0.5,
            line_height: 1.0,
        }
    }
}

impl CellMetrics {
    pub fn new(advance: f32, line_height: f32) -> Self {
        Self {
            advance,
            line_height,
        }
    }

    /// Pixel width of one cell at `font_size`.
    pub fn cell_width(&self, font_size: f32) -> f32 {
        self.advance * font_size
    }

    /// Pixel height of one line at `font_size`.
    pub fn line_px(&self, font_size: f32) -> f32 {
        self.line_height * font_size
    }

    /// Whole units that fit in `bound`, or `None` when nothing limits it.
    fn whole_cells(bound: f32, unit: f32) -> Option<usize> {
        if unit <= 0.0 || !bound.is_finite() {
            return None;
        }
        Some(((bound.max(0.0) + CELL_EPSILON) / unit).floor() as usize)
    }
}

impl FontMetrics for CellMetrics {
    fn wrap_lines(
        &self,
        _font: &Font,
        text: &EncodedText,
        font_size: f32,
        max_width: Option<f32>,
        max_height: Option<f32>,
        max_lines: u32,
        on_layer: bool,
    ) -> Result<WrappedText, EncodingError> {
        let runs = decode_runs(text.as_bytes())?;

        let max_cols = max_width.and_then(|w| Self::whole_cells(w, self.cell_width(font_size)));

        let mut line_cap = (max_lines > 0).then_some(max_lines as usize);
        if !on_layer {
            let rows = max_height.and_then(|h| Self::whole_cells(h, self.line_px(font_size)));
            if let Some(rows) = rows {
                // At least one line stays visible even in a degenerate box.
                let rows = rows.max(1);
                line_cap = Some(line_cap.map_or(rows, |cap| cap.min(rows)));
            }
        }

        let out = wrap_runs(&runs, max_cols, line_cap);
        Ok(WrappedText {
            lines: out.lines,
            truncated: out.truncated,
        })
    }

    fn measure_text(&self, _font: &Font, text: &WrappedText, font_size: f32) -> TextExtent {
        let widest = text.lines.iter().map(|line| line.advance).max().unwrap_or(0);
        TextExtent {
            max_width: widest as f32 * self.cell_width(font_size),
            max_height: text.lines.len() as f32 * self.line_px(font_size),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Argb;

    fn encoded(text: &str) -> EncodedText {
        let mut encoded = EncodedText::with_header(Argb::WHITE);
        encoded.push_str(text);
        encoded
    }

    #[test]
    fn test_unbounded_single_line() {
        let metrics = CellMetrics::default();
        let font = Font::default();
        let wrapped = metrics
            .wrap_lines(&font, &encoded("hello world"), 16.0, None, None, 0, false)
            .unwrap();
        assert_eq!(wrapped.line_texts(), vec!["hello world"]);

        let extent = metrics.measure_text(&font, &wrapped, 16.0);
        assert_eq!(extent.max_width, 88.0);
        assert_eq!(extent.max_height, 16.0);
    }

    #[test]
    fn test_width_bound_wraps() {
        let metrics = CellMetrics::default();
        let font = Font::default();
        // 64px / 8px cells = 8 columns
        let wrapped = metrics
            .wrap_lines(&font, &encoded("hello world"), 16.0, Some(64.0), None, 0, false)
            .unwrap();
        assert_eq!(wrapped.line_texts(), vec!["hello", "world"]);

        let extent = metrics.measure_text(&font, &wrapped, 16.0);
        assert_eq!(extent.max_width, 40.0);
        assert_eq!(extent.max_height, 32.0);
    }

    #[test]
    fn test_height_clips_off_layer_only() {
        let metrics = CellMetrics::default();
        let font = Font::default();
        let text = encoded("a\nb\nc");

        let clipped = metrics
            .wrap_lines(&font, &text, 16.0, Some(80.0), Some(32.0), 0, false)
            .unwrap();
        assert_eq!(clipped.line_texts(), vec!["a", "b"]);
        assert!(clipped.truncated);

        let layered = metrics
            .wrap_lines(&font, &text, 16.0, Some(80.0), Some(32.0), 0, true)
            .unwrap();
        assert_eq!(layered.line_count(), 3);
        assert!(!layered.truncated);
    }

    #[test]
    fn test_max_lines_applies_on_layer() {
        let metrics = CellMetrics::default();
        let wrapped = metrics
            .wrap_lines(&Font::default(), &encoded("a\nb\nc"), 16.0, None, None, 1, true)
            .unwrap();
        assert_eq!(wrapped.line_texts(), vec!["a"]);
    }

    #[test]
    fn test_header_only_stream_has_no_lines() {
        let metrics = CellMetrics::default();
        let result = metrics.wrap_lines(
            &Font::default(),
            &EncodedText::with_header(Argb::WHITE),
            16.0,
            None,
            None,
            0,
            false,
        );
        assert!(result.unwrap().is_empty());
    }

    #[test]
    fn test_empty_measures_zero() {
        let metrics = CellMetrics::default();
        let extent = metrics.measure_text(&Font::default(), &WrappedText::default(), 16.0);
        assert_eq!(extent, TextExtent::default());
    }
}
