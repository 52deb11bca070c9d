//! Word wrapping of colored runs on a cell grid.
//!
//! Breaks at Unicode word boundaries (UAX #29), falls back to grapheme breaks
//! for words wider than a line, and treats `\n` as a hard break. Runs keep
//! their color across breaks; a word split between two runs is treated as two
//! segments.

use unicode_segmentation::UnicodeSegmentation;

use super::width::{grapheme_width, string_width};
use crate::engine::encoding::TextRun;
use crate::layout::metrics::WrappedLine;
use crate::types::Argb;

/// Result of [`wrap_runs`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WrapOutput {
    pub lines: Vec<WrappedLine>,
    pub truncated: bool,
}

/// Line being filled.
#[derive(Default)]
struct LineBuilder {
    runs: Vec<TextRun>,
    width: usize,
}

impl LineBuilder {
    fn push(&mut self, color: Argb, segment: &str, width: usize) {
        match self.runs.last_mut() {
            Some(last) if last.color == color => last.text.push_str(segment),
            _ => self.runs.push(TextRun {
                color,
                text: segment.to_string(),
            }),
        }
        self.width += width;
    }

    fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Close the line, dropping trailing whitespace.
    fn finish(mut self) -> WrappedLine {
        while let Some(last) = self.runs.last_mut() {
            let trimmed = last.text.trim_end().len();
            last.text.truncate(trimmed);
            if !last.text.is_empty() {
                break;
            }
            self.runs.pop();
        }
        let advance = self.runs.iter().map(|run| string_width(&run.text)).sum();
        WrappedLine {
            runs: self.runs,
            advance,
        }
    }
}

/// Wrap `runs` to `max_cols` cells per line, keeping at most `max_lines`.
///
/// `None` limits are unbounded. A zero column limit is treated as one column.
/// Returns no lines for text without any runs.
pub fn wrap_runs(runs: &[TextRun], max_cols: Option<usize>, max_lines: Option<usize>) -> WrapOutput {
    if runs.is_empty() {
        return WrapOutput::default();
    }

    let max_cols = max_cols.map(|cols| cols.max(1));
    let mut lines: Vec<WrappedLine> = Vec::new();
    let mut current = LineBuilder::default();

    for run in runs {
        for segment in run.text.split_word_bounds() {
            if segment == "\n" || segment == "\r\n" {
                lines.push(std::mem::take(&mut current).finish());
                continue;
            }

            let seg_width = string_width(segment);

            if let Some(max) = max_cols {
                if current.width + seg_width > max {
                    if current.width > 0 {
                        lines.push(std::mem::take(&mut current).finish());
                    }

                    if seg_width > max {
                        force_break(run.color, segment, max, &mut lines, &mut current);
                        continue;
                    }

                    // No leading whitespace on a wrapped line.
                    if is_whitespace(segment) {
                        continue;
                    }
                }
            }

            current.push(run.color, segment, seg_width);
        }
    }

    lines.push(current.finish());

    let mut truncated = false;
    if let Some(limit) = max_lines {
        if lines.len() > limit {
            lines.truncate(limit);
            truncated = true;
        }
    }

    WrapOutput { lines, truncated }
}

/// Break a segment wider than `max` cells at grapheme boundaries.
fn force_break(
    color: Argb,
    segment: &str,
    max: usize,
    lines: &mut Vec<WrappedLine>,
    current: &mut LineBuilder,
) {
    for grapheme in segment.graphemes(true) {
        let gw = grapheme_width(grapheme);
        if current.width + gw > max && !current.is_empty() {
            lines.push(std::mem::take(current).finish());
        }
        current.push(color, grapheme, gw);
    }
}

fn is_whitespace(s: &str) -> bool {
    s.chars().all(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(color: u32, text: &str) -> TextRun {
        TextRun {
            color: Argb(color),
            text: text.to_string(),
        }
    }

    fn texts(out: &WrapOutput) -> Vec<String> {
        out.lines.iter().map(WrappedLine::text).collect()
    }

    #[test]
    fn test_wrap_empty() {
        let out = wrap_runs(&[], Some(10), None);
        assert!(out.lines.is_empty());
        assert!(!out.truncated);
    }

    #[test]
    fn test_wrap_fits() {
        let out = wrap_runs(&[run(1, "hello world")], Some(20), None);
        assert_eq!(texts(&out), vec!["hello world"]);
        assert_eq!(out.lines[0].advance, 11);
    }

    #[test]
    fn test_wrap_unbounded() {
        let out = wrap_runs(&[run(1, "hello world")], None, None);
        assert_eq!(texts(&out), vec!["hello world"]);
    }

    #[test]
    fn test_wrap_words() {
        let out = wrap_runs(&[run(1, "one two three four")], Some(9), None);
        assert_eq!(texts(&out), vec!["one two", "three", "four"]);
    }

    #[test]
    fn test_wrap_long_word() {
        let out = wrap_runs(&[run(1, "abcdefghij")], Some(5), None);
        assert_eq!(texts(&out), vec!["abcde", "fghij"]);
    }

    #[test]
    fn test_wrap_hard_breaks() {
        let out = wrap_runs(&[run(1, "a\n\nb")], None, None);
        assert_eq!(texts(&out), vec!["a", "", "b"]);
    }

    #[test]
    fn test_wrap_keeps_colors_across_runs() {
        let out = wrap_runs(&[run(1, "Hello "), run(2, "World")], Some(8), None);
        assert_eq!(texts(&out), vec!["Hello", "World"]);
        assert_eq!(out.lines[0].runs, vec![run(1, "Hello")]);
        assert_eq!(out.lines[1].runs, vec![run(2, "World")]);
    }

    #[test]
    fn test_wrap_merges_same_color() {
        let out = wrap_runs(&[run(7, "ab"), run(7, "cd")], None, None);
        assert_eq!(out.lines[0].runs, vec![run(7, "abcd")]);
    }

    #[test]
    fn test_wrap_line_limit() {
        let out = wrap_runs(&[run(1, "one two three four")], Some(9), Some(2));
        assert_eq!(texts(&out), vec!["one two", "three"]);
        assert!(out.truncated);
    }

    #[test]
    fn test_wrap_zero_columns() {
        let out = wrap_runs(&[run(1, "abc")], Some(0), None);
        assert_eq!(texts(&out), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_wrap_cjk() {
        let out = wrap_runs(&[run(1, "你好世界")], Some(5), None);
        assert_eq!(texts(&out), vec!["你好", "世界"]);
    }
}
