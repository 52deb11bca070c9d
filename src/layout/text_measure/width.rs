//! Cell width of characters, grapheme clusters and strings.
//!
//! Uses Unicode East Asian Width for single characters and grapheme cluster
//! analysis for emoji sequences. Wide characters (CJK, most emoji) take two
//! cells, combining marks and control characters none.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthChar;

/// Cell width of a single codepoint.
#[inline]
pub fn char_width(c: char) -> usize {
    match c as u32 {
        // Misc symbols and dingbats
        0x2600..=0x27BF => 2,
        // Misc symbols and pictographs, emoticons, transport
        0x1F300..=0x1F6FF => 2,
        // Supplemental symbols and pictographs
        0x1F900..=0x1F9FF => 2,
        // Symbols and pictographs extended-A
        0x1FA70..=0x1FAFF => 2,
        _ => c.width().unwrap_or(0),
    }
}

/// Cell width of a grapheme cluster.
///
/// - single codepoint: [`char_width`]
/// - regional indicator pair (flag): 2
/// - emoji sequence (ZWJ, VS16, skin tone, keycap): 2
/// - base plus combining marks: width of the base
pub fn grapheme_width(grapheme: &str) -> usize {
    let mut chars = grapheme.chars();
    let Some(first) = chars.next() else {
        return 0;
    };

    if grapheme.len() == first.len_utf8() {
        return char_width(first);
    }

    if (0x1F1E6..=0x1F1FF).contains(&(first as u32)) {
        return 2;
    }

    for c in chars {
        match c as u32 {
            0x200D | 0xFE0F | 0x20E3 => return 2,
            0x1F3FB..=0x1F3FF => return 2,
            _ => {}
        }
    }

    first.width().unwrap_or(0)
}

/// Cell width of a string.
pub fn string_width(s: &str) -> usize {
    if s.is_ascii() {
        return s.bytes().filter(|&b| (0x20..0x7F).contains(&b)).count();
    }
    s.graphemes(true).map(grapheme_width).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_width() {
        assert_eq!(string_width("hello"), 5);
        assert_eq!(string_width(""), 0);
        assert_eq!(string_width("a\tb"), 2);
    }

    #[test]
    fn test_cjk_width() {
        assert_eq!(char_width('你'), 2);
        assert_eq!(string_width("你好"), 4);
        assert_eq!(string_width("hi你"), 4);
    }

    #[test]
    fn test_combining_marks_take_base_width() {
        assert_eq!(grapheme_width("e\u{301}"), 1);
        assert_eq!(string_width("cafe\u{301}"), 4);
    }

    #[test]
    fn test_emoji_sequences() {
        assert_eq!(grapheme_width("🚀"), 2);
        assert_eq!(grapheme_width("🇺🇸"), 2);
        assert_eq!(grapheme_width("👍🏽"), 2);
    }
}
