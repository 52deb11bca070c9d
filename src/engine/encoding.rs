//! Encoded text stream.
//!
//! Aggregated text travels to the metrics provider as a byte stream of colored
//! runs. Each run starts with a 5-byte header:
//!
//! ```text
//! [MARKER] [R] [G] [B] [A] text bytes ...
//! ```
//!
//! where R, G, B, A come from an ARGB color via shifts of 16, 8, 0 and 24.
//! The text that follows a header belongs to that color until the next marker.

use crate::error::EncodingError;
use crate::types::Argb;

/// First byte of every run header. Never appears in literal text.
pub const RUN_MARKER: u8 = 0x1B;

/// Marker plus four color channels.
pub const HEADER_LEN: usize = 5;

/// An aggregated, color-tagged text stream.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EncodedText {
    bytes: Vec<u8>,
    text_len: usize,
}

impl EncodedText {
    /// A stream opened with a header for `color`.
    pub fn with_header(color: Argb) -> Self {
        let mut encoded = Self::default();
        encoded.push_header(color);
        encoded
    }

    /// Start a new run in `color`.
    pub fn push_header(&mut self, color: Argb) {
        self.bytes.push(RUN_MARKER);
        self.bytes.extend_from_slice(&color.to_rgba_bytes());
    }

    /// Append literal text to the current run.
    ///
    /// Marker bytes inside `text` are dropped so the stream stays parseable.
    pub fn push_str(&mut self, text: &str) {
        if text.as_bytes().contains(&RUN_MARKER) {
            for c in text.chars().filter(|&c| c as u32 != RUN_MARKER as u32) {
                let mut buf = [0u8; 4];
                let s = c.encode_utf8(&mut buf);
                self.bytes.extend_from_slice(s.as_bytes());
                self.text_len += s.len();
            }
        } else {
            self.bytes.extend_from_slice(text.as_bytes());
            self.text_len += text.len();
        }
    }

    /// Append another stream, headers included.
    pub fn append(&mut self, other: &EncodedText) {
        self.bytes.extend_from_slice(&other.bytes);
        self.text_len += other.text_len;
    }

    /// Raw wire bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// True when the stream carries headers only.
    pub fn is_text_empty(&self) -> bool {
        self.text_len == 0
    }

    /// Number of literal text bytes, excluding headers.
    pub fn text_len(&self) -> usize {
        self.text_len
    }

    /// Literal text with all headers removed.
    pub fn plain_text(&self) -> String {
        match decode_runs(&self.bytes) {
            Ok(runs) => runs.into_iter().map(|run| run.text).collect(),
            Err(_) => String::new(),
        }
    }
}

/// A decoded span of same-colored text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRun {
    pub color: Argb,
    pub text: String,
}

/// Parse an encoded stream back into colored runs.
///
/// Runs with no text are skipped. An empty stream yields no runs.
pub fn decode_runs(bytes: &[u8]) -> Result<Vec<TextRun>, EncodingError> {
    let mut runs = Vec::new();
    let mut offset = 0;

    while offset < bytes.len() {
        if bytes[offset] != RUN_MARKER {
            return Err(EncodingError::BadMarker {
                offset,
                found: bytes[offset],
            });
        }
        if offset + HEADER_LEN > bytes.len() {
            return Err(EncodingError::TruncatedHeader { offset });
        }

        let channels = [
            bytes[offset + 1],
            bytes[offset + 2],
            bytes[offset + 3],
            bytes[offset + 4],
        ];
        let color = Argb::from_rgba_bytes(channels);

        let start = offset + HEADER_LEN;
        let end = bytes[start..]
            .iter()
            .position(|&b| b == RUN_MARKER)
            .map_or(bytes.len(), |pos| start + pos);

        let text = std::str::from_utf8(&bytes[start..end])
            .map_err(|_| EncodingError::InvalidUtf8 { offset: start })?;
        if !text.is_empty() {
            runs.push(TextRun {
                color,
                text: text.to_string(),
            });
        }

        offset = end;
    }

    Ok(runs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_layout() {
        let encoded = EncodedText::with_header(Argb(0x1122_3344));
        assert_eq!(encoded.as_bytes(), &[RUN_MARKER, 0x22, 0x33, 0x44, 0x11]);
        assert!(encoded.is_text_empty());
    }

    #[test]
    fn test_decode_runs() {
        let mut encoded = EncodedText::with_header(Argb::WHITE);
        encoded.push_str("Hello ");
        encoded.push_header(Argb(0x1122_3344));
        encoded.push_str("World");

        let runs = decode_runs(encoded.as_bytes()).unwrap();
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].color, Argb::WHITE);
        assert_eq!(runs[0].text, "Hello ");
        assert_eq!(runs[1].color, Argb(0x1122_3344));
        assert_eq!(runs[1].text, "World");
        assert_eq!(encoded.plain_text(), "Hello World");
        assert_eq!(encoded.text_len(), 11);
    }

    #[test]
    fn test_marker_stripped_from_text() {
        let mut encoded = EncodedText::with_header(Argb::BLACK);
        encoded.push_str("a\u{1b}b");
        assert_eq!(encoded.plain_text(), "ab");
        assert_eq!(encoded.text_len(), 2);
    }

    #[test]
    fn test_decode_errors() {
        assert_eq!(
            decode_runs(b"abc"),
            Err(EncodingError::BadMarker { offset: 0, found: b'a' })
        );
        assert_eq!(
            decode_runs(&[RUN_MARKER, 1, 2]),
            Err(EncodingError::TruncatedHeader { offset: 0 })
        );
        assert_eq!(
            decode_runs(&[RUN_MARKER, 0, 0, 0, 0, 0xFF]),
            Err(EncodingError::InvalidUtf8 { offset: 5 })
        );
        assert!(decode_runs(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_empty_runs_skipped() {
        let mut encoded = EncodedText::with_header(Argb::WHITE);
        encoded.push_header(Argb::BLACK);
        encoded.push_str("x");
        let runs = decode_runs(encoded.as_bytes()).unwrap();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].color, Argb::BLACK);
    }
}
