//! Error types.

use thiserror::Error;

/// A declared style value that could not be interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid value {value:?} for style attribute `{attribute}`")]
pub struct StyleParseError {
    /// Declared name of the attribute, e.g. `fontWeight`.
    pub attribute: &'static str,
    /// The offending input.
    pub value: String,
}

impl StyleParseError {
    pub fn new(attribute: &'static str, value: impl Into<String>) -> Self {
        Self {
            attribute,
            value: value.into(),
        }
    }
}

/// Malformed encoded text handed to a metrics provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    #[error("expected run marker at byte {offset}, found {found:#04x}")]
    BadMarker { offset: usize, found: u8 },
    #[error("color header truncated at byte {offset}")]
    TruncatedHeader { offset: usize },
    #[error("run starting at byte {offset} is not valid UTF-8")]
    InvalidUtf8 { offset: usize },
}

/// Any error produced by this crate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error(transparent)]
    Style(#[from] StyleParseError),
    #[error(transparent)]
    Encoding(#[from] EncodingError),
    #[error("layout engine error: {0}")]
    Layout(String),
}

pub type Result<T> = std::result::Result<T, Error>;
