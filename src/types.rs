//! Core types for spark-text.
//!
//! Colors, alignment enums, box edges and hit slop. These flow from the style
//! setters on [`TextNode`](crate::engine::TextNode) through the encoder and the
//! metrics provider down to the rendering surface.

// =============================================================================
// Color
// =============================================================================

/// A 32-bit ARGB color: alpha in the top byte, then red, green, blue.
///
/// The channel layout matches the encoded text header, which extracts
/// red/green/blue/alpha with shifts of 16/8/0/24.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Argb(pub u32);

impl Argb {
    /// Create a color from individual channels.
    pub const fn new(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self(((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32))
    }

    /// Create an opaque RGB color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(255, r, g, b)
    }

    pub const WHITE: Self = Self(0xFFFF_FFFF);
    pub const BLACK: Self = Self(0xFF00_0000);
    pub const TRANSPARENT: Self = Self(0);

    #[inline]
    pub const fn red(self) -> u8 {
        ((self.0 >> 16) & 0xFF) as u8
    }

    #[inline]
    pub const fn green(self) -> u8 {
        ((self.0 >> 8) & 0xFF) as u8
    }

    #[inline]
    pub const fn blue(self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    #[inline]
    pub const fn alpha(self) -> u8 {
        ((self.0 >> 24) & 0xFF) as u8
    }

    /// Channels in header order: red, green, blue, alpha.
    #[inline]
    pub const fn to_rgba_bytes(self) -> [u8; 4] {
        [self.red(), self.green(), self.blue(), self.alpha()]
    }

    /// Inverse of [`Argb::to_rgba_bytes`].
    #[inline]
    pub const fn from_rgba_bytes(bytes: [u8; 4]) -> Self {
        Self::new(bytes[3], bytes[0], bytes[1], bytes[2])
    }

    /// Parse a color from a CSS-like hex string.
    ///
    /// Accepts `#RGB`, `#RRGGBB` and `#RRGGBBAA` (leading `#` optional) plus
    /// the keywords `white`, `black` and `transparent`.
    ///
    /// ```
    /// use spark_text::Argb;
    ///
    /// assert_eq!(Argb::parse("#ff0000"), Some(Argb::rgb(255, 0, 0)));
    /// assert_eq!(Argb::parse("#22334411"), Some(Argb(0x1122_3344)));
    /// assert!(Argb::parse("not-a-color").is_none());
    /// ```
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        match input.to_ascii_lowercase().as_str() {
            "white" => return Some(Self::WHITE),
            "black" => return Some(Self::BLACK),
            "transparent" => return Some(Self::TRANSPARENT),
            _ => {}
        }

        let hex = input.trim_start_matches('#');
        if !hex.bytes().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }

        fn hex_digit(c: u8) -> u8 {
            match c {
                b'0'..=b'9' => c - b'0',
                b'a'..=b'f' => c - b'a' + 10,
                _ => c - b'A' + 10,
            }
        }

        fn hex_byte(s: &[u8], i: usize) -> u8 {
            (hex_digit(s[i]) << 4) | hex_digit(s[i + 1])
        }

        let bytes = hex.as_bytes();
        match bytes.len() {
            3 => {
                let r = hex_digit(bytes[0]);
                let g = hex_digit(bytes[1]);
                let b = hex_digit(bytes[2]);
                Some(Self::rgb((r << 4) | r, (g << 4) | g, (b << 4) | b))
            }
            6 => Some(Self::rgb(
                hex_byte(bytes, 0),
                hex_byte(bytes, 2),
                hex_byte(bytes, 4),
            )),
            8 => Some(Self::new(
                hex_byte(bytes, 6),
                hex_byte(bytes, 0),
                hex_byte(bytes, 2),
                hex_byte(bytes, 4),
            )),
            _ => None,
        }
    }
}

impl From<u32> for Argb {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

// =============================================================================
// Alignment
// =============================================================================

/// Horizontal text alignment as declared on a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum HorizontalAlign {
    #[default]
    Start = 0,
    End = 1,
    Center = 2,
    /// Rendered as start alignment; the surface has no justification.
    Justify = 3,
}

impl HorizontalAlign {
    /// Look up a declared alignment token.
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim() {
            "start" | "left" | "auto" => Some(Self::Start),
            "end" | "right" => Some(Self::End),
            "center" => Some(Self::Center),
            "justify" => Some(Self::Justify),
            _ => None,
        }
    }
}

impl From<u8> for HorizontalAlign {
    fn from(value: u8) -> Self {
        match value {
            1 => Self::End,
            2 => Self::Center,
            3 => Self::Justify,
            _ => Self::Start,
        }
    }
}

/// Vertical text alignment as declared on a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum VerticalAlign {
    #[default]
    Start = 0,
    End = 1,
    Center = 2,
}

impl VerticalAlign {
    /// Look up a declared alignment token.
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim() {
            "start" | "top" | "auto" => Some(Self::Start),
            "end" | "bottom" => Some(Self::End),
            "center" | "middle" => Some(Self::Center),
            _ => None,
        }
    }
}

impl From<u8> for VerticalAlign {
    fn from(value: u8) -> Self {
        match value {
            1 => Self::End,
            2 => Self::Center,
            _ => Self::Start,
        }
    }
}

// =============================================================================
// Box edges
// =============================================================================

/// One side of a layout box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Left,
    Top,
    Right,
    Bottom,
}

/// Extra touch area around a node's box, per edge.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HitSlop {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl HitSlop {
    /// The same slop on every edge.
    pub const fn uniform(value: f32) -> Self {
        Self {
            left: value,
            top: value,
            right: value,
            bottom: value,
        }
    }
}
