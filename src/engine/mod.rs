//! Text engine - composition tree, style state and dirty tracking.
//!
//! - [`TextNode`]: a node owning style, text, children and its aggregation
//! - [`TextStyle`]: text-affecting style and glyph threshold math
//! - [`DirtyTracker`]: content / presentation / layout dirty flags
//! - [`encoding`]: the colored-run wire format handed to metrics providers
//! - [`TextContext`]: font, metrics and surface factory shared by a tree
//!
//! # Architecture
//!
//! ```text
//! setters ──▶ DirtyTracker ──▶ aggregate() ──▶ EncodedText
//!                                   │
//!               measure() ◀─────────┤
//!          present_layout() ◀───────┘──▶ RenderSurface
//! ```

mod context;
mod dirty;
pub mod encoding;
mod style;
mod text_node;

pub use context::TextContext;
pub use dirty::{DirtyFlags, DirtyTracker};
pub use encoding::{decode_runs, EncodedText, TextRun, HEADER_LEN, RUN_MARKER};
pub use style::{
    surface_h_align, surface_v_align, FontWeight, StylePatch, TextStyle, DEFAULT_FONT_SIZE,
};
pub use text_node::{TextChild, TextNode};
