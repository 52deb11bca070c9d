//! # spark-text
//!
//! Hierarchical text composition and incremental measurement for flexbox
//! layout trees.
//!
//! ## Architecture
//!
//! A [`TextNode`] owns its text style, its own text and an ordered list of
//! children, each raw text or a nested node. The node aggregates itself and
//! its descendants into one encoded string of colored runs, caches it, and
//! only rebuilds when something that affects it changes.
//!
//! ```text
//! setters → dirty flags → measure() (many times) → layout resolves → present_layout() (once)
//! ```
//!
//! - [`TextNode::measure`] answers the layout engine's measure callback,
//!   wrapping against the width bound and snapping to a grid of
//!   `font_size / 100`
//! - [`TextNode::present_layout`] re-wraps against the final box and pushes
//!   the result to the node's [`RenderSurface`](renderer::RenderSurface),
//!   skipping the work when nothing changed
//! - [`TextLayoutTree`] drives both from a Taffy tree
//!
//! ## Example
//!
//! ```
//! use std::rc::Rc;
//! use spark_text::{Argb, CellMetrics, RecordingFactory, TextContext, TextNode};
//!
//! let ctx = TextContext::new(Rc::new(CellMetrics::default()), Rc::new(RecordingFactory::new()));
//!
//! let mut root = TextNode::with_text(&ctx, "Hello ");
//! root.set_color(Some(Argb::rgb(255, 0, 0)));
//! let mut world = TextNode::with_text(&ctx, "World");
//! world.set_color(Some(Argb::rgb(0, 0, 255)));
//! root.push_child(world);
//!
//! let encoded = root.aggregate(Argb::WHITE);
//! assert_eq!(encoded.plain_text(), "Hello World");
//! ```
//!
//! ## Modules
//!
//! - [`types`] - colors, alignment, edges, hit slop
//! - [`engine`] - text nodes, style state, dirty tracking, the encoded format
//! - [`layout`] - measurement, presentation, Taffy bridge, cell metrics
//! - [`renderer`] - rendering surfaces (recording, terminal)
//! - [`error`] - error types

pub mod engine;
pub mod error;
pub mod layout;
pub mod renderer;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use engine::{
    DirtyFlags, EncodedText, FontWeight, StylePatch, TextChild, TextContext, TextNode, TextRun,
    TextStyle,
};

pub use error::{EncodingError, Error, Result, StyleParseError};

pub use layout::{
    BoxGeometry, CellMetrics, Font, FontMetrics, MeasureMode, MeasuredSize, ResolvedBox,
    TextLayoutTree, WrappedLine, WrappedText,
};

pub use renderer::{
    RecordingFactory, RenderSurface, SurfaceFactory, TerminalFactory, TerminalSurface,
};
