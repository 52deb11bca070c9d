//! Layout Module - measuring text for a box layout engine and committing it.
//!
//! # Architecture
//!
//! A box layout engine (Taffy, via [`TextLayoutTree`]) owns geometry. Text
//! nodes plug into it at two points:
//!
//! 1. [`TextNode::measure`](crate::engine::TextNode::measure) is the measure
//!    callback, called any number of times while the engine solves
//! 2. [`TextNode::present_layout`](crate::engine::TextNode::present_layout)
//!    runs once per pass with the resolved box and pushes wrapped text to the
//!    node's surface
//!
//! Both go through a [`FontMetrics`] provider. [`CellMetrics`] is the built-in
//! one: a monospace cell grid using Unicode display widths.

mod measure;
mod metrics;
mod present;
mod taffy_bridge;
mod text_measure;
mod types;

pub use measure::snap_up;
pub use metrics::{Font, FontMetrics, TextExtent, WrappedLine, WrappedText};
pub use taffy_bridge::TextLayoutTree;
pub use text_measure::*;
pub use types::{BoxGeometry, MeasureMode, MeasuredSize, ResolvedBox};
