//! Layout boundary types.
//!
//! What the box layout engine hands in when it asks a text node to measure
//! itself, and what it exposes once the node's box is resolved.

use crate::types::Edge;

/// How a measure bound is to be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasureMode {
    /// The dimension is fixed at the given value.
    Exact,
    /// No bound; the text takes its natural size.
    Undefined,
    /// The given value is an upper limit.
    AtMost,
}

/// Result of a measure call.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MeasuredSize {
    pub width: f32,
    pub height: f32,
}

impl MeasuredSize {
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Resolved geometry of a node's box after a layout pass.
pub trait BoxGeometry {
    fn computed_width(&self) -> f32;
    fn computed_height(&self) -> f32;
    /// Border width on one edge. May be NaN if the engine has none.
    fn border_width(&self, edge: Edge) -> f32;
}

/// Fixed geometry, for hosts that resolve boxes themselves.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ResolvedBox {
    pub width: f32,
    pub height: f32,
    pub border_left: f32,
    pub border_top: f32,
    pub border_right: f32,
    pub border_bottom: f32,
}

impl ResolvedBox {
    pub const fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            border_left: 0.0,
            border_top: 0.0,
            border_right: 0.0,
            border_bottom: 0.0,
        }
    }

    /// Same box with a left border.
    pub const fn with_border_left(mut self, border: f32) -> Self {
        self.border_left = border;
        self
    }
}

impl BoxGeometry for ResolvedBox {
    fn computed_width(&self) -> f32 {
        self.width
    }

    fn computed_height(&self) -> f32 {
        self.height
    }

    fn border_width(&self, edge: Edge) -> f32 {
        match edge {
            Edge::Left => self.border_left,
            Edge::Top => self.border_top,
            Edge::Right => self.border_right,
            Edge::Bottom => self.border_bottom,
        }
    }
}

impl BoxGeometry for taffy::Layout {
    fn computed_width(&self) -> f32 {
        self.size.width
    }

    fn computed_height(&self) -> f32 {
        self.size.height
    }

    fn border_width(&self, edge: Edge) -> f32 {
        match edge {
            Edge::Left => self.border.left,
            Edge::Top => self.border.top,
            Edge::Right => self.border.right,
            Edge::Bottom => self.border.bottom,
        }
    }
}
