//! TextNode - a node in the text composition tree.
//!
//! A text node owns its style, its own text, an ordered list of children and a
//! memoized aggregation of all of it. Children are either raw strings or
//! nested text nodes; neither takes part in box layout. Only the root of a
//! composition is registered with the layout engine.
//!
//! # Aggregation
//!
//! ```text
//! N (color unset)
//! ├── "Hello "
//! └── M (color 0x11223344)
//!     └── "World"
//!
//! N.aggregate(0xFFFFFFFF)
//!   = [1B FF FF FF FF] "Hello " [1B 22 33 44 11] "World"
//! ```
//!
//! Colors are pulled, never pushed: a child receives its parent's resolved
//! color as the argument to [`TextNode::aggregate`] and keeps no copy of it.

use super::context::TextContext;
use super::dirty::{DirtyFlags, DirtyTracker};
use super::encoding::EncodedText;
use super::style::TextStyle;
use crate::renderer::RenderSurface;
use crate::types::{Argb, HitSlop};

/// A child of a text node.
pub enum TextChild {
    /// Literal text, immutable once inserted.
    Raw(String),
    /// A nested span, aggregated recursively.
    Node(TextNode),
}

impl TextChild {
    pub fn as_node(&self) -> Option<&TextNode> {
        match self {
            Self::Node(node) => Some(node),
            Self::Raw(_) => None,
        }
    }

    pub fn as_raw(&self) -> Option<&str> {
        match self {
            Self::Raw(text) => Some(text.as_str()),
            Self::Node(_) => None,
        }
    }
}

impl From<&str> for TextChild {
    fn from(text: &str) -> Self {
        Self::Raw(text.to_string())
    }
}

impl From<String> for TextChild {
    fn from(text: String) -> Self {
        Self::Raw(text)
    }
}

impl From<TextNode> for TextChild {
    fn from(node: TextNode) -> Self {
        Self::Node(node)
    }
}

impl std::fmt::Debug for TextChild {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Raw(text) => f.debug_tuple("Raw").field(text).finish(),
            Self::Node(node) => f.debug_tuple("Node").field(node).finish(),
        }
    }
}

/// Memoized aggregation and the color it was resolved against.
#[derive(Debug, Clone)]
struct Aggregated {
    color: Argb,
    encoded: EncodedText,
}

/// A text-bearing node.
pub struct TextNode {
    pub(crate) style: TextStyle,
    pub(crate) dirty: DirtyTracker,
    pub(crate) surface: Box<dyn RenderSurface>,
    pub(crate) context: TextContext,

    text: String,
    children: Vec<TextChild>,
    cache: Option<Aggregated>,

    pub(crate) number_of_lines: u32,
    pub(crate) on_layer: bool,
    pub(crate) hit_slop: HitSlop,

    /// Box size at the last surface commit; `None` until the first one.
    pub(crate) committed_width: Option<f32>,
    pub(crate) committed_height: Option<f32>,
}

impl TextNode {
    /// Create an empty node with default style and its own surface.
    pub fn new(context: &TextContext) -> Self {
        let mut node = Self {
            style: TextStyle::default(),
            dirty: DirtyTracker::new(),
            surface: context.create_surface(),
            context: context.clone(),
            text: String::new(),
            children: Vec::new(),
            cache: None,
            number_of_lines: 0,
            on_layer: false,
            hit_slop: HitSlop::default(),
            committed_width: None,
            committed_height: None,
        };
        node.sync_surface();
        node
    }

    /// Create a node holding `text` as its own text.
    pub fn with_text(context: &TextContext, text: impl Into<String>) -> Self {
        let mut node = Self::new(context);
        node.text = text.into();
        node
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn style(&self) -> &TextStyle {
        &self.style
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn dirty_flags(&self) -> DirtyFlags {
        self.dirty.flags()
    }

    pub fn is_content_dirty(&self) -> bool {
        self.dirty.is_content_dirty()
    }

    pub fn is_presentation_dirty(&self) -> bool {
        self.dirty.is_presentation_dirty()
    }

    pub fn is_layout_dirty(&self) -> bool {
        self.dirty.is_layout_dirty()
    }

    pub fn number_of_lines(&self) -> u32 {
        self.number_of_lines
    }

    pub fn is_on_layer(&self) -> bool {
        self.on_layer
    }

    pub fn hit_slop(&self) -> HitSlop {
        self.hit_slop
    }

    /// Box size recorded at the last commit.
    pub fn committed_size(&self) -> Option<(f32, f32)> {
        self.committed_width.zip(self.committed_height)
    }

    /// The layout engine picked up this node's pending re-measure.
    pub(crate) fn clear_layout_dirty(&mut self) {
        self.dirty.layout_scheduled();
    }

    // =========================================================================
    // Content and props
    // =========================================================================

    /// Replace the node's own text, which precedes all children.
    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if self.text == text {
            return;
        }
        self.text = text;
        self.dirty.mark_constraint();
    }

    /// Maximum number of lines; 0 is unlimited.
    pub fn set_number_of_lines(&mut self, lines: u32) {
        self.number_of_lines = lines;
        self.dirty.mark_constraint();
    }

    pub fn set_on_layer(&mut self, on_layer: bool) {
        self.on_layer = on_layer;
        self.dirty.mark_constraint();
    }

    pub fn set_hit_slop(&mut self, slop: HitSlop) {
        self.hit_slop = slop;
        self.surface
            .set_hit_slop(slop.left, slop.top, slop.right, slop.bottom);
    }

    // =========================================================================
    // Children
    // =========================================================================

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    pub fn child(&self, index: usize) -> Option<&TextChild> {
        self.children.get(index)
    }

    pub fn children(&self) -> impl Iterator<Item = &TextChild> {
        self.children.iter()
    }

    /// Insert a child at `index`, clamped to the end of the list.
    pub fn insert_child(&mut self, index: usize, child: impl Into<TextChild>) {
        let index = index.min(self.children.len());
        self.children.insert(index, child.into());
        self.dirty.mark_constraint();
    }

    /// Append a child.
    pub fn push_child(&mut self, child: impl Into<TextChild>) {
        self.insert_child(self.children.len(), child);
    }

    /// Remove the child at `index`. Out-of-range indices change nothing.
    pub fn remove_child(&mut self, index: usize) -> Option<TextChild> {
        if index >= self.children.len() {
            return None;
        }
        let child = self.children.remove(index);
        self.dirty.mark_constraint();
        Some(child)
    }

    pub fn clear_children(&mut self) {
        if self.children.is_empty() {
            return;
        }
        self.children.clear();
        self.dirty.mark_constraint();
    }

    /// Mutable access to a nested node.
    ///
    /// Marks this node dirty up front: whatever the caller changes in the
    /// subtree invalidates this node's aggregation too.
    pub fn child_node_mut(&mut self, index: usize) -> Option<&mut TextNode> {
        match self.children.get_mut(index) {
            Some(TextChild::Node(node)) => {
                self.dirty.mark_constraint();
                Some(node)
            }
            _ => None,
        }
    }

    // =========================================================================
    // Aggregation
    // =========================================================================

    /// Color this node's own runs are drawn in.
    pub fn effective_color(&self, inherited: Argb) -> Argb {
        self.style.color.unwrap_or(inherited)
    }

    /// Aggregate this node and its subtree into one encoded stream.
    ///
    /// Returns the memoized stream unless content is dirty or the resolved
    /// color differs from the one it was built with. A rebuild always leaves
    /// presentation dirty, even when the bytes come out identical.
    pub fn aggregate(&mut self, inherited: Argb) -> &EncodedText {
        let color = self.effective_color(inherited);

        let aggregated = match self.cache.take() {
            Some(cached) if !self.dirty.is_content_dirty() && cached.color == color => {
                log::trace!("aggregate: cache hit ({} bytes)", cached.encoded.as_bytes().len());
                cached
            }
            _ => {
                let encoded = self.encode(color);
                self.dirty.content_rebuilt();
                log::debug!(
                    "aggregate: rebuilt {} text bytes in {:#010x}",
                    encoded.text_len(),
                    color.0
                );
                Aggregated { color, encoded }
            }
        };

        &self.cache.insert(aggregated).encoded
    }

    /// Build the stream: header, own text, then children in order.
    ///
    /// Raw text following a nested node gets a fresh header so that it is
    /// not drawn in the nested node's color.
    fn encode(&mut self, color: Argb) -> EncodedText {
        let mut out = EncodedText::with_header(color);
        out.push_str(&self.text);

        let mut after_node = false;
        for child in &mut self.children {
            match child {
                TextChild::Raw(text) => {
                    if text.is_empty() {
                        continue;
                    }
                    if after_node {
                        out.push_header(color);
                        after_node = false;
                    }
                    out.push_str(text);
                }
                TextChild::Node(node) => {
                    out.append(node.aggregate(color));
                    after_node = true;
                }
            }
        }

        out
    }
}

impl std::fmt::Debug for TextNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextNode")
            .field("style", &self.style)
            .field("text", &self.text)
            .field("children", &self.children)
            .field("dirty", &self.dirty.flags())
            .finish_non_exhaustive()
    }
}
