//! Taffy Bridge - text nodes as measured leaves in a Taffy tree.
//!
//! Taffy owns box geometry. Text nodes are registered as leaves carrying a
//! context index; during `compute_layout_with_measure` Taffy calls back into
//! [`TextNode::measure`] for them. After the pass every text node gets its
//! resolved [`taffy::Layout`] through [`TextNode::present_layout`].
//!
//! Nested text children never appear here: only composition roots are
//! registered.

use taffy::{AvailableSpace, NodeId, Size, Style, TaffyTree};

use super::types::{MeasureMode, MeasuredSize};
use crate::engine::TextNode;
use crate::error::{Error, Result};

// =============================================================================
// MEASURE ARGUMENT CONVERSION
// =============================================================================

/// Convert one axis of Taffy's measure input into a bound and a mode.
///
/// A known dimension is exact. A definite available space is an upper bound.
/// Min- and max-content have no bound; both measure the natural size.
fn to_measure_args(known: Option<f32>, available: AvailableSpace) -> (Option<f32>, MeasureMode) {
    match (known, available) {
        (Some(value), _) => (Some(value), MeasureMode::Exact),
        (None, AvailableSpace::Definite(value)) => (Some(value), MeasureMode::AtMost),
        (None, AvailableSpace::MinContent | AvailableSpace::MaxContent) => {
            (None, MeasureMode::Undefined)
        }
    }
}

fn measure_text_node(
    node: &mut TextNode,
    known_dimensions: Size<Option<f32>>,
    available_space: Size<AvailableSpace>,
) -> Size<f32> {
    let (width, width_mode) = to_measure_args(known_dimensions.width, available_space.width);
    let (height, height_mode) = to_measure_args(known_dimensions.height, available_space.height);
    let MeasuredSize { width, height } = node.measure(width, width_mode, height, height_mode);
    Size { width, height }
}

impl From<taffy::TaffyError> for Error {
    fn from(err: taffy::TaffyError) -> Self {
        Error::Layout(err.to_string())
    }
}

// =============================================================================
// LAYOUT TREE
// =============================================================================

struct TextSlot {
    node_id: NodeId,
    text: TextNode,
}

/// A Taffy tree whose measured leaves are text nodes.
///
/// Layout values are left unrounded so that the box a node is committed with
/// is exactly the snapped size it measured.
pub struct TextLayoutTree {
    tree: TaffyTree<usize>,
    texts: Vec<TextSlot>,
}

impl Default for TextLayoutTree {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutTree {
    pub fn new() -> Self {
        let mut tree = TaffyTree::new();
        tree.disable_rounding();
        Self {
            tree,
            texts: Vec::new(),
        }
    }

    /// Add a container box.
    pub fn new_container(&mut self, style: Style, children: &[NodeId]) -> Result<NodeId> {
        Ok(self.tree.new_with_children(style, children)?)
    }

    /// Add a text node as a measured leaf.
    pub fn new_text(&mut self, style: Style, text: TextNode) -> Result<NodeId> {
        let slot = self.texts.len();
        let node_id = self.tree.new_leaf_with_context(style, slot)?;
        self.texts.push(TextSlot { node_id, text });
        Ok(node_id)
    }

    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        Ok(self.tree.add_child(parent, child)?)
    }

    pub fn set_style(&mut self, node: NodeId, style: Style) -> Result<()> {
        Ok(self.tree.set_style(node, style)?)
    }

    pub fn text(&self, node: NodeId) -> Option<&TextNode> {
        let slot = *self.tree.get_node_context(node)?;
        self.texts.get(slot).map(|s| &s.text)
    }

    /// Mutable access to a registered text node.
    ///
    /// Changes that need a re-measure are picked up by the next
    /// [`compute`](Self::compute) through the node's layout dirty flag.
    pub fn text_mut(&mut self, node: NodeId) -> Option<&mut TextNode> {
        let slot = *self.tree.get_node_context(node)?;
        self.texts.get_mut(slot).map(|s| &mut s.text)
    }

    /// Resolved layout of any node from the last pass.
    pub fn layout(&self, node: NodeId) -> Result<&taffy::Layout> {
        Ok(self.tree.layout(node)?)
    }

    /// Run one layout pass from `root` and commit every text node.
    ///
    /// Returns the number of text nodes whose surface text was updated.
    pub fn compute(&mut self, root: NodeId, available: Size<AvailableSpace>) -> Result<usize> {
        for slot in &mut self.texts {
            if slot.text.is_layout_dirty() {
                self.tree.mark_dirty(slot.node_id)?;
                slot.text.clear_layout_dirty();
            }
        }

        let texts = &mut self.texts;
        self.tree.compute_layout_with_measure(
            root,
            available,
            |known_dimensions, available_space, _node_id, context, _style| match context {
                Some(&mut slot) => match texts.get_mut(slot) {
                    Some(s) => measure_text_node(&mut s.text, known_dimensions, available_space),
                    None => Size::ZERO,
                },
                None => Size::ZERO,
            },
        )?;

        let mut committed = 0;
        for slot in &mut self.texts {
            let layout = self.tree.layout(slot.node_id)?;
            if slot.text.present_layout(layout) {
                committed += 1;
            }
        }
        log::debug!("layout pass committed {committed} of {} text nodes", self.texts.len());
        Ok(committed)
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use taffy::prelude::*;

    use super::*;
    use crate::engine::TextContext;
    use crate::layout::CellMetrics;
    use crate::renderer::RecordingFactory;

    fn context() -> (TextContext, Rc<RecordingFactory>) {
        let factory = Rc::new(RecordingFactory::new());
        let ctx = TextContext::new(Rc::new(CellMetrics::default()), factory.clone());
        (ctx, factory)
    }

    fn text(ctx: &TextContext, content: &str) -> TextNode {
        let mut node = TextNode::with_text(ctx, content);
        node.set_font_size(16.0);
        node
    }

    #[test]
    fn test_measure_args() {
        assert_eq!(
            to_measure_args(Some(10.0), AvailableSpace::MaxContent),
            (Some(10.0), MeasureMode::Exact)
        );
        assert_eq!(
            to_measure_args(None, AvailableSpace::Definite(40.0)),
            (Some(40.0), MeasureMode::AtMost)
        );
        assert_eq!(
            to_measure_args(None, AvailableSpace::MinContent),
            (None, MeasureMode::Undefined)
        );
    }

    #[test]
    fn test_text_leaf_gets_natural_size() {
        let (ctx, factory) = context();
        let mut layout = TextLayoutTree::new();

        let label = layout.new_text(Style::default(), text(&ctx, "hello world")).unwrap();
        let root = layout
            .new_container(
                Style {
                    flex_direction: FlexDirection::Column,
                    align_items: Some(AlignItems::FlexStart),
                    size: Size {
                        width: length(400.0),
                        height: length(300.0),
                    },
                    ..Default::default()
                },
                &[label],
            )
            .unwrap();

        let committed = layout.compute(root, Size::MAX_CONTENT).unwrap();
        assert_eq!(committed, 1);

        let box_layout = layout.layout(label).unwrap();
        assert_eq!(box_layout.size.width, 88.0);
        assert_eq!(box_layout.size.height, 16.0);

        let log = factory.log(0).unwrap();
        assert_eq!(
            log.borrow().last_text().unwrap().line_texts(),
            vec!["hello world"]
        );
    }

    #[test]
    fn test_narrow_container_wraps() {
        let (ctx, factory) = context();
        let mut layout = TextLayoutTree::new();

        let label = layout.new_text(Style::default(), text(&ctx, "hello world")).unwrap();
        let root = layout
            .new_container(
                Style {
                    flex_direction: FlexDirection::Column,
                    align_items: Some(AlignItems::FlexStart),
                    size: Size {
                        width: length(64.0),
                        height: auto(),
                    },
                    ..Default::default()
                },
                &[label],
            )
            .unwrap();

        layout.compute(root, Size::MAX_CONTENT).unwrap();

        let box_layout = layout.layout(label).unwrap();
        assert_eq!(box_layout.size.width, 40.0);
        assert_eq!(box_layout.size.height, 32.0);
        assert_eq!(
            factory.log(0).unwrap().borrow().last_text().unwrap().line_texts(),
            vec!["hello", "world"]
        );
    }

    #[test]
    fn test_unchanged_pass_skips_commit() {
        let (ctx, factory) = context();
        let mut layout = TextLayoutTree::new();
        let label = layout.new_text(Style::default(), text(&ctx, "abc")).unwrap();
        let root = layout.new_container(Style::default(), &[label]).unwrap();

        assert_eq!(layout.compute(root, Size::MAX_CONTENT).unwrap(), 1);
        assert_eq!(layout.compute(root, Size::MAX_CONTENT).unwrap(), 0);
        assert_eq!(factory.log(0).unwrap().borrow().text_updates(), 1);
    }

    #[test]
    fn test_text_change_relayouts() {
        let (ctx, _) = context();
        let mut layout = TextLayoutTree::new();
        let label = layout.new_text(Style::default(), text(&ctx, "abc")).unwrap();
        let root = layout
            .new_container(
                Style {
                    align_items: Some(AlignItems::FlexStart),
                    ..Default::default()
                },
                &[label],
            )
            .unwrap();
        layout.compute(root, Size::MAX_CONTENT).unwrap();
        assert_eq!(layout.layout(label).unwrap().size.width, 24.0);

        layout.text_mut(label).unwrap().set_text("abcdef");
        assert_eq!(layout.compute(root, Size::MAX_CONTENT).unwrap(), 1);
        assert_eq!(layout.layout(label).unwrap().size.width, 48.0);
        assert_eq!(layout.text(label).unwrap().text(), "abcdef");
    }

    #[test]
    fn test_containers_have_no_text() {
        let mut layout = TextLayoutTree::new();
        let root = layout.new_container(Style::default(), &[]).unwrap();
        assert!(layout.text(root).is_none());
        assert!(layout.text_mut(root).is_none());
    }
}
