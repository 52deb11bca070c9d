//! Presentation - syncing the surface once the box is resolved.
//!
//! Runs once per layout pass after the engine has fixed the node's box. The
//! expensive part, re-wrapping against the final box, only happens when the
//! content or presentation is dirty or the box changed size since the last
//! commit.

use super::types::BoxGeometry;
use crate::engine::TextNode;
use crate::layout::WrappedText;
use crate::types::{Argb, Edge};

impl TextNode {
    /// Commit the resolved box to the surface.
    ///
    /// Returns `true` if the text was re-wrapped and pushed.
    pub fn present_layout(&mut self, geometry: &dyn BoxGeometry) -> bool {
        self.present_box();

        let border = geometry.border_width(Edge::Left);
        let border = if border.is_nan() { 0.0 } else { border };
        self.surface.set_border_width(border);

        let width = geometry.computed_width();
        let height = geometry.computed_height();

        let stale = self.dirty.is_content_dirty()
            || self.dirty.is_presentation_dirty()
            || self.committed_width != Some(width)
            || self.committed_height != Some(height);
        if !stale {
            log::trace!("present_layout: {width}x{height} unchanged, skipping");
            return false;
        }

        let context = self.context.clone();
        let font_size = self.style.font_size;
        let max_lines = self.number_of_lines;
        let on_layer = self.on_layer;
        let color = self.style.color.unwrap_or(Argb::WHITE);

        let text = self.aggregate(color);
        let wrapped = context
            .metrics()
            .wrap_lines(
                context.font(),
                text,
                font_size,
                Some(width),
                Some(height),
                max_lines,
                on_layer,
            )
            .unwrap_or_else(|err| {
                log::error!("present_layout: metrics provider rejected aggregated text: {err}");
                WrappedText::default()
            });

        log::debug!(
            "present_layout: {} lines into {width}x{height}",
            wrapped.line_count()
        );
        self.surface.set_text(wrapped);
        self.dirty.presented();
        self.committed_width = Some(width);
        self.committed_height = Some(height);
        true
    }

    /// Generic box-model properties every node pushes on commit.
    fn present_box(&mut self) {
        let slop = self.hit_slop;
        self.surface
            .set_hit_slop(slop.left, slop.top, slop.right, slop.bottom);
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::engine::TextContext;
    use crate::layout::{CellMetrics, ResolvedBox};
    use crate::renderer::{RecordingFactory, SharedLog, SurfaceCall};

    fn node(text: &str) -> (TextNode, SharedLog) {
        let factory = Rc::new(RecordingFactory::new());
        let ctx = TextContext::new(Rc::new(CellMetrics::default()), factory.clone());
        let mut node = TextNode::with_text(&ctx, text);
        node.set_font_size(16.0);
        let log = factory.log(0).unwrap();
        (node, log)
    }

    #[test]
    fn test_second_identical_commit_is_noop() {
        let (mut n, log) = node("hello world");
        let geometry = ResolvedBox::new(64.0, 32.0);

        assert!(n.present_layout(&geometry));
        assert!(!n.present_layout(&geometry));
        assert_eq!(log.borrow().text_updates(), 1);
        assert!(!n.is_presentation_dirty());
        assert_eq!(n.committed_size(), Some((64.0, 32.0)));
    }

    #[test]
    fn test_wraps_to_committed_box() {
        let (mut n, log) = node("hello world");
        n.present_layout(&ResolvedBox::new(64.0, 32.0));
        let log = log.borrow();
        assert_eq!(log.last_text().unwrap().line_texts(), vec!["hello", "world"]);
    }

    #[test]
    fn test_resize_recommits() {
        let (mut n, log) = node("hello world");
        n.present_layout(&ResolvedBox::new(64.0, 32.0));
        n.present_layout(&ResolvedBox::new(96.0, 16.0));
        let log = log.borrow();
        assert_eq!(log.text_updates(), 2);
        assert_eq!(log.last_text().unwrap().line_texts(), vec!["hello world"]);
    }

    #[test]
    fn test_content_change_recommits() {
        let (mut n, log) = node("hello");
        let geometry = ResolvedBox::new(80.0, 16.0);
        n.present_layout(&geometry);
        n.set_text("bye");
        n.present_layout(&geometry);
        let log = log.borrow();
        assert_eq!(log.text_updates(), 2);
        assert_eq!(log.last_text().unwrap().line_texts(), vec!["bye"]);
    }

    #[test]
    fn test_color_change_recommits_same_size() {
        let (mut n, log) = node("hello");
        let geometry = ResolvedBox::new(80.0, 16.0);
        n.present_layout(&geometry);
        n.set_color(Some(Argb(0xFF00_FF00)));
        assert!(n.present_layout(&geometry));
        let log = log.borrow();
        let line = &log.last_text().unwrap().lines[0];
        assert_eq!(line.runs[0].color, Argb(0xFF00_FF00));
    }

    #[test]
    fn test_nan_border_is_zero() {
        let (mut n, log) = node("x");
        n.present_layout(&ResolvedBox::new(80.0, 16.0).with_border_left(f32::NAN));
        assert!(log
            .borrow()
            .calls
            .contains(&SurfaceCall::SetBorderWidth(0.0)));

        n.present_layout(&ResolvedBox::new(80.0, 16.0).with_border_left(3.0));
        assert!(log
            .borrow()
            .calls
            .contains(&SurfaceCall::SetBorderWidth(3.0)));
    }

    #[test]
    fn test_base_step_pushes_hit_slop() {
        let (mut n, log) = node("x");
        n.set_hit_slop(crate::types::HitSlop::uniform(4.0));
        log.borrow_mut().clear();
        n.present_layout(&ResolvedBox::new(80.0, 16.0));
        assert_eq!(
            log.borrow().calls.first(),
            Some(&SurfaceCall::SetHitSlop(4.0, 4.0, 4.0, 4.0))
        );
    }

    #[test]
    fn test_height_clips_unless_on_layer() {
        let (mut n, log) = node("a\nb\nc");
        n.present_layout(&ResolvedBox::new(80.0, 32.0));
        assert_eq!(log.borrow().last_text().unwrap().line_count(), 2);

        n.set_on_layer(true);
        n.present_layout(&ResolvedBox::new(80.0, 32.0));
        assert_eq!(log.borrow().last_text().unwrap().line_count(), 3);
    }
}
