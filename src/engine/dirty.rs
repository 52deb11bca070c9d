//! Dirty tracking for text nodes.
//!
//! Three independent flags:
//! - `CONTENT`: the aggregated string is stale and must be rebuilt
//! - `PRESENTATION`: the surface shows stale wrapped text
//! - `LAYOUT`: the box layout engine must re-measure this node
//!
//! Content changes always imply presentation changes, so the setters only
//! expose the combined marks.

bitflags::bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct DirtyFlags: u8 {
        const CONTENT = 1 << 0;
        const PRESENTATION = 1 << 1;
        const LAYOUT = 1 << 2;
    }
}

/// Dirty state of a single node.
///
/// A new tracker starts fully dirty: nothing has been aggregated, presented or
/// measured yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirtyTracker {
    flags: DirtyFlags,
}

impl Default for DirtyTracker {
    fn default() -> Self {
        Self {
            flags: DirtyFlags::all(),
        }
    }
}

impl DirtyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn flags(&self) -> DirtyFlags {
        self.flags
    }

    #[inline]
    pub fn is_content_dirty(&self) -> bool {
        self.flags.contains(DirtyFlags::CONTENT)
    }

    #[inline]
    pub fn is_presentation_dirty(&self) -> bool {
        self.flags.contains(DirtyFlags::PRESENTATION)
    }

    #[inline]
    pub fn is_layout_dirty(&self) -> bool {
        self.flags.contains(DirtyFlags::LAYOUT)
    }

    /// Content changed: aggregation and presentation are both stale.
    pub fn mark_content(&mut self) {
        self.flags |= DirtyFlags::CONTENT | DirtyFlags::PRESENTATION;
    }

    /// A constraining parameter changed: content, presentation and the
    /// measured box are all stale.
    pub fn mark_constraint(&mut self) {
        self.flags |= DirtyFlags::CONTENT | DirtyFlags::PRESENTATION | DirtyFlags::LAYOUT;
    }

    /// Aggregation finished: fresh content always needs a fresh wrap.
    pub fn content_rebuilt(&mut self) {
        self.flags.remove(DirtyFlags::CONTENT);
        self.flags.insert(DirtyFlags::PRESENTATION);
    }

    /// Wrapped text was pushed to the surface.
    pub fn presented(&mut self) {
        self.flags.remove(DirtyFlags::PRESENTATION);
    }

    /// The layout engine picked up the pending re-measure.
    pub fn layout_scheduled(&mut self) {
        self.flags.remove(DirtyFlags::LAYOUT);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_dirty() {
        let tracker = DirtyTracker::new();
        assert!(tracker.is_content_dirty());
        assert!(tracker.is_presentation_dirty());
        assert!(tracker.is_layout_dirty());
    }

    #[test]
    fn test_content_marks_presentation() {
        let mut tracker = DirtyTracker::new();
        tracker.content_rebuilt();
        tracker.presented();
        tracker.layout_scheduled();
        assert!(tracker.flags().is_empty());

        tracker.mark_content();
        assert_eq!(tracker.flags(), DirtyFlags::CONTENT | DirtyFlags::PRESENTATION);
    }

    #[test]
    fn test_rebuild_sets_presentation() {
        let mut tracker = DirtyTracker::new();
        tracker.presented();
        tracker.content_rebuilt();
        assert!(!tracker.is_content_dirty());
        assert!(tracker.is_presentation_dirty());
    }

    #[test]
    fn test_constraint_marks_all() {
        let mut tracker = DirtyTracker::new();
        tracker.content_rebuilt();
        tracker.presented();
        tracker.layout_scheduled();
        tracker.mark_constraint();
        assert_eq!(tracker.flags(), DirtyFlags::all());
    }
}
