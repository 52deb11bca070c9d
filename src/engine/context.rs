//! Shared context handed to every text node at construction.

use std::rc::Rc;

use crate::layout::{Font, FontMetrics};
use crate::renderer::{RenderSurface, SurfaceFactory};

/// Font, metrics provider and surface factory shared by a tree of text nodes.
///
/// Cloning is cheap; all members are reference counted.
#[derive(Clone)]
pub struct TextContext {
    font: Rc<Font>,
    metrics: Rc<dyn FontMetrics>,
    surfaces: Rc<dyn SurfaceFactory>,
}

impl TextContext {
    pub fn new(metrics: Rc<dyn FontMetrics>, surfaces: Rc<dyn SurfaceFactory>) -> Self {
        Self {
            font: Rc::new(Font::default()),
            metrics,
            surfaces,
        }
    }

    /// Replace the font used for wrapping and measuring.
    pub fn with_font(mut self, font: Font) -> Self {
        self.font = Rc::new(font);
        self
    }

    pub fn font(&self) -> &Font {
        &self.font
    }

    pub fn metrics(&self) -> &dyn FontMetrics {
        self.metrics.as_ref()
    }

    pub(crate) fn create_surface(&self) -> Box<dyn RenderSurface> {
        self.surfaces.create_surface()
    }
}

impl std::fmt::Debug for TextContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextContext")
            .field("font", &self.font)
            .finish_non_exhaustive()
    }
}
