//! Rendering surfaces.
//!
//! A [`RenderSurface`] is the sink a [`TextNode`](crate::engine::TextNode)
//! pushes its visual state into: wrapped text, size, glyph thresholds,
//! alignment, border inset and hit slop. The surface does the actual glyph
//! layout and painting.
//!
//! Two implementations ship with the crate:
//! - [`RecordingSurface`]: records every call; used by tests and headless hosts
//! - [`TerminalSurface`]: paints wrapped, colored lines with crossterm

mod recording;
mod terminal;

pub use recording::{RecordingFactory, RecordingSurface, SharedLog, SurfaceCall, SurfaceLog};
pub use terminal::{SharedTerminalText, TerminalFactory, TerminalSurface, TerminalText};

use crate::layout::WrappedText;

/// Horizontal alignment primitive understood by surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SurfaceHAlign {
    #[default]
    Left,
    Right,
    Center,
}

/// Vertical alignment primitive understood by surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SurfaceVAlign {
    #[default]
    Top,
    Bottom,
    Center,
}

/// The visual sink of a text node.
pub trait RenderSurface {
    fn set_text(&mut self, text: WrappedText);
    fn set_text_size(&mut self, px: f32);
    /// Alpha threshold at glyph edges.
    fn set_text_alpha_center(&mut self, value: f32);
    /// Color threshold at glyph centers.
    fn set_text_color_center(&mut self, value: f32);
    fn set_text_h_align(&mut self, align: SurfaceHAlign);
    fn set_text_v_align(&mut self, align: SurfaceVAlign);
    fn set_border_width(&mut self, px: f32);
    fn set_hit_slop(&mut self, left: f32, top: f32, right: f32, bottom: f32);
    /// Schedule a repaint without any layout change.
    fn request_redraw(&mut self);
}

/// Creates one surface per text node.
pub trait SurfaceFactory {
    fn create_surface(&self) -> Box<dyn RenderSurface>;
}

impl<F> SurfaceFactory for F
where
    F: Fn() -> Box<dyn RenderSurface>,
{
    fn create_surface(&self) -> Box<dyn RenderSurface> {
        self()
    }
}
