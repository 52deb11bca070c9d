//! Terminal surface - paints wrapped, colored text into a cell region.
//!
//! The surface only stores what the text node pushes. Painting is a separate
//! step the host runs for a region it owns: lines are placed by the vertical
//! and horizontal alignment, inset by the border, clipped to the region and
//! written as crossterm commands.

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use unicode_segmentation::UnicodeSegmentation;

use super::{RenderSurface, SurfaceFactory, SurfaceHAlign, SurfaceVAlign};
use crate::engine::DEFAULT_FONT_SIZE;
use crate::layout::{grapheme_width, CellMetrics, WrappedText};
use crate::types::Argb;

/// Everything a [`TerminalSurface`] was told.
#[derive(Debug, Clone, PartialEq)]
pub struct TerminalText {
    pub text: WrappedText,
    pub text_size: f32,
    pub alpha_center: f32,
    pub color_center: f32,
    pub h_align: SurfaceHAlign,
    pub v_align: SurfaceVAlign,
    pub border_width: f32,
    pub hit_slop: [f32; 4],
    /// Set by any change, cleared by [`paint`](Self::paint).
    pub needs_redraw: bool,
    cells: CellMetrics,
}

pub type SharedTerminalText = Rc<RefCell<TerminalText>>;

fn to_color(color: Argb) -> Color {
    Color::Rgb {
        r: color.red(),
        g: color.green(),
        b: color.blue(),
    }
}

/// Offset of a span of `used` cells inside `available` cells.
fn align_offset(available: u16, used: u16, align: SurfaceHAlign) -> u16 {
    let free = available.saturating_sub(used);
    match align {
        SurfaceHAlign::Left => 0,
        SurfaceHAlign::Right => free,
        SurfaceHAlign::Center => free / 2,
    }
}

impl TerminalText {
    fn new(cells: CellMetrics) -> Self {
        Self {
            text: WrappedText::default(),
            text_size: DEFAULT_FONT_SIZE,
            alpha_center: 0.0,
            color_center: 0.0,
            h_align: SurfaceHAlign::Left,
            v_align: SurfaceVAlign::Top,
            border_width: 0.0,
            hit_slop: [0.0; 4],
            needs_redraw: true,
            cells,
        }
    }

    /// Border inset in whole cells, as (columns, rows).
    fn inset(&self) -> (u16, u16) {
        let to_cells = |unit: f32| {
            if unit > 0.0 && self.border_width > 0.0 {
                (self.border_width / unit).round() as u16
            } else {
                0
            }
        };
        (
            to_cells(self.cells.cell_width(self.text_size)),
            to_cells(self.cells.line_px(self.text_size)),
        )
    }

    /// Paint into the `cols` x `rows` region whose top-left cell is `origin`.
    pub fn paint<W: Write>(
        &mut self,
        out: &mut W,
        origin: (u16, u16),
        cols: u16,
        rows: u16,
    ) -> io::Result<()> {
        let (inset_x, inset_y) = self.inset();
        let inner_cols = cols.saturating_sub(inset_x.saturating_mul(2));
        let inner_rows = rows.saturating_sub(inset_y.saturating_mul(2));

        let visible = self.text.lines.len().min(inner_rows as usize) as u16;
        let free_rows = inner_rows - visible;
        let top = match self.v_align {
            SurfaceVAlign::Top => 0,
            SurfaceVAlign::Bottom => free_rows,
            SurfaceVAlign::Center => free_rows / 2,
        };

        for (row, line) in self.text.lines.iter().take(visible as usize).enumerate() {
            let used = line.advance.min(inner_cols as usize) as u16;
            let x = origin.0 + inset_x + align_offset(inner_cols, used, self.h_align);
            let y = origin.1 + inset_y + top + row as u16;
            queue!(out, MoveTo(x, y))?;

            let mut remaining = used as usize;
            'runs: for run in &line.runs {
                queue!(out, SetForegroundColor(to_color(run.color)))?;
                let mut clipped = String::with_capacity(run.text.len());
                for grapheme in run.text.graphemes(true) {
                    let width = grapheme_width(grapheme);
                    if width > remaining {
                        queue!(out, Print(clipped))?;
                        break 'runs;
                    }
                    remaining -= width;
                    clipped.push_str(grapheme);
                }
                queue!(out, Print(clipped))?;
            }
            queue!(out, ResetColor)?;
        }

        self.needs_redraw = false;
        Ok(())
    }
}

/// A [`RenderSurface`] backed by shared [`TerminalText`] state.
#[derive(Debug, Clone)]
pub struct TerminalSurface {
    state: SharedTerminalText,
}

impl TerminalSurface {
    pub fn new(cells: CellMetrics) -> Self {
        Self {
            state: Rc::new(RefCell::new(TerminalText::new(cells))),
        }
    }

    /// Handle the host paints from.
    pub fn state(&self) -> SharedTerminalText {
        Rc::clone(&self.state)
    }

    fn update(&self, apply: impl FnOnce(&mut TerminalText)) {
        let mut state = self.state.borrow_mut();
        apply(&mut state);
        state.needs_redraw = true;
    }
}

impl RenderSurface for TerminalSurface {
    fn set_text(&mut self, text: WrappedText) {
        self.update(|s| s.text = text);
    }

    fn set_text_size(&mut self, px: f32) {
        self.update(|s| s.text_size = px);
    }

    fn set_text_alpha_center(&mut self, value: f32) {
        self.update(|s| s.alpha_center = value);
    }

    fn set_text_color_center(&mut self, value: f32) {
        self.update(|s| s.color_center = value);
    }

    fn set_text_h_align(&mut self, align: SurfaceHAlign) {
        self.update(|s| s.h_align = align);
    }

    fn set_text_v_align(&mut self, align: SurfaceVAlign) {
        self.update(|s| s.v_align = align);
    }

    fn set_border_width(&mut self, px: f32) {
        if self.state.borrow().border_width != px {
            self.update(|s| s.border_width = px);
        }
    }

    fn set_hit_slop(&mut self, left: f32, top: f32, right: f32, bottom: f32) {
        self.state.borrow_mut().hit_slop = [left, top, right, bottom];
    }

    fn request_redraw(&mut self) {
        self.state.borrow_mut().needs_redraw = true;
    }
}

/// Factory for [`TerminalSurface`]s sharing one cell grid.
///
/// Keeps a handle to every surface it created, in creation order.
#[derive(Debug, Default)]
pub struct TerminalFactory {
    cells: CellMetrics,
    surfaces: RefCell<Vec<SharedTerminalText>>,
}

impl TerminalFactory {
    pub fn new(cells: CellMetrics) -> Self {
        Self {
            cells,
            surfaces: RefCell::new(Vec::new()),
        }
    }

    pub fn surface(&self, index: usize) -> Option<SharedTerminalText> {
        self.surfaces.borrow().get(index).cloned()
    }

    /// Surfaces with a pending repaint.
    pub fn dirty_surfaces(&self) -> Vec<SharedTerminalText> {
        self.surfaces
            .borrow()
            .iter()
            .filter(|s| s.borrow().needs_redraw)
            .cloned()
            .collect()
    }
}

impl SurfaceFactory for TerminalFactory {
    fn create_surface(&self) -> Box<dyn RenderSurface> {
        let surface = TerminalSurface::new(self.cells);
        self.surfaces.borrow_mut().push(surface.state());
        Box::new(surface)
    }
}
