//! Call-recording surface.

use std::cell::RefCell;
use std::rc::Rc;

use super::{RenderSurface, SurfaceFactory, SurfaceHAlign, SurfaceVAlign};
use crate::layout::WrappedText;

/// One recorded surface call.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCall {
    SetText(WrappedText),
    SetTextSize(f32),
    SetTextAlphaCenter(f32),
    SetTextColorCenter(f32),
    SetTextHAlign(SurfaceHAlign),
    SetTextVAlign(SurfaceVAlign),
    SetBorderWidth(f32),
    SetHitSlop(f32, f32, f32, f32),
    RequestRedraw,
}

/// Ordered call history of one surface.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurfaceLog {
    pub calls: Vec<SurfaceCall>,
}

impl SurfaceLog {
    /// Number of calls matching `pred`.
    pub fn count(&self, pred: impl Fn(&SurfaceCall) -> bool) -> usize {
        self.calls.iter().filter(|call| pred(call)).count()
    }

    /// Number of `set_text` calls.
    pub fn text_updates(&self) -> usize {
        self.count(|call| matches!(call, SurfaceCall::SetText(_)))
    }

    /// Most recent wrapped text pushed to the surface.
    pub fn last_text(&self) -> Option<&WrappedText> {
        self.calls.iter().rev().find_map(|call| match call {
            SurfaceCall::SetText(text) => Some(text),
            _ => None,
        })
    }

    /// Most recent call, if any.
    pub fn last(&self) -> Option<&SurfaceCall> {
        self.calls.last()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

pub type SharedLog = Rc<RefCell<SurfaceLog>>;

/// A surface that only records what it is told.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    log: SharedLog,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle to the call history, valid after the surface is boxed.
    pub fn log(&self) -> SharedLog {
        Rc::clone(&self.log)
    }

    fn record(&self, call: SurfaceCall) {
        self.log.borrow_mut().calls.push(call);
    }
}

impl RenderSurface for RecordingSurface {
    fn set_text(&mut self, text: WrappedText) {
        self.record(SurfaceCall::SetText(text));
    }

    fn set_text_size(&mut self, px: f32) {
        self.record(SurfaceCall::SetTextSize(px));
    }

    fn set_text_alpha_center(&mut self, value: f32) {
        self.record(SurfaceCall::SetTextAlphaCenter(value));
    }

    fn set_text_color_center(&mut self, value: f32) {
        self.record(SurfaceCall::SetTextColorCenter(value));
    }

    fn set_text_h_align(&mut self, align: SurfaceHAlign) {
        self.record(SurfaceCall::SetTextHAlign(align));
    }

    fn set_text_v_align(&mut self, align: SurfaceVAlign) {
        self.record(SurfaceCall::SetTextVAlign(align));
    }

    fn set_border_width(&mut self, px: f32) {
        self.record(SurfaceCall::SetBorderWidth(px));
    }

    fn set_hit_slop(&mut self, left: f32, top: f32, right: f32, bottom: f32) {
        self.record(SurfaceCall::SetHitSlop(left, top, right, bottom));
    }

    fn request_redraw(&mut self) {
        self.record(SurfaceCall::RequestRedraw);
    }
}

/// Factory that hands out [`RecordingSurface`]s and keeps their logs.
///
/// Logs are indexed in creation order, so the first node built from a context
/// owns `log(0)`.
#[derive(Debug, Default)]
pub struct RecordingFactory {
    logs: RefCell<Vec<SharedLog>>,
}

impl RecordingFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&self, index: usize) -> Option<SharedLog> {
        self.logs.borrow().get(index).cloned()
    }

    pub fn surface_count(&self) -> usize {
        self.logs.borrow().len()
    }
}

impl SurfaceFactory for RecordingFactory {
    fn create_surface(&self) -> Box<dyn RenderSurface> {
        let surface = RecordingSurface::new();
        self.logs.borrow_mut().push(surface.log());
        Box::new(surface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_in_order() {
        let mut surface = RecordingSurface::new();
        let log = surface.log();

        surface.set_text_size(16.0);
        surface.set_border_width(2.0);
        surface.request_redraw();

        let log = log.borrow();
        assert_eq!(
            log.calls,
            vec![
                SurfaceCall::SetTextSize(16.0),
                SurfaceCall::SetBorderWidth(2.0),
                SurfaceCall::RequestRedraw,
            ]
        );
        assert_eq!(log.text_updates(), 0);
        assert!(log.last_text().is_none());
    }

    #[test]
    fn test_factory_keeps_logs() {
        let factory = RecordingFactory::new();
        let mut first = factory.create_surface();
        let _second = factory.create_surface();
        assert_eq!(factory.surface_count(), 2);

        first.set_text(WrappedText::default());
        assert_eq!(factory.log(0).unwrap().borrow().text_updates(), 1);
        assert_eq!(factory.log(1).unwrap().borrow().text_updates(), 0);
        assert!(factory.log(2).is_none());
    }
}
