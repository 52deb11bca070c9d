//! Measurement - the callback the box layout engine calls during solving.
//!
//! A measure call may happen many times per pass with the same arguments, so
//! it must be deterministic: the only state it touches is the aggregation
//! cache, and results are snapped up to a grid of `font_size / 100` so small
//! float drift between passes cannot make the solver oscillate.

use super::types::{MeasureMode, MeasuredSize};
use crate::engine::TextNode;
use crate::layout::WrappedText;
use crate::types::Argb;

/// Tolerance, in steps, under which a value counts as already on the grid.
const SNAP_TOLERANCE: f32 = 1e-3;

/// Round `value` up to the next multiple of `step`.
///
/// The result is never below `value` and less than one `step` above it.
/// Values within a float hair of a grid line stay on that line. A step that is
/// not a positive finite number leaves the value unchanged.
pub fn snap_up(value: f32, step: f32) -> f32 {
    if !(step.is_finite() && step > 0.0) || !value.is_finite() {
        return value;
    }

    let steps = value / step;
    let nearest = steps.round();
    let multiple = if (steps - nearest).abs() <= SNAP_TOLERANCE {
        nearest
    } else {
        steps.ceil()
    };

    (multiple * step).max(value)
}

impl TextNode {
    /// Measure the node for the layout engine.
    ///
    /// - empty text: the exact bounds given, zero for the rest
    /// - both bounds exact: returned unchanged
    /// - otherwise the text is wrapped against the width bound (if any),
    ///   measured, and every non-exact dimension is replaced by the measured
    ///   one, capped by an `AtMost` bound
    pub fn measure(
        &mut self,
        width: Option<f32>,
        width_mode: MeasureMode,
        height: Option<f32>,
        height_mode: MeasureMode,
    ) -> MeasuredSize {
        let exact = |value: Option<f32>, mode: MeasureMode| match mode {
            MeasureMode::Exact => value.unwrap_or(0.0),
            _ => 0.0,
        };

        if width_mode == MeasureMode::Exact && height_mode == MeasureMode::Exact {
            return MeasuredSize::new(width.unwrap_or(0.0), height.unwrap_or(0.0));
        }

        let context = self.context.clone();
        let font_size = self.style.font_size;
        let max_lines = self.number_of_lines;
        let on_layer = self.on_layer;
        let color = self.style.color.unwrap_or(Argb::WHITE);

        let text = self.aggregate(color);
        if text.is_text_empty() {
            return MeasuredSize::new(exact(width, width_mode), exact(height, height_mode));
        }

        let wrap_width = match width_mode {
            MeasureMode::Undefined => None,
            _ => width,
        };

        let wrapped = context
            .metrics()
            .wrap_lines(context.font(), text, font_size, wrap_width, None, max_lines, on_layer)
            .unwrap_or_else(|err| {
                log::error!("measure: metrics provider rejected aggregated text: {err}");
                WrappedText::default()
            });
        let extent = context.metrics().measure_text(context.font(), &wrapped, font_size);

        let step = self.style.snap_step();
        let resolve = |given: Option<f32>, mode: MeasureMode, measured: f32| -> f32 {
            match (mode, given) {
                (MeasureMode::Exact, _) => snap_up(given.unwrap_or(0.0), step),
                (MeasureMode::AtMost, Some(bound)) => snap_up(measured, step).min(bound),
                _ => snap_up(measured, step),
            }
        };

        let size = MeasuredSize::new(
            resolve(width, width_mode, extent.max_width),
            resolve(height, height_mode, extent.max_height),
        );
        log::trace!(
            "measure({width:?} {width_mode:?}, {height:?} {height_mode:?}) -> {}x{}",
            size.width,
            size.height
        );
        size
    }
}
