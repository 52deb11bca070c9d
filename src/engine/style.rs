//! Text-affecting style of a node and its setters.
//!
//! Every setter takes effect immediately: the surface is updated and the
//! relevant dirty flags are raised before the setter returns. There is no
//! batching; [`TextNode::apply_style`] is just the setters in a fixed order.

use std::str::FromStr;

use super::text_node::TextNode;
use crate::error::StyleParseError;
use crate::renderer::{SurfaceHAlign, SurfaceVAlign};
use crate::types::{Argb, HitSlop, HorizontalAlign, VerticalAlign};

/// Base of both glyph threshold formulas.
const THRESHOLD_BASE: f32 = 0.54;

/// Weight units per threshold unit.
const WEIGHT_SCALE: f32 = 10_000.0;

pub const DEFAULT_FONT_SIZE: f32 = 14.0;

/// Declared horizontal alignment → surface primitive, indexed by discriminant.
const H_ALIGN_TABLE: [SurfaceHAlign; 4] = [
    SurfaceHAlign::Left,   // Start
    SurfaceHAlign::Right,  // End
    SurfaceHAlign::Center, // Center
    SurfaceHAlign::Left,   // Justify
];

/// Declared vertical alignment → surface primitive, indexed by discriminant.
const V_ALIGN_TABLE: [SurfaceVAlign; 3] = [
    SurfaceVAlign::Top,    // Start
    SurfaceVAlign::Bottom, // End
    SurfaceVAlign::Center, // Center
];

pub fn surface_h_align(align: HorizontalAlign) -> SurfaceHAlign {
    H_ALIGN_TABLE[align as usize]
}

pub fn surface_v_align(align: VerticalAlign) -> SurfaceVAlign {
    V_ALIGN_TABLE[align as usize]
}

// =============================================================================
// Font weight
// =============================================================================

/// Numeric font weight.
///
/// Any integer is accepted; the threshold formulas extrapolate past the
/// usual 100..=900 range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FontWeight(pub i32);

impl FontWeight {
    pub const NORMAL: Self = Self(200);
    pub const BOLD: Self = Self(600);

    /// Parse a declared weight: `normal`, `bold`, or any finite number,
    /// rounded to the nearest integer.
    pub fn parse(input: &str) -> Result<Self, StyleParseError> {
        let token = input.trim();
        match token {
            "normal" => return Ok(Self::NORMAL),
            "bold" => return Ok(Self::BOLD),
            _ => {}
        }

        match token.parse::<f64>() {
            Ok(value) if value.is_finite() && value.abs() <= i32::MAX as f64 => {
                Ok(Self(value.round() as i32))
            }
            _ => Err(StyleParseError::new("fontWeight", input)),
        }
    }
}

impl Default for FontWeight {
    fn default() -> Self {
        Self::NORMAL
    }
}

impl FromStr for FontWeight {
    type Err = StyleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// =============================================================================
// Style state
// =============================================================================

/// Text-affecting style of one node.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    /// Own color; `None` inherits from the parent at aggregation time.
    pub color: Option<Argb>,
    pub font_size: f32,
    pub font_weight: FontWeight,
    /// Edge thinning from border/shadow radius.
    pub border_size: f32,
    pub h_align: HorizontalAlign,
    pub v_align: VerticalAlign,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            color: None,
            font_size: DEFAULT_FONT_SIZE,
            font_weight: FontWeight::NORMAL,
            border_size: 0.0,
            h_align: HorizontalAlign::Start,
            v_align: VerticalAlign::Start,
        }
    }
}

impl TextStyle {
    /// Alpha threshold at glyph edges: `0.54 - border - weight / 10000`.
    pub fn edge_alpha(&self) -> f32 {
        THRESHOLD_BASE - self.border_size - self.font_weight.0 as f32 / WEIGHT_SCALE
    }

    /// Color threshold at glyph centers: `0.54 - weight / 10000`.
    pub fn color_center(&self) -> f32 {
        THRESHOLD_BASE - self.font_weight.0 as f32 / WEIGHT_SCALE
    }

    /// Measurement snapping step. Always derived from the current size.
    pub fn snap_step(&self) -> f32 {
        self.font_size / 100.0
    }
}

/// A bulk style update in declared form.
///
/// Fields left `None` are untouched. `color: Some(None)` clears the own color
/// so the node inherits again. Weight and alignment are given as the declared
/// tokens so that parsing policy stays in one place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StylePatch {
    pub color: Option<Option<Argb>>,
    pub font_size: Option<f32>,
    pub font_weight: Option<String>,
    pub border_size: Option<f32>,
    pub text_align: Option<String>,
    pub vertical_align: Option<String>,
    pub number_of_lines: Option<u32>,
    pub is_on_layer: Option<bool>,
    pub hit_slop: Option<HitSlop>,
}

// =============================================================================
// Setters
// =============================================================================

impl TextNode {
    /// Set or clear the own text color.
    pub fn set_color(&mut self, color: Option<Argb>) {
        if self.style.color == color {
            return;
        }
        self.style.color = color;
        self.dirty.mark_content();
        self.surface.request_redraw();
    }

    /// Set the font size. Non-positive or non-finite sizes are ignored.
    pub fn set_font_size(&mut self, size: f32) {
        if !(size.is_finite() && size > 0.0) {
            log::warn!("ignoring invalid font size {size}");
            return;
        }
        self.style.font_size = size;
        self.surface.set_text_size(size);
        self.dirty.mark_constraint();
    }

    pub fn set_font_weight(&mut self, weight: FontWeight) {
        self.style.font_weight = weight;
        self.push_thresholds();
    }

    /// Set the weight from a declared token.
    ///
    /// Unknown tokens fail and leave the current weight in place.
    pub fn set_font_weight_str(&mut self, token: &str) -> Result<(), StyleParseError> {
        let weight = FontWeight::parse(token)?;
        self.set_font_weight(weight);
        Ok(())
    }

    /// Set the border/shadow thinning. Negative values clamp to zero.
    pub fn set_border_size(&mut self, size: f32) {
        self.style.border_size = if size.is_finite() { size.max(0.0) } else { 0.0 };
        self.push_thresholds();
    }

    pub fn set_horizontal_align(&mut self, align: HorizontalAlign) {
        self.style.h_align = align;
        self.surface.set_text_h_align(surface_h_align(align));
        self.dirty.mark_content();
    }

    /// Set horizontal alignment from a declared token; unknown tokens fall
    /// back to start alignment.
    pub fn set_horizontal_align_str(&mut self, token: &str) {
        let align = HorizontalAlign::from_token(token).unwrap_or_else(|| {
            log::warn!("unknown textAlign {token:?}, using start");
            HorizontalAlign::Start
        });
        self.set_horizontal_align(align);
    }

    pub fn set_vertical_align(&mut self, align: VerticalAlign) {
        self.style.v_align = align;
        self.surface.set_text_v_align(surface_v_align(align));
        self.dirty.mark_content();
    }

    /// Set vertical alignment from a declared token; unknown tokens fall back
    /// to start alignment.
    pub fn set_vertical_align_str(&mut self, token: &str) {
        let align = VerticalAlign::from_token(token).unwrap_or_else(|| {
            log::warn!("unknown verticalAlign {token:?}, using start");
            VerticalAlign::Start
        });
        self.set_vertical_align(align);
    }

    /// Apply a style patch.
    ///
    /// The weight is validated first; on error nothing is applied.
    pub fn apply_style(&mut self, patch: &StylePatch) -> Result<(), StyleParseError> {
        let weight = patch
            .font_weight
            .as_deref()
            .map(FontWeight::parse)
            .transpose()?;

        if let Some(size) = patch.font_size {
            self.set_font_size(size);
        }
        if let Some(border) = patch.border_size {
            self.style.border_size = if border.is_finite() { border.max(0.0) } else { 0.0 };
        }
        if let Some(weight) = weight {
            self.style.font_weight = weight;
        }
        if weight.is_some() || patch.border_size.is_some() {
            self.push_thresholds();
        }
        if let Some(color) = patch.color {
            self.set_color(color);
        }
        if let Some(token) = patch.text_align.as_deref() {
            self.set_horizontal_align_str(token);
        }
        if let Some(token) = patch.vertical_align.as_deref() {
            self.set_vertical_align_str(token);
        }
        if let Some(lines) = patch.number_of_lines {
            self.set_number_of_lines(lines);
        }
        if let Some(on_layer) = patch.is_on_layer {
            self.set_on_layer(on_layer);
        }
        if let Some(slop) = patch.hit_slop {
            self.set_hit_slop(slop);
        }
        Ok(())
    }

    fn push_thresholds(&mut self) {
        self.surface.set_text_alpha_center(self.style.edge_alpha());
        self.surface.set_text_color_center(self.style.color_center());
    }

    /// Push the full current style to the surface.
    pub(crate) fn sync_surface(&mut self) {
        self.surface.set_text_size(self.style.font_size);
        self.push_thresholds();
        self.surface.set_text_h_align(surface_h_align(self.style.h_align));
        self.surface.set_text_v_align(surface_v_align(self.style.v_align));
    }
}
