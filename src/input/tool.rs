//! Active tool configuration and shape construction.

use crate::draw::color::PINK;
use crate::draw::{Brush, Color, Point, Shape, ShapeKind};

/// The single active tool configuration of a drawing surface.
///
/// Read by shape construction at gesture time; written only by explicit
/// tool-selection operations (and by the post-stroke recolor when the
/// random-color flag is active).
#[derive(Debug, Clone, PartialEq)]
pub struct ToolState {
    /// Current paint source (solid color or named texture)
    pub brush: Brush,
    /// Current stroke width in pixels
    pub stroke_width: f64,
    /// Current shape kind
    pub kind: ShapeKind,
    /// Draw a fresh palette color after each completed gesture
    pub random_color: bool,
}

impl Default for ToolState {
    fn default() -> Self {
        Self {
            brush: Brush::Solid(PINK),
            stroke_width: 8.0,
            kind: ShapeKind::FreeStyle,
            random_color: false,
        }
    }
}

impl ToolState {
    /// Switches to a solid color brush.
    pub fn set_color(&mut self, color: Color) {
        self.brush = Brush::Solid(color);
    }

    /// Switches to a named texture brush.
    ///
    /// Callers validate the name against the paint cache first, so an
    /// unresolvable texture never becomes the active brush.
    pub fn set_texture(&mut self, name: impl Into<String>) {
        self.brush = Brush::Texture(name.into());
    }

    pub fn set_kind(&mut self, kind: ShapeKind) {
        self.kind = kind;
    }

    /// Updates the stroke width; non-positive requests are rejected.
    pub fn set_stroke_width(&mut self, px: f64) {
        if px <= 0.0 {
            log::warn!("Ignoring non-positive stroke width {px:.1}");
            return;
        }
        self.stroke_width = px;
    }

    pub fn enable_random_color(&mut self) {
        self.random_color = true;
    }

    /// Builds an immutable shape record from this tool state and a gesture
    /// sample span. Pure.
    pub fn build_shape(&self, start: Point, end: Point, links_to_previous: bool) -> Shape {
        Shape::new(
            start,
            end,
            self.brush.clone(),
            self.stroke_width,
            self.kind,
            links_to_previous,
        )
    }
}
