//! Shape records committed to the drawing history.

use super::color::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A 2D pointer sample in surface coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The active paint source of a shape: a solid color or a named texture.
///
/// Exactly one variant is active per shape; the enum replaces the
/// empty-string/no-color sentinel pair of ad-hoc color+texture fields.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Brush {
    /// Solid fill color
    Solid(Color),
    /// Tiled texture, looked up by asset name
    Texture(String),
}

impl Brush {
    /// Returns the texture name when this brush is textured.
    pub fn texture_name(&self) -> Option<&str> {
        match self {
            Brush::Texture(name) => Some(name),
            Brush::Solid(_) => None,
        }
    }
}

/// The closed set of drawable shape kinds.
///
/// Kinds are dispatched by a tagged match in the renderer; there is no open
/// extension point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShapeKind {
    /// Freehand drawing - a chain of committed micro-segments
    FreeStyle,
    /// Ellipse inscribed in the gesture's bounding box
    Circle,
    /// Straight segment between start and end
    Line,
    /// Filled bounding box
    Rectangle,
}

impl FromStr for ShapeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "freestyle" => Ok(ShapeKind::FreeStyle),
            "circle" => Ok(ShapeKind::Circle),
            "line" => Ok(ShapeKind::Line),
            "rectangle" => Ok(ShapeKind::Rectangle),
            other => Err(format!("unknown shape kind '{other}'")),
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShapeKind::FreeStyle => "freestyle",
            ShapeKind::Circle => "circle",
            ShapeKind::Line => "line",
            ShapeKind::Rectangle => "rectangle",
        };
        f.write_str(name)
    }
}

/// One committed (or previewed) drawing primitive.
///
/// A shape is an immutable value once committed to the history: the gesture
/// endpoints, the paint source, the stroke width, and the kind fully
/// determine its pixels. `links_to_previous` is true only for freestyle
/// segments that continue the prior sample of the same gesture; an unlinked
/// freestyle shape renders as an isolated point.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    /// Where the gesture sample span begins
    pub start: Point,
    /// Where the gesture sample span ends
    pub end: Point,
    /// Solid color or named texture
    pub brush: Brush,
    /// Stroke width in pixels; 0 only for fill-clear rectangles
    pub stroke_width: f64,
    /// Which primitive to render
    pub kind: ShapeKind,
    /// Freestyle chaining flag
    pub links_to_previous: bool,
}

impl Shape {
    /// Builds a shape record from explicit paint attributes and a gesture span.
    pub fn new(
        start: Point,
        end: Point,
        brush: Brush,
        stroke_width: f64,
        kind: ShapeKind,
        links_to_previous: bool,
    ) -> Self {
        Self {
            start,
            end,
            brush,
            stroke_width,
            kind,
            links_to_previous,
        }
    }

    /// Builds the full-surface background rectangle that `clear()` commits.
    ///
    /// The covering rectangle is an ordinary history entry, which is what
    /// makes clearing undoable. Stroke width 0 is reserved for these
    /// fill-clear records.
    pub fn background(width: f64, height: f64, color: Color) -> Self {
        Self {
            start: Point::new(0.0, 0.0),
            end: Point::new(width, height),
            brush: Brush::Solid(color),
            stroke_width: 0.0,
            kind: ShapeKind::Rectangle,
            links_to_previous: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::{PINK, RED, WHITE};

    fn line(start: Point, end: Point) -> Shape {
        Shape::new(start, end, Brush::Solid(RED), 4.0, ShapeKind::Line, false)
    }

    #[test]
    fn equality_covers_paint_and_geometry() {
        let a = line(Point::new(1.0, 2.0), Point::new(3.0, 4.0));
        let b = line(Point::new(1.0, 2.0), Point::new(3.0, 4.0));
        assert_eq!(a, b);

        let mut moved = b.clone();
        moved.end = Point::new(3.0, 5.0);
        assert_ne!(a, moved);

        let mut recolored = b.clone();
        recolored.brush = Brush::Solid(PINK);
        assert_ne!(a, recolored);

        let mut textured = b.clone();
        textured.brush = Brush::Texture("canvas".into());
        assert_ne!(a, textured);

        let mut thicker = b;
        thicker.stroke_width = 5.0;
        assert_ne!(a, thicker);
    }

    #[test]
    fn background_covers_full_surface_with_zero_width() {
        let bg = Shape::background(640.0, 480.0, WHITE);
        assert_eq!(bg.kind, ShapeKind::Rectangle);
        assert_eq!(bg.start, Point::new(0.0, 0.0));
        assert_eq!(bg.end, Point::new(640.0, 480.0));
        assert_eq!(bg.stroke_width, 0.0);
        assert!(!bg.links_to_previous);
    }

    #[test]
    fn shape_kind_parses_case_insensitively() {
        assert_eq!("Circle".parse::<ShapeKind>().unwrap(), ShapeKind::Circle);
        assert_eq!(
            "FREESTYLE".parse::<ShapeKind>().unwrap(),
            ShapeKind::FreeStyle
        );
        assert!("triangle".parse::<ShapeKind>().is_err());
    }
}
