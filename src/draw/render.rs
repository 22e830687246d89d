//! Cairo-based shape replay.
//!
//! The renderer is stateless: it replays a committed shape list onto a cairo
//! context in list order, so later shapes occlude earlier ones. The same
//! replay drives the live display surface and the offscreen export raster.

use super::color::Color;
use super::paint::PaintCache;
use super::shape::{Shape, ShapeKind};
use crate::util;
use cairo::{Context, Format, ImageSurface};
use thiserror::Error;

/// Errors raised while preparing a render target.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to allocate offscreen raster: {0}")]
    Surface(#[from] cairo::Error),
}

/// Clears the target to `background`, then replays `shapes` in paint order.
pub fn repaint(ctx: &Context, shapes: &[Shape], background: Color, paints: &mut PaintCache) {
    ctx.set_source_rgba(background.r, background.g, background.b, background.a);
    let _ = ctx.paint();

    render_shapes(ctx, shapes, paints);
}

/// Replays a shape list without touching the background.
///
/// Paint resolution failures do not abort the replay: the shape is drawn
/// with the previously applied paint, or skipped when no paint has been
/// applied yet. Either way a warning is logged and the session continues.
pub fn render_shapes(ctx: &Context, shapes: &[Shape], paints: &mut PaintCache) {
    let mut paint_applied = false;

    for shape in shapes {
        match paints.resolve(&shape.brush, shape.stroke_width) {
            Ok(paint) => {
                paint.apply(ctx);
                paint_applied = true;
            }
            Err(err) => {
                log::warn!("Paint resolution failed ({err}); keeping previous paint");
                if !paint_applied {
                    continue;
                }
            }
        }

        render_geometry(ctx, shape);
    }
}

/// Replays `shapes` onto a fresh offscreen raster for export.
///
/// Independent of any live display surface; the caller hands the result to
/// an image exporter.
pub fn render_offscreen(
    shapes: &[Shape],
    width: i32,
    height: i32,
    background: Color,
    paints: &mut PaintCache,
) -> Result<ImageSurface, RenderError> {
    let surface = ImageSurface::create(Format::ARgb32, width, height)?;
    let ctx = Context::new(&surface)?;

    repaint(&ctx, shapes, background, paints);

    drop(ctx);
    surface.flush();
    Ok(surface)
}

/// Draws one shape's geometry with whatever paint is active on the context.
fn render_geometry(ctx: &Context, shape: &Shape) {
    match shape.kind {
        ShapeKind::FreeStyle => {
            let degenerate = shape.start == shape.end;
            if shape.links_to_previous && !degenerate {
                ctx.move_to(shape.start.x, shape.start.y);
                ctx.line_to(shape.end.x, shape.end.y);
                let _ = ctx.stroke();
            } else {
                render_dot(ctx, shape.end.x, shape.end.y, shape.stroke_width);
            }
        }
        ShapeKind::Circle => {
            let (cx, cy, rx, ry) = util::ellipse_bounds(shape.start, shape.end);
            if rx <= 0.0 || ry <= 0.0 {
                return;
            }

            ctx.save().ok();
            ctx.translate(cx, cy);
            ctx.scale(rx, ry);
            ctx.arc(0.0, 0.0, 1.0, 0.0, 2.0 * std::f64::consts::PI);
            ctx.restore().ok();

            let _ = ctx.fill();
        }
        ShapeKind::Line => {
            ctx.move_to(shape.start.x, shape.start.y);
            ctx.line_to(shape.end.x, shape.end.y);
            let _ = ctx.stroke();
        }
        ShapeKind::Rectangle => {
            let (x, y, w, h) = util::normalized_box(shape.start, shape.end);
            ctx.rectangle(x, y, w, h);
            let _ = ctx.fill();
        }
    }
}

/// Isolated freestyle point: a filled disc with stroke-width diameter.
///
/// A zero-length stroked segment is not guaranteed to ink any pixels, so
/// dots are drawn as explicit discs.
fn render_dot(ctx: &Context, x: f64, y: f64, stroke_width: f64) {
    let radius = (stroke_width / 2.0).max(0.5);
    ctx.new_path();
    ctx.arc(x, y, radius, 0.0, 2.0 * std::f64::consts::PI);
    let _ = ctx.fill();
}
