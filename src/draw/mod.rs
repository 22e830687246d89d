//! Rendering primitives and shape records (Cairo-based).
//!
//! This module defines the core drawing types of the surface:
//! - [`Color`]: RGBA color with the fixed 16-entry palette
//! - [`Shape`]: the immutable records committed to history
//! - [`HistoryStore`]: committed shapes plus the redo buffer
//! - [`PaintCache`]: memoized brush/width paint resolution
//! - Replay functions for live repaint and offscreen export

pub mod color;
pub mod history;
pub mod paint;
pub mod render;
pub mod shape;

// Re-export commonly used types at module level
pub use color::{Color, PALETTE, name_to_color, palette_color};
pub use history::HistoryStore;
pub use paint::{PaintCache, PaintDescriptor};
pub use render::{RenderError, render_offscreen, render_shapes, repaint};
pub use shape::{Brush, Point, Shape, ShapeKind};

// Re-export color constants for public API
#[allow(unused_imports)]
pub use color::{BLACK, BLUE, GREEN, ORANGE, PINK, RED, WHITE, YELLOW, color_to_name};
