//! Committed shape history with undo/redo.

use super::shape::Shape;
use serde::{Deserialize, Serialize};

/// Ordered list of committed shapes plus a LIFO buffer of undone ones.
///
/// The shape list is append-only except for undo's pop-from-tail and redo's
/// push-to-tail; list order is paint order. Created empty when the drawing
/// surface initializes and lives for the surface's whole session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryStore {
    /// Shapes in draw order (first = bottom, last = top)
    shapes: Vec<Shape>,
    /// Undone shapes; the last entry is the first redone
    redo_buffer: Vec<Shape>,
}

impl HistoryStore {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a finalized shape.
    ///
    /// Any new commit invalidates the redo chain, so the redo buffer is
    /// dropped here unconditionally.
    pub fn commit(&mut self, shape: Shape) {
        self.shapes.push(shape);
        self.redo_buffer.clear();
    }

    /// Removes the most recently committed shape and parks it for redo.
    ///
    /// Returns the undone shape, or `None` when the history is empty (a
    /// silent no-op, not an error).
    pub fn undo(&mut self) -> Option<Shape> {
        let shape = self.shapes.pop()?;
        self.redo_buffer.push(shape.clone());
        Some(shape)
    }

    /// Re-commits the most recently undone shape.
    ///
    /// Returns the restored shape, or `None` when nothing is undone.
    pub fn redo(&mut self) -> Option<Shape> {
        let shape = self.redo_buffer.pop()?;
        self.shapes.push(shape.clone());
        Some(shape)
    }

    /// Records a full-surface background fill as an ordinary commit.
    ///
    /// Clearing never truncates history; it paints over it, which keeps the
    /// operation undoable like any other shape.
    pub fn clear_to(&mut self, background: Shape) {
        self.commit(background);
    }

    /// Read-only view of the committed shapes, in paint order.
    pub fn snapshot(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Number of shapes currently available to redo (diagnostics).
    pub fn redo_depth(&self) -> usize {
        self.redo_buffer.len()
    }
}
