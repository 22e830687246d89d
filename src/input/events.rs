//! Generic pointer event types for cross-host compatibility.

/// Pointer event phase delivered by the host.
///
/// Host implementations map their native input events (touch, mouse, stylus)
/// to these generic actions for unified gesture handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerAction {
    /// Pointer made contact - a gesture begins
    Down,
    /// Pointer moved while in contact
    Move,
    /// Pointer lifted - the gesture completes
    Up,
}
