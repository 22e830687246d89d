//! Input handling and tool state machine.
//!
//! This module translates host pointer events into drawing actions. It
//! maintains the active tool configuration (brush, stroke width, shape
//! kind) and the gesture state machine that decides what previews and what
//! commits.

pub mod events;
pub mod state;
pub mod tool;

// Re-export commonly used types at module level
pub use events::PointerAction;
pub use state::{GestureController, GestureOutcome, GesturePhase};
pub use tool::ToolState;
