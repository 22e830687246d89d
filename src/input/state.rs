//! Gesture state machine.
//!
//! Translates host pointer events into candidate shapes: freestyle strokes
//! commit as a chain of micro-segments while the pointer moves, geometric
//! kinds preview live and commit once on release.

use super::events::PointerAction;
use super::tool::ToolState;
use crate::draw::color::PALETTE;
use crate::draw::{Color, Point, Shape, ShapeKind};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Current gesture phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GesturePhase {
    /// Not tracking a pointer - waiting for a Down
    Idle,
    /// Pointer is down and being tracked
    Tracking {
        /// Where the gesture began
        start: Point,
        /// The most recent sample (freestyle segments chain from here)
        last: Point,
    },
}

/// What one pointer event produced.
///
/// `shape` is the candidate to draw this frame; `commit` says whether it
/// becomes part of the history or is preview-only. `recolor` carries the
/// palette color drawn for the next stroke when randomized coloring fires
/// on gesture completion.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureOutcome {
    pub shape: Option<Shape>,
    pub commit: bool,
    pub recolor: Option<Color>,
}

impl GestureOutcome {
    fn nothing() -> Self {
        Self {
            shape: None,
            commit: false,
            recolor: None,
        }
    }
}

/// Pointer-event state machine producing preview and committed shapes.
///
/// The random source is injected at construction so tests can seed it and
/// observe a deterministic recolor sequence.
pub struct GestureController {
    phase: GesturePhase,
    rng: StdRng,
}

impl GestureController {
    /// Creates a controller seeded from operating-system entropy.
    pub fn new() -> Self {
        Self {
            phase: GesturePhase::Idle,
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a controller with a fixed seed (deterministic tests).
    pub fn with_seed(seed: u64) -> Self {
        Self {
            phase: GesturePhase::Idle,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Whether a gesture is currently being tracked.
    pub fn is_tracking(&self) -> bool {
        matches!(self.phase, GesturePhase::Tracking { .. })
    }

    /// Feeds one pointer event through the state machine.
    ///
    /// Malformed sequences (Move or Up without a preceding Down) are
    /// tolerated: the controller stays idle and produces nothing. A second
    /// Down while tracking restarts the gesture at the new position.
    pub fn on_pointer_event(
        &mut self,
        tool: &ToolState,
        action: PointerAction,
        pos: Point,
    ) -> GestureOutcome {
        match action {
            PointerAction::Down => {
                if self.is_tracking() {
                    log::debug!("Pointer down while tracking; restarting gesture");
                }
                self.phase = GesturePhase::Tracking {
                    start: pos,
                    last: pos,
                };

                // Freestyle inks an isolated point the moment the pointer
                // lands; other kinds only preview until release.
                let shape = tool.build_shape(pos, pos, false);
                GestureOutcome {
                    shape: Some(shape),
                    commit: tool.kind == ShapeKind::FreeStyle,
                    recolor: None,
                }
            }
            PointerAction::Move => {
                let GesturePhase::Tracking { start, last } = self.phase else {
                    log::debug!("Pointer move without a gesture; ignoring");
                    return GestureOutcome::nothing();
                };

                let outcome = if tool.kind == ShapeKind::FreeStyle {
                    GestureOutcome {
                        shape: Some(tool.build_shape(last, pos, true)),
                        commit: true,
                        recolor: None,
                    }
                } else {
                    GestureOutcome {
                        shape: Some(tool.build_shape(start, pos, false)),
                        commit: false,
                        recolor: None,
                    }
                };

                self.phase = GesturePhase::Tracking { start, last: pos };
                outcome
            }
            PointerAction::Up => {
                let GesturePhase::Tracking { start, last } = self.phase else {
                    log::debug!("Pointer up without a gesture; ignoring");
                    return GestureOutcome::nothing();
                };

                // Freestyle commits a final linked segment to the release
                // point; geometric kinds commit the whole gesture span.
                let shape = if tool.kind == ShapeKind::FreeStyle {
                    tool.build_shape(last, pos, true)
                } else {
                    tool.build_shape(start, pos, false)
                };

                self.phase = GesturePhase::Idle;

                GestureOutcome {
                    shape: Some(shape),
                    commit: true,
                    recolor: tool.random_color.then(|| self.next_palette_color()),
                }
            }
        }
    }

    /// Draws a random index into the fixed palette.
    fn next_palette_color(&mut self) -> Color {
        let index = self.rng.gen_range(0..PALETTE.len());
        let (name, color) = PALETTE[index];
        log::debug!("Randomized next stroke color: {name}");
        color
    }
}

impl Default for GestureController {
    fn default() -> Self {
        Self::new()
    }
}
