//! Library exports for reusing sketchboard subsystems.
//!
//! Exposes the drawing core (shape history, paint cache, gesture state
//! machine, renderer) alongside the collaborator traits so embedding hosts
//! can drive a [`board::DrawingBoard`] from their own surfaces and sinks.

pub mod assets;
pub mod board;
pub mod config;
pub mod draw;
pub mod export;
pub mod input;
pub mod script;
pub mod util;

pub use board::DrawingBoard;
pub use config::Config;
