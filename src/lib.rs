//! Falling-block puzzle engine.
//!
//! The crate implements the piece/board core of a Tetris-family game:
//! the shape catalog, the active-piece controller, collision detection,
//! locking, line clears, and game-over detection. Everything else — frame
//! timing, keyboard handling, rendering, audio, score keeping — belongs to
//! the host, which drives an [`Engine`] from its own loop and reads cells
//! back for drawing.
//!
//! Two contracts are deliberate quirks carried over from the reference
//! behavior rather than bugs to fix:
//!
//! - [`Engine::rotate`] always succeeds. It is not validated against
//!   settled cells or the board edge, so a rotated piece can overlap the
//!   stack or hang past the right edge until it next moves. A stricter
//!   engine would reject or wall-kick such rotations; this one documents
//!   them instead.
//! - A piece resting on the stack with its topmost cell in the ceiling
//!   band (the top two rows) locks on the next move — whatever direction
//!   was requested — and ends the game. This eager lock is the game-over
//!   trigger and is intentionally not simplified into the plain
//!   down-collision check.

pub mod components;
pub mod config;
pub mod engine;
pub mod game;
pub mod rng;
pub mod systems;

#[cfg(test)]
mod tests;

pub use components::{Board, Direction, GameState, Piece, PieceKind, Position, Rgb, Tint};
pub use config::EngineConfig;
pub use engine::{Engine, EngineError, EngineResult};
pub use rng::RngSource;
