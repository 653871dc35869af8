#![warn(clippy::all, clippy::pedantic)]

use std::error;
use std::fmt;

use bevy_ecs::prelude::*;
use log::debug;

use crate::components::{Board, Direction, GameState, Piece, PieceKind, Position, Rgb, Tint};
use crate::config::EngineConfig;
use crate::config::loader::ConfigError;
use crate::rng::RngSource;
use crate::systems;

pub type EngineResult<T> = std::result::Result<T, EngineError>;

/// The falling-block engine.
///
/// Owns every piece of game state inside a `bevy_ecs::World`; a host holds
/// the engine by value and drives it from a single loop, so concurrent
/// mutation is ruled out by ownership rather than by locks. The engine
/// performs no timing, input, or rendering of its own.
#[derive(Debug)]
pub struct Engine {
    pub world: World,
}

impl Engine {
    /// Builds an engine with an entropy-seeded random source.
    pub fn new(config: EngineConfig) -> EngineResult<Self> {
        Self::build(config, RngSource::new())
    }

    /// Builds an engine whose random draws replay exactly from `seed`.
    pub fn with_seed(config: EngineConfig, seed: u64) -> EngineResult<Self> {
        Self::build(config, RngSource::with_seed(seed))
    }

    fn build(config: EngineConfig, mut rng: RngSource) -> EngineResult<Self> {
        config.validate()?;

        let mut world = World::new();
        let next_piece = rng.piece();
        world.insert_resource(Board::new(config.grid_width, config.grid_height));
        world.insert_resource(GameState::new(next_piece));
        world.insert_resource(rng);
        world.insert_resource(config);

        Ok(Self { world })
    }

    /// Spawns the previewed piece with a random rotation state and color,
    /// then draws a fresh preview. Ignored while a piece is live or after
    /// game over.
    pub fn spawn(&mut self) -> EngineResult<()> {
        systems::spawn_piece(&mut self.world, None, None)
    }

    /// Spawns a chosen piece, optionally at a fixed rotation state,
    /// leaving the preview untouched. Fails only when `rotation` is out of
    /// range for `kind`.
    pub fn spawn_with(&mut self, kind: PieceKind, rotation: Option<usize>) -> EngineResult<()> {
        systems::spawn_piece(&mut self.world, Some(kind), rotation)
    }

    /// Applies one step in `direction`. A blocked `Down` locks the piece;
    /// blocked sideways steps do nothing.
    pub fn move_piece(&mut self, direction: Direction) {
        systems::move_piece(&mut self.world, direction);
    }

    /// Advances the active piece to its next rotation state. Never fails
    /// and never checks collisions.
    pub fn rotate(&mut self) {
        systems::rotate_piece(&mut self.world);
    }

    /// Clears at most one full row, returning whether one was cleared.
    /// Call once per frame; later calls pick up remaining full rows.
    pub fn check_and_clear_lines(&mut self) -> bool {
        systems::clear_lines(&mut self.world)
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.world.resource::<GameState>().game_over
    }

    /// Returns the pending piece without consuming it.
    #[must_use]
    pub fn peek_next(&self) -> PieceKind {
        self.world.resource::<GameState>().next_piece
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        self.world.resource::<EngineConfig>()
    }

    pub fn has_active_piece(&mut self) -> bool {
        systems::active_piece(&mut self.world).is_some()
    }

    /// The active piece's absolute cells with its color, for drawing.
    /// Empty when no piece is live.
    pub fn active_cells(&mut self) -> Vec<(Position, Rgb)> {
        let mut cells = Vec::new();
        let mut query = self.world.query::<(&Piece, &Position, &Tint)>();
        for (piece, position, tint) in query.iter(&self.world) {
            for (x, y) in piece.cells(*position) {
                cells.push((Position { x, y }, tint.color));
            }
        }
        cells
    }

    /// Lazy enumeration of settled cells with their colors. Finite and
    /// restartable: every call re-enumerates the current board.
    pub fn settled_cells(&self) -> impl Iterator<Item = (Position, Rgb)> + '_ {
        self.world.resource::<Board>().settled()
    }

    /// Empties the board, drops any active piece, clears the game-over
    /// flag, and draws a fresh preview. The seeded random sequence
    /// continues from where it was; score is the host's to reset.
    pub fn reset(&mut self) {
        debug!("Resetting engine state");

        let entities: Vec<Entity> = self
            .world
            .query_filtered::<Entity, With<Piece>>()
            .iter(&self.world)
            .collect();
        for entity in entities {
            self.world.despawn(entity);
        }

        let next_piece = self.world.resource_mut::<RngSource>().piece();
        let (width, height) = {
            let config = self.world.resource::<EngineConfig>();
            (config.grid_width, config.grid_height)
        };
        self.world.insert_resource(Board::new(width, height));
        self.world.insert_resource(GameState::new(next_piece));
    }
}

/// Errors surfaced by the engine API. Illegal moves are silent no-ops and
/// rotation always succeeds, so the only failures are a bad configuration
/// and an out-of-range rotation index passed to spawn.
#[derive(Debug)]
pub enum EngineError {
    Config(ConfigError),
    InvalidRotation {
        kind: PieceKind,
        rotation: usize,
        count: usize,
    },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::Config(err) => write!(f, "{err}"),
            EngineError::InvalidRotation {
                kind,
                rotation,
                count,
            } => write!(
                f,
                "rotation {rotation} is out of range for {kind:?}, which has {count} rotation state(s)"
            ),
        }
    }
}

impl error::Error for EngineError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            EngineError::Config(err) => Some(err),
            EngineError::InvalidRotation { .. } => None,
        }
    }
}

impl From<ConfigError> for EngineError {
    fn from(err: ConfigError) -> Self {
        EngineError::Config(err)
    }
}
