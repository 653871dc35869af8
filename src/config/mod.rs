pub mod loader;

use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::game::{DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH, DEFAULT_SPAWN_COL, MIN_GRID_SIDE};
use loader::ConfigError;

/// Engine configuration with named fields, validated once before an engine
/// is built. Board pixel geometry, window size, FPS, and the like are host
/// concerns and do not appear here.
#[derive(Resource, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default = "default_grid_width")]
    pub grid_width: usize,
    #[serde(default = "default_grid_height")]
    pub grid_height: usize,
    /// Column where new pieces appear (their row is always 0).
    #[serde(default = "default_spawn_col")]
    pub spawn_col: usize,
}

fn default_grid_width() -> usize {
    DEFAULT_GRID_WIDTH
}

fn default_grid_height() -> usize {
    DEFAULT_GRID_HEIGHT
}

fn default_spawn_col() -> usize {
    DEFAULT_SPAWN_COL
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            grid_width: DEFAULT_GRID_WIDTH,
            grid_height: DEFAULT_GRID_HEIGHT,
            spawn_col: DEFAULT_SPAWN_COL,
        }
    }
}

impl EngineConfig {
    /// Checks grid and spawn settings. Every rotation state spans up to 4
    /// cells, so a grid smaller than 4x4 could not hold a fresh spawn with
    /// all cells in bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_width < MIN_GRID_SIDE || self.grid_height < MIN_GRID_SIDE {
            return Err(ConfigError::Invalid(format!(
                "grid must be at least {MIN_GRID_SIDE}x{MIN_GRID_SIDE}, got {}x{}",
                self.grid_width, self.grid_height
            )));
        }
        if self.spawn_col >= self.grid_width {
            return Err(ConfigError::Invalid(format!(
                "spawn column {} is outside a grid {} columns wide",
                self.spawn_col, self.grid_width
            )));
        }
        Ok(())
    }
}
