#![warn(clippy::all, clippy::pedantic)]

pub mod engine_tests;

// Import test utilities
#[cfg(test)]
pub mod test_utils {
    use bevy_ecs::prelude::*;

    use crate::components::{Board, GameState, Piece, Rgb};
    use crate::config::EngineConfig;
    use crate::engine::Engine;
    use crate::rng::RngSource;

    pub const GRAY: Rgb = Rgb {
        r: 100,
        g: 100,
        b: 100,
    };

    // Helper function to create a test world with the engine resources but
    // no active piece
    #[must_use]
    pub fn create_test_world() -> World {
        create_test_world_with(EngineConfig::default())
    }

    #[must_use]
    pub fn create_test_world_with(config: EngineConfig) -> World {
        let mut world = World::new();
        let mut rng = RngSource::with_seed(7);
        let next_piece = rng.piece();

        world.insert_resource(Board::new(config.grid_width, config.grid_height));
        world.insert_resource(GameState::new(next_piece));
        world.insert_resource(rng);
        world.insert_resource(config);

        world
    }

    // Helper function to create a deterministic engine
    #[must_use]
    pub fn create_test_engine() -> Engine {
        Engine::with_seed(EngineConfig::default(), 7).expect("default config is valid")
    }

    // Helper to settle specific cells on the board
    pub fn fill_board(board: &mut Board, cells: &[(usize, usize)]) {
        for &(x, y) in cells {
            if x < board.width && y < board.height {
                board.cells[x][y] = Some(GRAY);
            }
        }
    }

    // Helper to settle one complete row
    pub fn fill_row(board: &mut Board, y: usize) {
        for x in 0..board.width {
            board.cells[x][y] = Some(GRAY);
        }
    }

    // Helper to drop the active piece from a world or engine
    pub fn despawn_active(world: &mut World) {
        let entities: Vec<Entity> = world
            .query_filtered::<Entity, With<Piece>>()
            .iter(world)
            .collect();
        for entity in entities {
            world.despawn(entity);
        }
    }
}
