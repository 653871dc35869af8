#[cfg(test)]
mod tests {
    use crate::components::{Board, Direction, GameState, PieceKind};
    use crate::config::EngineConfig;
    use crate::config::loader::ConfigError;
    use crate::engine::{Engine, EngineError};
    use crate::tests::test_utils::{create_test_engine, despawn_active, fill_board, fill_row};

    #[test]
    fn test_engine_rejects_undersized_grids() {
        let config = EngineConfig {
            grid_width: 3,
            ..EngineConfig::default()
        };

        let err = Engine::new(config).expect_err("3-wide grid should be rejected");
        assert!(matches!(err, EngineError::Config(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_engine_rejects_spawn_column_outside_the_grid() {
        let config = EngineConfig {
            grid_width: 10,
            spawn_col: 10,
            ..EngineConfig::default()
        };

        let err = Engine::new(config).expect_err("spawn column 10 should be rejected");
        assert!(matches!(err, EngineError::Config(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_seeded_engines_replay_the_same_game() {
        let mut first = Engine::with_seed(EngineConfig::default(), 42).expect("valid config");
        let mut second = Engine::with_seed(EngineConfig::default(), 42).expect("valid config");

        for _ in 0..5 {
            assert_eq!(first.peek_next(), second.peek_next());

            first.spawn().expect("spawn failed");
            second.spawn().expect("spawn failed");
            assert_eq!(first.active_cells(), second.active_cells());

            despawn_active(&mut first.world);
            despawn_active(&mut second.world);
        }
    }

    #[test]
    fn test_peek_next_does_not_consume_the_preview() {
        let engine = create_test_engine();

        let first = engine.peek_next();
        assert_eq!(engine.peek_next(), first);
        assert_eq!(engine.peek_next(), first);
    }

    #[test]
    fn test_spawn_consumes_the_preview() {
        let mut engine = create_test_engine();
        let previewed = engine.peek_next();

        engine.spawn().expect("spawn failed");

        let cells = engine.active_cells();
        assert_eq!(cells.len(), 4);

        // The spawned piece is the one that was previewed
        let piece = crate::systems::active_piece(&mut engine.world).expect("no active piece");
        assert_eq!(piece.1.kind, previewed);
    }

    #[test]
    fn test_active_cells_share_one_color() {
        let mut engine = create_test_engine();
        engine.spawn().expect("spawn failed");

        let cells = engine.active_cells();
        assert_eq!(cells.len(), 4);
        assert!(cells.iter().all(|&(_, color)| color == cells[0].1));
    }

    #[test]
    fn test_active_cells_empty_without_a_piece() {
        let mut engine = create_test_engine();

        assert!(engine.active_cells().is_empty());
        assert!(!engine.has_active_piece());

        engine.spawn().expect("spawn failed");
        assert!(engine.has_active_piece());
    }

    #[test]
    fn test_settled_cells_stable_between_mutations() {
        let mut engine = create_test_engine();
        {
            let mut board = engine.world.resource_mut::<Board>();
            fill_board(&mut board, &[(1, 19), (2, 18), (8, 19)]);
        }

        let first: Vec<_> = engine.settled_cells().collect();
        let second: Vec<_> = engine.settled_cells().collect();

        assert_eq!(first.len(), 3);
        assert_eq!(first, second);
    }

    #[test]
    fn test_locked_piece_appears_in_settled_cells() {
        let mut engine = create_test_engine();
        engine.spawn_with(PieceKind::O, Some(0)).expect("spawn failed");
        let color = engine.active_cells()[0].1;

        // Ride the piece to the floor
        for _ in 0..25 {
            engine.move_piece(Direction::Down);
        }

        assert!(!engine.has_active_piece());
        let settled: Vec<_> = engine.settled_cells().collect();
        assert_eq!(settled.len(), 4);
        assert!(settled.iter().all(|&(_, c)| c == color));
    }

    #[test]
    fn test_reset_clears_board_piece_and_game_over() {
        let mut engine = create_test_engine();
        {
            let mut board = engine.world.resource_mut::<Board>();
            fill_row(&mut board, 19);
        }
        engine.spawn().expect("spawn failed");
        engine.world.resource_mut::<GameState>().game_over = true;

        engine.reset();

        assert!(!engine.is_over());
        assert!(!engine.has_active_piece());
        assert_eq!(engine.settled_cells().count(), 0);

        // The engine is playable again
        engine.spawn().expect("spawn failed");
        assert!(engine.has_active_piece());
    }

    #[test]
    fn test_check_and_clear_lines_round() {
        let mut engine = create_test_engine();
        {
            let mut board = engine.world.resource_mut::<Board>();
            fill_row(&mut board, 19);
            fill_board(&mut board, &[(4, 18)]);
        }

        assert!(engine.check_and_clear_lines());
        assert!(!engine.check_and_clear_lines());

        let settled: Vec<_> = engine.settled_cells().collect();
        assert_eq!(settled.len(), 1);
        assert_eq!((settled[0].0.x, settled[0].0.y), (4, 19));
    }

    #[test]
    fn test_config_accessor_reports_the_active_config() {
        let config = EngineConfig {
            grid_width: 12,
            grid_height: 24,
            spawn_col: 6,
        };
        let engine = Engine::with_seed(config.clone(), 1).expect("valid config");

        assert_eq!(engine.config(), &config);
    }
}
