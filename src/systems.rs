use bevy_ecs::prelude::*;
use log::{debug, info, trace};

use crate::components::{Board, Direction, GameState, Piece, PieceKind, Position, Tint};
use crate::config::EngineConfig;
use crate::engine::EngineError;
use crate::game::CEILING_BAND_ROWS;
use crate::rng::RngSource;

/// Spawns a new active piece at the configured spawn column on the top row.
///
/// With `kind: None` the previewed piece is promoted and a fresh preview is
/// drawn; an explicit kind leaves the preview untouched. With
/// `rotation: None` the rotation state is drawn uniformly from the states
/// the piece has; an explicit out-of-range index is the one spawn failure.
///
/// Requests made after game over, or while a piece is still live, are
/// ignored.
pub fn spawn_piece(
    world: &mut World,
    kind: Option<PieceKind>,
    rotation: Option<usize>,
) -> Result<(), EngineError> {
    if world.resource::<GameState>().game_over {
        debug!("Ignoring spawn request after game over");
        return Ok(());
    }
    if active_piece(world).is_some() {
        debug!("Ignoring spawn request while a piece is active");
        return Ok(());
    }

    let kind = match kind {
        Some(kind) => kind,
        None => {
            let drawn = world.resource_mut::<RngSource>().piece();
            let mut game_state = world.resource_mut::<GameState>();
            std::mem::replace(&mut game_state.next_piece, drawn)
        }
    };

    let rotation = match rotation {
        Some(rotation) => {
            let count = kind.rotation_count();
            if rotation >= count {
                return Err(EngineError::InvalidRotation {
                    kind,
                    rotation,
                    count,
                });
            }
            rotation
        }
        None => world.resource_mut::<RngSource>().rotation(kind),
    };

    let color = world.resource_mut::<RngSource>().color();
    let piece = Piece::with_rotation(kind, rotation);

    // Start at the configured spawn column, then pull the origin back left
    // if the shape sticks out past the right edge. Cells are never dropped;
    // containment is enforced by shifting the whole piece.
    let config = world.resource::<EngineConfig>();
    let width = config.grid_width as i32;
    let mut origin = Position {
        x: config.spawn_col as i32,
        y: 0,
    };
    let rightmost = piece
        .cells(origin)
        .iter()
        .map(|&(x, _)| x)
        .max()
        .unwrap_or(origin.x);
    if rightmost > width - 1 {
        origin.x -= rightmost - (width - 1);
    }

    info!("Spawning {kind:?} at column {} with rotation {rotation}", origin.x);
    world.spawn((piece, origin, Tint { color }));
    Ok(())
}

/// Applies one step in `direction` to the active piece.
///
/// Two lock rules apply, in order:
/// - If any cell rests directly on a settled cell while the piece's top
///   row is inside the ceiling band, the piece locks where it stands and
///   the game ends, whatever direction was requested.
/// - A `Down` step that is blocked by the floor or by settled cells locks
///   the piece normally.
///
/// Blocked sideways steps are silent no-ops.
pub fn move_piece(world: &mut World, direction: Direction) {
    if world.resource::<GameState>().game_over {
        trace!("Ignoring {direction:?} after game over");
        return;
    }
    let Some((entity, piece, origin, tint)) = active_piece(world) else {
        trace!("Ignoring {direction:?} with no active piece");
        return;
    };

    let cells = piece.cells(origin);

    let locks_out = {
        let board = world.resource::<Board>();
        board.has_support(&cells) && top_row(&cells) <= CEILING_BAND_ROWS
    };
    if locks_out {
        info!("Piece settled inside the ceiling band; game over");
        world.resource_mut::<GameState>().game_over = true;
        lock_piece(world, entity, &cells, tint);
        return;
    }

    let legal = world.resource::<Board>().can_move(&cells, direction);
    match direction {
        Direction::Down => {
            if legal {
                world.entity_mut(entity).insert(Position {
                    x: origin.x,
                    y: origin.y + 1,
                });
                trace!("Moved piece down to row {}", origin.y + 1);
            } else {
                lock_piece(world, entity, &cells, tint);
            }
        }
        Direction::Left | Direction::Right => {
            if legal {
                let dx = if direction == Direction::Left { -1 } else { 1 };
                world.entity_mut(entity).insert(Position {
                    x: origin.x + dx,
                    y: origin.y,
                });
                trace!("Moved piece to column {}", origin.x + dx);
            }
        }
    }
}

/// Advances the active piece to its next rotation state.
///
/// Rotation always succeeds and is not checked against settled cells or
/// the board edge; a rotated piece may overlap the stack or stick out past
/// the right edge until it moves again. See the crate docs for why this
/// contract is kept.
pub fn rotate_piece(world: &mut World) {
    if world.resource::<GameState>().game_over {
        trace!("Ignoring rotate after game over");
        return;
    }
    let Some((entity, piece, _, _)) = active_piece(world) else {
        trace!("Ignoring rotate with no active piece");
        return;
    };

    let mut rotated = piece;
    rotated.rotate();
    debug!("Rotated {:?} to state {}", rotated.kind, rotated.rotation);
    world.entity_mut(entity).insert(rotated);
}

/// Clears at most one full row. Hosts call this once per frame; a frame
/// with several full rows clears them one call at a time.
pub fn clear_lines(world: &mut World) -> bool {
    let cleared = world.resource_mut::<Board>().clear_full_line();
    if cleared {
        info!("Cleared a full row");
    }
    cleared
}

// Merges the piece's cells into the board and retires the entity. The host
// sees "no active piece" and decides when to spawn the next one.
fn lock_piece(world: &mut World, entity: Entity, cells: &[(i32, i32)], tint: Tint) {
    info!("Locking piece in place");
    world.resource_mut::<Board>().lock(cells, tint.color);
    world.despawn(entity);
}

pub(crate) fn active_piece(world: &mut World) -> Option<(Entity, Piece, Position, Tint)> {
    let mut query = world.query::<(Entity, &Piece, &Position, &Tint)>();
    query
        .iter(world)
        .next()
        .map(|(entity, piece, position, tint)| (entity, *piece, *position, *tint))
}

fn top_row(cells: &[(i32, i32)]) -> i32 {
    cells.iter().map(|&(_, y)| y).min().unwrap_or(0)
}
