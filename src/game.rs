#![warn(clippy::all, clippy::pedantic)]

// Default board dimensions
pub const DEFAULT_GRID_WIDTH: usize = 10;
pub const DEFAULT_GRID_HEIGHT: usize = 20;

// Default spawn column for new pieces
pub const DEFAULT_SPAWN_COL: usize = 4;

// Largest row index still inside the ceiling band (rows 0..=1). A piece
// that settles onto the stack with its topmost cell inside the band ends
// the game.
pub const CEILING_BAND_ROWS: i32 = 1;

// Every piece occupies exactly this many cells
pub const PIECE_CELLS: usize = 4;

// Smallest playable grid side; every rotation state spans up to 4 cells,
// so anything smaller could not hold a freshly spawned piece
pub const MIN_GRID_SIDE: usize = 4;
