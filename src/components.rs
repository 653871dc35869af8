#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow truncation when casting from usize to i32 since board dimensions are always small enough to fit in i32
    clippy::cast_possible_truncation,
    // Allow sign loss when going from signed to unsigned types since we validate values are non-negative before casting
    clippy::cast_sign_loss,
    // Allow potential wrapping when casting between types of same size as we validate values are in range
    clippy::cast_possible_wrap
)]

use bevy_ecs::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    O,
    I,
    S,
    Z,
    L,
    J,
    T,
}

impl PieceKind {
    pub const ALL: [PieceKind; 7] = [
        PieceKind::O,
        PieceKind::I,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::L,
        PieceKind::J,
        PieceKind::T,
    ];

    /// Every orientation of this piece as cell offsets relative to the
    /// piece origin. The tables are fixed design constants: O has one
    /// state, I/S/Z two, L/J/T four.
    #[must_use]
    pub fn rotation_states(self) -> &'static [[(i32, i32); 4]] {
        const O_STATES: [[(i32, i32); 4]; 1] = [[(0, 0), (1, 1), (1, 0), (0, 1)]];
        const I_STATES: [[(i32, i32); 4]; 2] = [
            [(0, 0), (0, 1), (0, 2), (0, 3)],
            [(0, 0), (1, 0), (2, 0), (3, 0)],
        ];
        const S_STATES: [[(i32, i32); 4]; 2] = [
            [(0, 1), (1, 1), (1, 0), (2, 0)],
            [(0, 0), (0, 1), (1, 1), (1, 2)],
        ];
        const Z_STATES: [[(i32, i32); 4]; 2] = [
            [(0, 0), (1, 0), (1, 1), (2, 1)],
            [(0, 1), (0, 2), (1, 0), (1, 1)],
        ];
        const L_STATES: [[(i32, i32); 4]; 4] = [
            [(0, 0), (0, 1), (0, 2), (1, 2)],
            [(0, 0), (0, 1), (1, 0), (2, 0)],
            [(0, 0), (1, 0), (1, 1), (1, 2)],
            [(0, 1), (1, 1), (2, 1), (2, 0)],
        ];
        const J_STATES: [[(i32, i32); 4]; 4] = [
            [(0, 2), (1, 2), (1, 1), (1, 0)],
            [(0, 0), (0, 1), (1, 1), (2, 1)],
            [(0, 0), (1, 0), (0, 2), (0, 1)],
            [(0, 0), (1, 0), (2, 0), (2, 1)],
        ];
        const T_STATES: [[(i32, i32); 4]; 4] = [
            [(0, 0), (1, 0), (1, 1), (2, 0)],
            [(0, 1), (1, 0), (1, 1), (1, 2)],
            [(0, 1), (1, 0), (1, 1), (2, 1)],
            [(0, 0), (0, 1), (1, 1), (0, 2)],
        ];

        match self {
            PieceKind::O => &O_STATES,
            PieceKind::I => &I_STATES,
            PieceKind::S => &S_STATES,
            PieceKind::Z => &Z_STATES,
            PieceKind::L => &L_STATES,
            PieceKind::J => &J_STATES,
            PieceKind::T => &T_STATES,
        }
    }

    #[must_use]
    pub fn rotation_count(self) -> usize {
        self.rotation_states().len()
    }

    /// The cells a preview panel should draw. The preview always shows the
    /// first rotation state, regardless of what the player does to the
    /// live piece.
    #[must_use]
    pub fn preview_blocks(self) -> [(i32, i32); 4] {
        self.rotation_states()[0]
    }
}

/// A board cell. Column `x` grows rightward, row `y` grows downward; row 0
/// is the top of the board.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Down,
    Left,
    Right,
}

#[derive(Component, Debug, Clone, Copy)]
pub struct Piece {
    pub kind: PieceKind,
    pub rotation: usize,
}

impl Piece {
    #[must_use]
    pub fn new(kind: PieceKind) -> Self {
        Self { kind, rotation: 0 }
    }

    #[must_use]
    pub fn with_rotation(kind: PieceKind, rotation: usize) -> Self {
        Self { kind, rotation }
    }

    #[must_use]
    pub fn blocks(self) -> [(i32, i32); 4] {
        self.kind.rotation_states()[self.rotation]
    }

    /// Absolute board cells for this piece at `origin`. Always re-derived
    /// from the rotation tables, never mutated incrementally.
    #[must_use]
    pub fn cells(self, origin: Position) -> [(i32, i32); 4] {
        let mut cells = self.blocks();
        for (x, y) in &mut cells {
            *x += origin.x;
            *y += origin.y;
        }
        cells
    }

    pub fn rotate(&mut self) {
        self.rotation = (self.rotation + 1) % self.kind.rotation_count();
    }
}

/// Color assigned to a piece at spawn. It never changes for the piece's
/// lifetime and is carried into the board when the piece locks.
#[derive(Component, Debug, Clone, Copy)]
pub struct Tint {
    pub color: Rgb,
}

#[derive(Resource, Debug, Clone)]
pub struct Board {
    pub width: usize,
    pub height: usize,
    pub cells: Vec<Vec<Option<Rgb>>>,
}

impl Board {
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![vec![None; height]; width],
        }
    }

    pub fn clear(&mut self) {
        for column in &mut self.cells {
            for cell in column {
                *cell = None;
            }
        }
    }

    #[must_use]
    pub fn is_settled(&self, x: i32, y: i32) -> bool {
        if x < 0 || x >= self.width as i32 || y < 0 || y >= self.height as i32 {
            return false;
        }
        self.cells[x as usize][y as usize].is_some()
    }

    /// Whether every cell can take one step in `direction` without leaving
    /// the board or entering a settled cell.
    #[must_use]
    pub fn can_move(&self, cells: &[(i32, i32)], direction: Direction) -> bool {
        cells.iter().all(|&(x, y)| match direction {
            Direction::Left => x > 0 && !self.is_settled(x - 1, y),
            Direction::Right => x < self.width as i32 - 1 && !self.is_settled(x + 1, y),
            Direction::Down => y < self.height as i32 - 1 && !self.is_settled(x, y + 1),
        })
    }

    /// Whether any cell sits directly on top of a settled cell.
    #[must_use]
    pub fn has_support(&self, cells: &[(i32, i32)]) -> bool {
        cells.iter().any(|&(x, y)| self.is_settled(x, y + 1))
    }

    pub fn lock(&mut self, cells: &[(i32, i32)], color: Rgb) {
        for &(x, y) in cells {
            if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
                self.cells[x as usize][y as usize] = Some(color);
            }
        }
    }

    /// Removes the topmost full row and shifts every settled cell above it
    /// down by one. At most one row is cleared per call; repeated calls
    /// pick up any remaining full rows. Returns whether a row was cleared.
    pub fn clear_full_line(&mut self) -> bool {
        for y in 0..self.height {
            let full = (0..self.width).all(|x| self.cells[x][y].is_some());
            if !full {
                continue;
            }

            // Copying rows 0..y down one place also erases row y itself.
            for y2 in (1..=y).rev() {
                for x in 0..self.width {
                    self.cells[x][y2] = self.cells[x][y2 - 1];
                }
            }
            for x in 0..self.width {
                self.cells[x][0] = None;
            }
            return true;
        }
        false
    }

    /// Lazy enumeration of settled cells with their colors. Restartable:
    /// every call walks the current board from scratch, with no cursor
    /// state carried between calls.
    pub fn settled(&self) -> impl Iterator<Item = (Position, Rgb)> + '_ {
        self.cells.iter().enumerate().flat_map(|(x, column)| {
            column.iter().enumerate().filter_map(move |(y, cell)| {
                cell.map(|color| {
                    (
                        Position {
                            x: x as i32,
                            y: y as i32,
                        },
                        color,
                    )
                })
            })
        })
    }

    #[must_use]
    pub fn settled_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| cell.is_some())
            .count()
    }
}

#[derive(Resource, Debug, Clone)]
pub struct GameState {
    /// Monotonic once set; only `Engine::reset` clears it.
    pub game_over: bool,
    /// The pending piece shown in the preview panel. Consumed by spawn,
    /// never by lock.
    pub next_piece: PieceKind,
}

impl GameState {
    #[must_use]
    pub fn new(next_piece: PieceKind) -> Self {
        Self {
            game_over: false,
            next_piece,
        }
    }
}
