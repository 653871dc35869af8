use bevy_ecs::prelude::Resource;

use crate::components::{PieceKind, Rgb};

/// Random source for piece, rotation, and color draws.
///
/// Wraps an owned `fastrand::Rng` instead of the thread-local generator so
/// tests can seed it and replay exact piece sequences.
#[derive(Resource, Debug, Clone)]
pub struct RngSource {
    rng: fastrand::Rng,
}

impl RngSource {
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: fastrand::Rng::new(),
        }
    }

    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    pub fn piece(&mut self) -> PieceKind {
        match self.rng.u8(0..7) {
            0 => PieceKind::O,
            1 => PieceKind::I,
            2 => PieceKind::S,
            3 => PieceKind::Z,
            4 => PieceKind::L,
            5 => PieceKind::J,
            _ => PieceKind::T,
        }
    }

    /// Uniform draw over the rotation states `kind` actually has.
    pub fn rotation(&mut self, kind: PieceKind) -> usize {
        self.rng.usize(0..kind.rotation_count())
    }

    pub fn color(&mut self) -> Rgb {
        Rgb {
            r: self.rng.u8(..),
            g: self.rng.u8(..),
            b: self.rng.u8(..),
        }
    }
}

impl Default for RngSource {
    fn default() -> Self {
        Self::new()
    }
}
