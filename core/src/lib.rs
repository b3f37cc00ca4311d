#![no_std]

extern crate alloc;

use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use error::*;
pub use generator::*;
pub use piece::*;
pub use session::*;
pub use stats::*;
pub use types::*;
pub use view::*;

mod error;
mod generator;
mod piece;
mod session;
mod stats;
mod types;
mod view;

/// Side length of a square board, restricted to the supported dimensions.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Coord", into = "Coord")]
pub struct BoardSize(Coord);

impl BoardSize {
    /// Every supported side length, smallest first.
    pub const SUPPORTED: [Coord; 6] = [3, 4, 5, 6, 7, 8];

    pub const DEFAULT: Self = Self(4);

    pub fn new(dimension: Coord) -> Result<Self> {
        if Self::SUPPORTED.contains(&dimension) {
            Ok(Self(dimension))
        } else {
            Err(GameError::InvalidSize(dimension))
        }
    }

    /// Looks up the board whose total cell count is `cells` (9, 16, .., 64).
    pub fn from_total_cells(cells: CellCount) -> Result<Self> {
        Self::SUPPORTED
            .iter()
            .copied()
            .find(|&dimension| mult(dimension, dimension) == cells)
            .map(Self)
            .ok_or(GameError::InvalidCellCount(cells))
    }

    pub fn all() -> impl Iterator<Item = Self> {
        Self::SUPPORTED.into_iter().map(Self)
    }

    pub const fn dimension(self) -> Coord {
        self.0
    }

    pub const fn total_cells(self) -> CellCount {
        mult(self.0, self.0)
    }

    pub const fn contains(self, coords: Coord2) -> bool {
        coords.0 < self.0 && coords.1 < self.0
    }
}

impl Default for BoardSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<Coord> for BoardSize {
    type Error = GameError;

    fn try_from(dimension: Coord) -> Result<Self> {
        Self::new(dimension)
    }
}

impl From<BoardSize> for Coord {
    fn from(size: BoardSize) -> Self {
        size.0
    }
}

/// A generated puzzle: every cell's label plus where the king hides.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pieces: Array2<Piece>,
    size: BoardSize,
    king: Coord2,
}

impl Board {
    /// Lays out the threat pattern around a king at `king`.
    ///
    /// Each rule only writes cells that are still empty, so the order below
    /// is the overwrite precedence: pawns, then rooks, bishops and knights.
    pub fn with_king(size: BoardSize, king: Coord2) -> Result<Self> {
        if !size.contains(king) {
            return Err(GameError::InvalidCoords);
        }

        let bounds = (size.dimension(), size.dimension());
        let mut pieces: Array2<Piece> = Array2::default(bounds.to_nd_index());
        pieces[king.to_nd_index()] = Piece::King;

        let mut place = |coords: Coord2, piece: Piece| {
            let cell = &mut pieces[coords.to_nd_index()];
            if cell.is_empty() {
                *cell = piece;
            }
        };

        for coords in OffsetIter::new(king, &PAWN_OFFSETS, bounds) {
            place(coords, Piece::Pawn);
        }

        let (king_row, king_col) = king;
        for i in 0..size.dimension() {
            if i != king_col {
                place((king_row, i), Piece::Rook);
            }
        }
        for i in 0..size.dimension() {
            if i != king_row {
                place((i, king_col), Piece::Rook);
            }
        }

        for direction in DIAGONAL_DIRECTIONS {
            for coords in RayIter::new(king, direction, bounds) {
                place(coords, Piece::Bishop);
            }
        }

        for coords in OffsetIter::new(king, &KNIGHT_OFFSETS, bounds) {
            place(coords, Piece::Knight);
        }

        pieces[king.to_nd_index()] = Piece::King;

        log::debug!(
            "Laid out {}x{} board with king at {:?}",
            size.dimension(),
            size.dimension(),
            king
        );

        Ok(Self { pieces, size, king })
    }

    pub fn size(&self) -> BoardSize {
        self.size
    }

    pub fn dimension(&self) -> Coord {
        self.size.dimension()
    }

    pub fn total_cells(&self) -> CellCount {
        self.size.total_cells()
    }

    pub fn king(&self) -> Coord2 {
        self.king
    }

    pub fn piece_at(&self, coords: Coord2) -> Piece {
        self[coords]
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.size.contains(coords) {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    /// Every cell with its label, row by row.
    pub fn iter(&self) -> impl Iterator<Item = (Coord2, Piece)> + '_ {
        self.pieces
            .indexed_iter()
            .map(|((row, col), &piece)| ((row as Coord, col as Coord), piece))
    }

    pub fn count(&self, piece: Piece) -> usize {
        self.pieces.iter().filter(|&&other| other == piece).count()
    }
}

impl Index<Coord2> for Board {
    type Output = Piece;

    fn index(&self, (row, col): Coord2) -> &Self::Output {
        &self.pieces[(row as usize, col as usize)]
    }
}
