use serde::{Deserialize, Serialize};

/// Label of a single board cell.
///
/// Threat labels do not describe a legal chess position; each one only marks
/// a cell that some placement rule claimed relative to the king.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Piece {
    Empty,
    King,
    Pawn,
    Rook,
    Bishop,
    Knight,
}

impl Piece {
    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    pub const fn is_king(self) -> bool {
        matches!(self, Self::King)
    }

    pub const fn is_threat(self) -> bool {
        matches!(self, Self::Pawn | Self::Rook | Self::Bishop | Self::Knight)
    }

    /// Single-letter notation, `-` for an empty cell.
    pub const fn symbol(self) -> char {
        use Piece::*;
        match self {
            Empty => '-',
            King => 'K',
            Pawn => 'P',
            Rook => 'R',
            Bishop => 'B',
            Knight => 'N',
        }
    }
}

impl Default for Piece {
    fn default() -> Self {
        Self::Empty
    }
}
