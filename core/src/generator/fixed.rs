use super::*;

/// Always hides the king at the same coordinates, for reproducible puzzles.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FixedKingGenerator {
    king: Coord2,
}

impl FixedKingGenerator {
    pub fn new(king: Coord2) -> Self {
        Self { king }
    }
}

impl BoardGenerator for FixedKingGenerator {
    fn generate(self, size: BoardSize) -> Result<Board> {
        Board::with_king(size, self.king)
    }
}
