use super::*;

/// Places the king uniformly at random, row and column drawn independently.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomBoardGenerator {
    seed: u64,
}

impl RandomBoardGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(self, size: BoardSize) -> Result<Board> {
        use rand::prelude::*;

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let king_row: Coord = rng.random_range(0..size.dimension());
        let king_col: Coord = rng.random_range(0..size.dimension());
        log::trace!("seed {} placed king at ({}, {})", self.seed, king_row, king_col);

        Board::with_king(size, (king_row, king_col))
    }
}
