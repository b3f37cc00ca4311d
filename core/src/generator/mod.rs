use crate::*;
pub use fixed::*;
pub use random::*;

mod fixed;
mod random;

pub trait BoardGenerator {
    fn generate(self, size: BoardSize) -> Result<Board>;
}

/// Generates a random board with `dimension` cells per side.
///
/// Fails with [`GameError::InvalidSize`] when `dimension` is not supported.
pub fn generate(dimension: Coord, seed: u64) -> Result<Board> {
    let size = BoardSize::new(dimension)?;
    RandomBoardGenerator::new(seed).generate(size)
}
