use alloc::collections::BTreeSet;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// What a renderer may show for a single cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Hidden { marked: bool, blocked: bool },
    /// Face up; flipped cells keep any mark they had.
    Revealed { piece: Piece, marked: bool },
}

impl CellView {
    pub const fn is_revealed(self) -> bool {
        matches!(self, Self::Revealed { .. })
    }
}

impl Default for CellView {
    fn default() -> Self {
        Self::Hidden {
            marked: false,
            blocked: false,
        }
    }
}

/// Read-only projection of a [`GameSession`], handed to renderers after every change.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SessionView<'a> {
    pub board: &'a Board,
    pub flipped: &'a BTreeSet<Coord2>,
    pub marked: &'a BTreeSet<Coord2>,
    pub blocked: &'a BTreeSet<Coord2>,
    pub mode: Mode,
    pub flip_count: u32,
    pub outcome: Outcome,
}

impl<'a> SessionView<'a> {
    pub fn new(session: &'a GameSession) -> Self {
        Self {
            board: session.board(),
            flipped: session.flipped(),
            marked: session.marked(),
            blocked: session.blocked(),
            mode: session.mode(),
            flip_count: session.flip_count(),
            outcome: session.outcome(),
        }
    }

    pub fn dimension(&self) -> Coord {
        self.board.dimension()
    }

    pub fn cell(&self, coords: Coord2) -> CellView {
        let marked = self.marked.contains(&coords);
        if self.flipped.contains(&coords) {
            CellView::Revealed {
                piece: self.board[coords],
                marked,
            }
        } else {
            CellView::Hidden {
                marked,
                blocked: self.blocked.contains(&coords),
            }
        }
    }

    pub fn cells(&self) -> Array2<CellView> {
        let dimension = self.dimension();
        let mut cells = Array2::default((dimension, dimension).to_nd_index());
        for (coords, _) in self.board.iter() {
            cells[coords.to_nd_index()] = self.cell(coords);
        }
        cells
    }

    /// Cells a flip would currently be accepted on.
    pub fn flippable(&self) -> impl Iterator<Item = Coord2> + '_ {
        let open = !self.outcome.is_finished() && self.mode == Mode::None;
        self.board
            .iter()
            .map(|(coords, _)| coords)
            .filter(move |coords| {
                open && !self.flipped.contains(coords) && !self.blocked.contains(coords)
            })
    }
}
