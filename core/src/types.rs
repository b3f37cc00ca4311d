/// Single coordinate axis used for board side length and positions.
pub type Coord = u8;

/// Count type used for total-cell counts, the size key of recorded stats.
pub type CellCount = u16;

/// Two-dimensional coordinates `(row, col)`, row 0 at the top.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// The two cells a pawn one row below the king would attack it from.
pub const PAWN_OFFSETS: [(isize, isize); 2] = [(1, -1), (1, 1)];

pub const DIAGONAL_DIRECTIONS: [(isize, isize); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

pub const KNIGHT_OFFSETS: [(isize, isize); 8] = [
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (-2, -1),
    (-2, 1),
    (2, -1),
    (2, 1),
];

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Coord2, delta: (isize, isize), bounds: Coord2) -> Option<Coord2> {
    let (row, col) = coords;
    let (d_row, d_col) = delta;
    let (max_row, max_col) = bounds;

    let next_row = row.checked_add_signed(d_row.try_into().ok()?)?;
    if next_row >= max_row {
        return None;
    }

    let next_col = col.checked_add_signed(d_col.try_into().ok()?)?;
    if next_col >= max_col {
        return None;
    }

    Some((next_row, next_col))
}

/// Yields `center + offset` for each offset of a fixed table, skipping cells off the board.
#[derive(Debug)]
pub struct OffsetIter {
    center: Coord2,
    offsets: &'static [(isize, isize)],
    bounds: Coord2,
    index: usize,
}

impl OffsetIter {
    pub fn new(center: Coord2, offsets: &'static [(isize, isize)], bounds: Coord2) -> Self {
        Self {
            center,
            offsets,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for OffsetIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let delta = *self.offsets.get(self.index)?;
            self.index += 1;

            if let Some(next_item) = apply_delta(self.center, delta, self.bounds) {
                return Some(next_item);
            }
        }
    }
}

/// Walks from `origin` in steps of `direction` until leaving the board. The origin itself is not yielded.
#[derive(Debug)]
pub struct RayIter {
    current: Option<Coord2>,
    direction: (isize, isize),
    bounds: Coord2,
}

impl RayIter {
    pub fn new(origin: Coord2, direction: (isize, isize), bounds: Coord2) -> Self {
        Self {
            current: Some(origin),
            direction,
            bounds,
        }
    }
}

impl Iterator for RayIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        let next_item = apply_delta(self.current?, self.direction, self.bounds);
        self.current = next_item;
        next_item
    }
}
