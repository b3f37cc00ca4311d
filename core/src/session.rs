use alloc::collections::BTreeSet;
use alloc::string::String;
use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::*;

/// Identifier completions of this game are recorded under.
pub const GAME_ID: &str = "chessSolitaire";

/// What a click on a cell currently does.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    None,
    Mark,
    Block,
}

impl Default for Mode {
    fn default() -> Self {
        Self::None
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Playing,
    Won,
    Lost,
}

impl Outcome {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for Outcome {
    fn default() -> Self {
        Self::Playing
    }
}

/// Reported once per session, when the king is found.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionEvent {
    pub game_id: String,
    /// Total cell count of the board, not its side length.
    pub size_metric: CellCount,
    /// Flips it took, the winning one included.
    pub value: u32,
}

/// Receives completion events. Implementations must not fail back into the session.
pub trait CompletionListener {
    fn on_completion(&mut self, event: &CompletionEvent);
}

#[derive(Clone, Debug, PartialEq)]
pub enum FlipOutcome {
    NoChange,
    Revealed(Piece),
    Won(CompletionEvent),
    Lost(Piece),
}

impl FlipOutcome {
    pub const fn has_update(&self) -> bool {
        !matches!(self, Self::NoChange)
    }

    pub fn completion(&self) -> Option<&CompletionEvent> {
        match self {
            Self::Won(event) => Some(event),
            _ => None,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MarkOutcome {
    NoChange,
    Set,
    Cleared,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

/// Result of [`GameSession::activate`], tagged with the action the mode selected.
#[derive(Clone, Debug, PartialEq)]
pub enum ActionOutcome {
    Flip(FlipOutcome),
    Mark(MarkOutcome),
    Block(MarkOutcome),
}

impl ActionOutcome {
    pub fn has_update(&self) -> bool {
        match self {
            Self::Flip(outcome) => outcome.has_update(),
            Self::Mark(outcome) | Self::Block(outcome) => outcome.has_update(),
        }
    }
}

/// One play-through of a board, from reset until the king is found or every other cell is flipped.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    board: Board,
    flipped: BTreeSet<Coord2>,
    marked: BTreeSet<Coord2>,
    blocked: BTreeSet<Coord2>,
    mode: Mode,
    flip_count: u32,
    outcome: Outcome,
    seed: u64,
}

impl GameSession {
    /// Starts a session on `board`. `seed` drives the boards generated by later resets.
    pub fn new(board: Board, seed: u64) -> Self {
        Self {
            board,
            flipped: BTreeSet::new(),
            marked: BTreeSet::new(),
            blocked: BTreeSet::new(),
            mode: Mode::default(),
            flip_count: 0,
            outcome: Outcome::default(),
            seed,
        }
    }

    /// Starts a session on a random board with `dimension` cells per side.
    pub fn start(dimension: Coord, seed: u64) -> Result<Self> {
        let size = BoardSize::new(dimension)?;
        let board = RandomBoardGenerator::new(seed).generate(size)?;
        Ok(Self::new(board, seed))
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn flipped(&self) -> &BTreeSet<Coord2> {
        &self.flipped
    }

    pub fn marked(&self) -> &BTreeSet<Coord2> {
        &self.marked
    }

    pub fn blocked(&self) -> &BTreeSet<Coord2> {
        &self.blocked
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn flip_count(&self) -> u32 {
        self.flip_count
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_finished()
    }

    pub fn view(&self) -> SessionView<'_> {
        SessionView::new(self)
    }

    pub fn status_message(&self) -> &'static str {
        match self.outcome {
            Outcome::Playing if self.flip_count == 0 => "New game started. Find the King!",
            Outcome::Playing => "Keep looking!",
            Outcome::Won => "You found the King!",
            Outcome::Lost => "Game Over! Try again.",
        }
    }

    /// Turns a cell face up. Ignored unless playing in [`Mode::None`] on a cell
    /// that is neither flipped nor blocked.
    pub fn flip(&mut self, coords: Coord2) -> Result<FlipOutcome> {
        let coords = self.board.validate_coords(coords)?;

        if self.outcome.is_finished()
            || self.mode != Mode::None
            || self.blocked.contains(&coords)
            || !self.flipped.insert(coords)
        {
            return Ok(FlipOutcome::NoChange);
        }

        self.flip_count += 1;
        let piece = self.board[coords];
        log::debug!(
            "Flip #{} at {:?} revealed {:?}",
            self.flip_count,
            coords,
            piece
        );

        if piece.is_king() {
            self.outcome = Outcome::Won;
            log::debug!("King found after {} flips", self.flip_count);
            return Ok(FlipOutcome::Won(CompletionEvent {
                game_id: GAME_ID.into(),
                size_metric: self.board.total_cells(),
                value: self.flip_count,
            }));
        }

        if self.flipped.len() == usize::from(self.board.total_cells()) - 1 {
            self.outcome = Outcome::Lost;
            log::debug!("Every other cell flipped, king was at {:?}", self.board.king());
            Ok(FlipOutcome::Lost(piece))
        } else {
            Ok(FlipOutcome::Revealed(piece))
        }
    }

    /// Same as [`flip`](Self::flip), handing a completion to `listener`.
    pub fn flip_notify<L>(&mut self, coords: Coord2, listener: &mut L) -> Result<FlipOutcome>
    where
        L: CompletionListener + ?Sized,
    {
        let outcome = self.flip(coords)?;
        if let Some(event) = outcome.completion() {
            listener.on_completion(event);
        }
        Ok(outcome)
    }

    /// Toggles the mark on a cell while in [`Mode::Mark`]. A new mark lifts any block.
    pub fn mark(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.board.validate_coords(coords)?;
        if self.mode != Mode::Mark || self.outcome.is_finished() {
            return Ok(MarkOutcome::NoChange);
        }
        Ok(toggle(&mut self.marked, &mut self.blocked, coords))
    }

    /// Toggles the block on a cell while in [`Mode::Block`]. A new block lifts any mark.
    pub fn block(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.board.validate_coords(coords)?;
        if self.mode != Mode::Block || self.outcome.is_finished() {
            return Ok(MarkOutcome::NoChange);
        }
        Ok(toggle(&mut self.blocked, &mut self.marked, coords))
    }

    /// Routes a click on a cell to flip, mark or block depending on the mode.
    pub fn activate<L>(&mut self, coords: Coord2, listener: &mut L) -> Result<ActionOutcome>
    where
        L: CompletionListener + ?Sized,
    {
        Ok(match self.mode {
            Mode::None => ActionOutcome::Flip(self.flip_notify(coords, listener)?),
            Mode::Mark => ActionOutcome::Mark(self.mark(coords)?),
            Mode::Block => ActionOutcome::Block(self.block(coords)?),
        })
    }

    pub fn set_mode(&mut self, mode: Mode) {
        if self.mode != mode {
            log::trace!("mode {:?} -> {:?}", self.mode, mode);
        }
        self.mode = mode;
    }

    /// Enters `mode`, or leaves it for [`Mode::None`] when it is already active.
    pub fn toggle_mode(&mut self, mode: Mode) {
        if self.mode == mode {
            self.set_mode(Mode::None);
        } else {
            self.set_mode(mode);
        }
    }

    /// Starts over on a fresh random board. An unsupported size leaves the
    /// current session as it was.
    pub fn reset(&mut self, dimension: Coord) -> Result<()> {
        let size = BoardSize::new(dimension)?;
        let seed = self.next_seed();
        self.reset_with(RandomBoardGenerator::new(seed), size)
    }

    pub fn reset_with<G: BoardGenerator>(&mut self, generator: G, size: BoardSize) -> Result<()> {
        let board = generator.generate(size)?;
        log::debug!("New {}x{} game", board.dimension(), board.dimension());
        *self = Self::new(board, self.seed);
        Ok(())
    }

    fn next_seed(&mut self) -> u64 {
        let mut rng = SmallRng::seed_from_u64(self.seed);
        self.seed = rng.random();
        self.seed
    }
}

/// Toggles `coords` in `set`, taking it out of `other` when it gets added.
fn toggle(set: &mut BTreeSet<Coord2>, other: &mut BTreeSet<Coord2>, coords: Coord2) -> MarkOutcome {
    if set.remove(&coords) {
        MarkOutcome::Cleared
    } else {
        set.insert(coords);
        other.remove(&coords);
        MarkOutcome::Set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn session(dimension: Coord, king: Coord2) -> GameSession {
        let size = BoardSize::new(dimension).unwrap();
        GameSession::new(FixedKingGenerator::new(king).generate(size).unwrap(), 0)
    }

    #[derive(Default)]
    struct Collect(Vec<CompletionEvent>);

    impl CompletionListener for Collect {
        fn on_completion(&mut self, event: &CompletionEvent) {
            self.0.push(event.clone());
        }
    }

    #[test]
    fn flipping_king_wins_and_reports_once() {
        let mut session = session(4, (2, 1));
        let mut listener = Collect::default();

        assert_eq!(
            session.flip_notify((1, 3), &mut listener).unwrap(),
            FlipOutcome::Revealed(Piece::Knight)
        );
        let outcome = session.flip_notify((2, 1), &mut listener).unwrap();

        assert_eq!(session.outcome(), Outcome::Won);
        assert_eq!(session.flip_count(), 2);
        assert!(matches!(outcome, FlipOutcome::Won(_)));
        assert_eq!(
            listener.0,
            [CompletionEvent {
                game_id: GAME_ID.into(),
                size_metric: 16,
                value: 2,
            }]
        );

        assert_eq!(
            session.flip_notify((3, 3), &mut listener).unwrap(),
            FlipOutcome::NoChange
        );
        assert_eq!(listener.0.len(), 1);
        assert_eq!(session.flip_count(), 2);
    }

    #[test]
    fn repeated_flip_is_ignored() {
        let mut session = session(4, (0, 0));

        session.flip((3, 3)).unwrap();
        assert_eq!(session.flip((3, 3)).unwrap(), FlipOutcome::NoChange);
        assert_eq!(session.flip_count(), 1);
    }

    #[test]
    fn flip_ignored_outside_none_mode_and_on_blocked_cells() {
        let mut session = session(4, (0, 0));

        session.set_mode(Mode::Block);
        assert_eq!(session.block((1, 1)).unwrap(), MarkOutcome::Set);
        assert_eq!(session.flip((2, 2)).unwrap(), FlipOutcome::NoChange);

        session.set_mode(Mode::None);
        assert_eq!(session.flip((1, 1)).unwrap(), FlipOutcome::NoChange);
        assert_eq!(session.flip_count(), 0);
        assert!(session.flipped().is_empty());
    }

    #[test]
    fn flip_rejects_out_of_bounds() {
        let mut session = session(3, (0, 0));
        assert_eq!(session.flip((0, 3)), Err(GameError::InvalidCoords));
        assert_eq!(session.flip_count(), 0);
    }

    #[test]
    fn flipping_every_other_cell_loses() {
        let mut session = session(3, (1, 1));
        let others: Vec<_> = session
            .board()
            .iter()
            .map(|(coords, _)| coords)
            .filter(|&coords| coords != (1, 1))
            .collect();

        let (last, rest) = others.split_last().unwrap();
        for &coords in rest {
            assert!(matches!(session.flip(coords).unwrap(), FlipOutcome::Revealed(_)));
            assert_eq!(session.outcome(), Outcome::Playing);
        }
        assert!(matches!(session.flip(*last).unwrap(), FlipOutcome::Lost(_)));
        assert_eq!(session.outcome(), Outcome::Lost);
        assert_eq!(session.flip((1, 1)).unwrap(), FlipOutcome::NoChange);
    }

    #[test]
    fn mark_and_block_are_exclusive() {
        let mut session = session(4, (0, 0));

        session.set_mode(Mode::Mark);
        assert_eq!(session.mark((2, 3)).unwrap(), MarkOutcome::Set);
        session.set_mode(Mode::Block);
        assert_eq!(session.block((2, 3)).unwrap(), MarkOutcome::Set);
        assert!(session.marked().is_empty());
        assert!(session.blocked().contains(&(2, 3)));

        session.set_mode(Mode::Mark);
        assert_eq!(session.mark((2, 3)).unwrap(), MarkOutcome::Set);
        assert!(session.blocked().is_empty());

        assert_eq!(session.mark((2, 3)).unwrap(), MarkOutcome::Cleared);
        assert!(session.marked().is_empty());
    }

    #[test]
    fn mark_requires_mark_mode() {
        let mut session = session(4, (0, 0));

        assert_eq!(session.mark((1, 1)).unwrap(), MarkOutcome::NoChange);
        session.set_mode(Mode::Block);
        assert_eq!(session.mark((1, 1)).unwrap(), MarkOutcome::NoChange);
        assert!(session.marked().is_empty());
    }

    #[test]
    fn mode_switch_keeps_marks() {
        let mut session = session(4, (0, 0));

        session.set_mode(Mode::Mark);
        session.mark((3, 3)).unwrap();
        session.set_mode(Mode::Block);
        session.set_mode(Mode::None);

        assert!(session.marked().contains(&(3, 3)));
    }

    #[test]
    fn toggle_mode_returns_to_none() {
        let mut session = session(4, (0, 0));

        session.toggle_mode(Mode::Mark);
        assert_eq!(session.mode(), Mode::Mark);
        session.toggle_mode(Mode::Block);
        assert_eq!(session.mode(), Mode::Block);
        session.toggle_mode(Mode::Block);
        assert_eq!(session.mode(), Mode::None);
    }

    #[test]
    fn activate_follows_mode() {
        let mut session = session(4, (0, 0));
        let mut listener = Collect::default();

        session.set_mode(Mode::Mark);
        assert_eq!(
            session.activate((1, 3), &mut listener).unwrap(),
            ActionOutcome::Mark(MarkOutcome::Set)
        );
        session.set_mode(Mode::None);
        assert_eq!(
            session.activate((1, 3), &mut listener).unwrap(),
            ActionOutcome::Flip(FlipOutcome::Revealed(Piece::Empty))
        );
        let outcome = session.activate((0, 0), &mut listener).unwrap();
        assert!(matches!(outcome, ActionOutcome::Flip(FlipOutcome::Won(_))));
        assert_eq!(listener.0.len(), 1);
    }

    #[test]
    fn finished_session_ignores_marks() {
        let mut session = session(4, (0, 0));
        session.flip((0, 0)).unwrap();

        session.set_mode(Mode::Mark);
        assert_eq!(session.mark((1, 1)).unwrap(), MarkOutcome::NoChange);
        session.set_mode(Mode::Block);
        assert_eq!(session.block((1, 1)).unwrap(), MarkOutcome::NoChange);
    }

    #[test]
    fn reset_clears_everything() {
        let mut session = session(4, (0, 0));
        session.set_mode(Mode::Mark);
        session.mark((3, 3)).unwrap();
        session.set_mode(Mode::None);
        session.flip((0, 0)).unwrap();

        session.reset(6).unwrap();

        assert_eq!(session.board().dimension(), 6);
        assert_eq!(session.flip_count(), 0);
        assert_eq!(session.outcome(), Outcome::Playing);
        assert_eq!(session.mode(), Mode::None);
        assert!(session.flipped().is_empty());
        assert!(session.marked().is_empty());
        assert!(session.blocked().is_empty());
    }

    #[test]
    fn reset_with_bad_size_keeps_session() {
        let mut session = session(4, (0, 0));
        session.flip((3, 3)).unwrap();
        let before = session.clone();

        assert_eq!(session.reset(10), Err(GameError::InvalidSize(10)));
        assert_eq!(session, before);
    }

    #[test]
    fn status_message_tracks_outcome() {
        let mut session = session(4, (0, 0));
        assert_eq!(session.status_message(), "New game started. Find the King!");
        session.flip((3, 3)).unwrap();
        assert_eq!(session.status_message(), "Keep looking!");
        session.flip((0, 0)).unwrap();
        assert_eq!(session.status_message(), "You found the King!");
    }

    #[test]
    fn start_uses_seed_deterministically() {
        let a = GameSession::start(5, 42).unwrap();
        let b = GameSession::start(5, 42).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.board().dimension(), 5);
    }
}
