use anyhow::{Context, Result, anyhow, bail};
use chess_solitaire_core::*;
use std::io::{BufRead, Write};
use std::str::FromStr;

const HELP: &str = "\
commands:
  flip R C          turn a card face up
  mark R C          toggle a mark (mark mode only)
  block R C         toggle a block (block mode only)
  click R C         flip, mark or block depending on the mode
  mode none|mark|block
  toggle mark|block switch a mode on, or back off
  new [CELLS]       start over, optionally on another board size
  help
  quit";

#[derive(Clone, Debug, PartialEq)]
pub enum PlayCommand {
    Flip(Coord2),
    Mark(Coord2),
    Block(Coord2),
    Click(Coord2),
    Mode(Mode),
    Toggle(Mode),
    New(Option<BoardSize>),
    Help,
    Quit,
}

fn parse_coords<'a>(mut words: impl Iterator<Item = &'a str>) -> Result<Coord2> {
    let mut next = |axis: &str| -> Result<Coord> {
        let word = words.next().ok_or_else(|| anyhow!("missing {axis}"))?;
        word.parse().with_context(|| format!("bad {axis} {word:?}"))
    };
    let row = next("row")?;
    let col = next("column")?;
    Ok((row, col))
}

fn parse_mode(word: Option<&str>) -> Result<Mode> {
    match word {
        Some("none") => Ok(Mode::None),
        Some("mark") => Ok(Mode::Mark),
        Some("block") => Ok(Mode::Block),
        Some(other) => bail!("unknown mode {other:?}"),
        None => bail!("missing mode"),
    }
}

impl FromStr for PlayCommand {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let command = words.next().unwrap_or("help").to_lowercase();

        Ok(match command.as_str() {
            "flip" | "f" => Self::Flip(parse_coords(words)?),
            "mark" | "m" => Self::Mark(parse_coords(words)?),
            "block" | "b" => Self::Block(parse_coords(words)?),
            "click" | "c" => Self::Click(parse_coords(words)?),
            "mode" => Self::Mode(parse_mode(words.next())?),
            "toggle" | "t" => match parse_mode(words.next())? {
                Mode::None => bail!("only mark or block can be toggled"),
                mode => Self::Toggle(mode),
            },
            "new" | "n" => match words.next() {
                Some(cells) => {
                    let cells = cells
                        .parse()
                        .with_context(|| format!("bad board size {cells:?}"))?;
                    Self::New(Some(BoardSize::from_total_cells(cells)?))
                }
                None => Self::New(None),
            },
            "help" | "h" | "?" => Self::Help,
            "quit" | "q" | "exit" => Self::Quit,
            other => bail!("unknown command {other:?}, try \"help\""),
        })
    }
}

fn glyph(cell: CellView) -> char {
    match cell {
        CellView::Revealed { piece, .. } => piece.symbol(),
        CellView::Hidden { blocked: true, .. } => '#',
        CellView::Hidden { marked: true, .. } => '*',
        CellView::Hidden { .. } => '?',
    }
}

fn render<W: Write>(session: &GameSession, out: &mut W) -> Result<()> {
    let view = session.view();
    let dimension = view.dimension();

    write!(out, "  ")?;
    for col in 0..dimension {
        write!(out, " {col}")?;
    }
    writeln!(out)?;
    for row in 0..dimension {
        write!(out, "{row:>2}")?;
        for col in 0..dimension {
            write!(out, " {}", glyph(view.cell((row, col))))?;
        }
        writeln!(out)?;
    }

    let mode = match view.mode {
        Mode::None => "flip",
        Mode::Mark => "mark",
        Mode::Block => "block",
    };
    writeln!(out, "mode: {mode}  flips: {}", view.flip_count)?;
    writeln!(out, "{}", session.status_message())?;
    if view.outcome == Outcome::Lost {
        let (row, col) = view.board.king();
        writeln!(out, "The king was hiding at {row} {col}.")?;
    }
    Ok(())
}

/// Reads commands from `input` until it ends or the player quits. Completed
/// games go to `recorder`.
pub fn run<S, R, W>(
    size: BoardSize,
    seed: u64,
    recorder: &mut StatsRecorder<S>,
    input: R,
    mut out: W,
) -> Result<()>
where
    S: StatsStore,
    R: BufRead,
    W: Write,
{
    let mut session = GameSession::start(size.dimension(), seed)?;
    render(&session, &mut out)?;

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<PlayCommand>() {
            Ok(command) => command,
            Err(err) => {
                writeln!(out, "{err:#}")?;
                continue;
            }
        };
        log::trace!("command: {:?}", command);

        let changed = match command {
            PlayCommand::Flip(coords) => session
                .flip_notify(coords, recorder)
                .map(|outcome| outcome.has_update()),
            PlayCommand::Mark(coords) => session.mark(coords).map(MarkOutcome::has_update),
            PlayCommand::Block(coords) => session.block(coords).map(MarkOutcome::has_update),
            PlayCommand::Click(coords) => session
                .activate(coords, recorder)
                .map(|outcome| outcome.has_update()),
            PlayCommand::Mode(mode) => {
                session.set_mode(mode);
                Ok(true)
            }
            PlayCommand::Toggle(mode) => {
                session.toggle_mode(mode);
                Ok(true)
            }
            PlayCommand::New(size) => {
                let dimension = size.unwrap_or(session.board().size()).dimension();
                session.reset(dimension).map(|()| true)
            }
            PlayCommand::Help => {
                writeln!(out, "{HELP}")?;
                continue;
            }
            PlayCommand::Quit => break,
        };

        match changed {
            Ok(true) => render(&session, &mut out)?,
            Ok(false) => writeln!(out, "Nothing happened.")?,
            Err(err) => writeln!(out, "{err}")?,
        }
    }

    Ok(())
}
