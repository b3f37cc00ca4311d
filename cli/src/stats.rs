use anyhow::Result;
use chess_solitaire_core::{BoardSize, CellCount, StatsRecorder, StatsStore};
use clap::Subcommand;
use std::io::Write;

#[derive(Subcommand, Debug)]
pub enum StatsCommand {
    /// List every game with recorded stats and its board sizes
    List,

    /// Show the stats of one game and board size
    Show {
        game: String,
        /// Board size in total cells
        size: CellCount,
    },

    /// Forget the stats of one game and board size
    Reset {
        game: String,
        /// Board size in total cells
        size: CellCount,
    },

    /// Forget all stats of all games
    ResetAll,
}

/// `16 (4x4)`, or just the number for sizes the game does not offer.
fn size_label(size: CellCount) -> String {
    match BoardSize::from_total_cells(size) {
        Ok(board) => format!("{} ({}x{})", size, board.dimension(), board.dimension()),
        Err(_) => size.to_string(),
    }
}

pub fn run<S, W>(command: StatsCommand, recorder: &mut StatsRecorder<S>, mut out: W) -> Result<()>
where
    S: StatsStore,
    W: Write,
{
    match command {
        StatsCommand::List => {
            let games = recorder.list_games();
            if games.is_empty() {
                writeln!(out, "No stats recorded yet.")?;
            }
            for game in games {
                let sizes: Vec<_> = recorder
                    .list_sizes(&game)
                    .into_iter()
                    .map(size_label)
                    .collect();
                writeln!(out, "{}: {}", game, sizes.join(", "))?;
            }
        }
        StatsCommand::Show { game, size } => {
            let entry = recorder.get(&game, size);
            writeln!(out, "{} {}", game, size_label(size))?;
            writeln!(out, "  games played: {}", entry.games_played)?;
            writeln!(out, "  total:        {}", entry.total_value)?;
            writeln!(out, "  average:      {}", entry.average_value)?;
        }
        StatsCommand::Reset { game, size } => {
            if recorder.reset(&game, size) {
                writeln!(out, "Stats for {} {} reset.", game, size_label(size))?;
            } else {
                writeln!(out, "No stats for {} {} to reset.", game, size_label(size))?;
            }
        }
        StatsCommand::ResetAll => {
            if recorder.reset_all() {
                writeln!(out, "All statistics have been reset.")?;
            } else {
                writeln!(out, "An error occurred while resetting all stats.")?;
            }
        }
    }
    Ok(())
}
