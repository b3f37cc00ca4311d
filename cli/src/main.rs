use anyhow::Result;
use chess_solitaire_core::{BoardSize, CellCount, StatsRecorder};
use clap::{Parser, Subcommand};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::settings::Settings;
use crate::store::JsonFileStore;

mod play;
mod settings;
mod stats;
mod store;

#[derive(Parser, Debug)]
#[command(version, about = "Find the king hidden among the threats", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Settings file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Where completed games are recorded, overrides the settings file
    #[arg(long)]
    stats: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play a game in the terminal (default)
    Play {
        /// Board size in total cells: 9, 16, 25, 36, 49 or 64
        #[arg(short, long)]
        size: Option<CellCount>,

        /// Force a seed instead of random
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Show or reset recorded stats
    #[command(subcommand)]
    Stats(stats::StatsCommand),
}

fn init_logging(verbose: &clap_verbosity_flag::Verbosity) {
    let filter = EnvFilter::builder()
        .with_default_directive(verbose.tracing_level_filter().into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.verbose);

    let mut settings = match &args.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    if let Some(stats_path) = args.stats {
        settings.stats_path = stats_path;
    }
    log::debug!("settings: {:?}", settings);

    let mut recorder = StatsRecorder::new(JsonFileStore::new(&settings.stats_path));
    log::debug!("stats file: {}", recorder.store().path().display());
    let command = args.command.unwrap_or(Command::Play {
        size: None,
        seed: None,
    });

    match command {
        Command::Play { size, seed } => {
            let size = match size {
                Some(cells) => BoardSize::from_total_cells(cells)?,
                None => settings.board_size()?,
            };
            let seed = seed.or(settings.seed).unwrap_or_else(rand::random);
            log::debug!("seed: {}", seed);

            play::run(size, seed, &mut recorder, io::stdin().lock(), io::stdout().lock())
        }
        Command::Stats(command) => stats::run(command, &mut recorder, io::stdout().lock()),
    }
}
