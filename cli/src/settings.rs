use anyhow::{Context, Result};
use chess_solitaire_core::{BoardSize, CellCount};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Values read from the optional TOML settings file. Missing keys keep their defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Board size in total cells.
    pub default_size: CellCount,
    pub stats_path: PathBuf,
    pub seed: Option<u64>,
}

impl Settings {
    pub const DEFAULT_STATS_PATH: &'static str = "chess-solitaire-stats.json";

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings from {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("invalid settings in {}", path.display()))
    }

    pub fn board_size(&self) -> Result<BoardSize> {
        BoardSize::from_total_cells(self.default_size)
            .with_context(|| format!("default_size = {} is not a supported board", self.default_size))
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_size: BoardSize::DEFAULT.total_cells(),
            stats_path: PathBuf::from(Self::DEFAULT_STATS_PATH),
            seed: None,
        }
    }
}
