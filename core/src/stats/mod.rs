//! Running per-game, per-board-size statistics fed by completion events.
//!
//! The persisted document is keyed by game id, then by total cell count:
//!
//! ```json
//! { "chessSolitaire": { "16": { "gamesPlayed": 3, "totalValue": 18, "averageValue": "6.00" } } }
//! ```

use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;
pub use store::*;

mod store;

/// Count, sum and mean of the values recorded for one game and board size.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsEntry {
    pub games_played: u32,
    pub total_value: u64,
    /// Mean rounded half up to two decimals, e.g. `"6.00"`.
    pub average_value: String,
}

impl StatsEntry {
    pub fn add(&mut self, value: u32) {
        self.games_played += 1;
        self.total_value += u64::from(value);
        self.average_value = format_average(self.total_value, self.games_played);
    }
}

impl Default for StatsEntry {
    fn default() -> Self {
        Self {
            games_played: 0,
            total_value: 0,
            average_value: "0.00".to_string(),
        }
    }
}

fn format_average(total: u64, count: u32) -> String {
    if count == 0 {
        return "0.00".to_string();
    }
    let count = u64::from(count);
    let hundredths = (total * 200 + count) / (2 * count);
    format!("{}.{:02}", hundredths / 100, hundredths % 100)
}

/// Every recorded entry, game id first, then total cell count.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatsBook {
    games: BTreeMap<String, BTreeMap<CellCount, StatsEntry>>,
}

impl StatsBook {
    pub fn record(&mut self, game_id: &str, size: CellCount, value: u32) -> &StatsEntry {
        let entry = self
            .games
            .entry(game_id.to_string())
            .or_default()
            .entry(size)
            .or_default();
        entry.add(value);
        entry
    }

    pub fn get(&self, game_id: &str, size: CellCount) -> Option<&StatsEntry> {
        self.games.get(game_id)?.get(&size)
    }

    /// Drops one entry, and the game with it once it has no sizes left.
    pub fn remove(&mut self, game_id: &str, size: CellCount) -> Option<StatsEntry> {
        let sizes = self.games.get_mut(game_id)?;
        let removed = sizes.remove(&size);
        if sizes.is_empty() {
            self.games.remove(game_id);
        }
        removed
    }

    pub fn games(&self) -> impl Iterator<Item = &str> {
        self.games.keys().map(String::as_str)
    }

    /// Sizes with stats for `game_id`, smallest first.
    pub fn sizes(&self, game_id: &str) -> Vec<CellCount> {
        self.games
            .get(game_id)
            .map(|sizes| sizes.keys().copied().collect())
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

/// Keeps a [`StatsBook`] in a [`StatsStore`], reloading it on every call.
///
/// Storage failures are logged and swallowed; callers only ever see defaults
/// or a `false` from the reset operations.
#[derive(Debug)]
pub struct StatsRecorder<S> {
    store: S,
}

impl<S: StatsStore> StatsRecorder<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn load(&self) -> StatsBook {
        match self.store.load() {
            Ok(book) => book.unwrap_or_default(),
            Err(err) => {
                log::error!("Could not load stats, starting empty: {}", err);
                StatsBook::default()
            }
        }
    }

    fn save(&mut self, book: &StatsBook) -> bool {
        match self.store.save(book) {
            Ok(()) => true,
            Err(err) => {
                log::error!("Could not save stats: {}", err);
                false
            }
        }
    }

    pub fn record(&mut self, game_id: &str, size: CellCount, value: u32) {
        let mut book = self.load();
        let entry = book.record(game_id, size, value);
        log::info!(
            "Stat updated: {}, size {}, value {}, new average {}",
            game_id,
            size,
            value,
            entry.average_value
        );
        self.save(&book);
    }

    /// Entry for the key, or the zeroed default when nothing was recorded.
    pub fn get(&self, game_id: &str, size: CellCount) -> StatsEntry {
        self.load().get(game_id, size).cloned().unwrap_or_default()
    }

    /// Whether an entry existed and was removed.
    pub fn reset(&mut self, game_id: &str, size: CellCount) -> bool {
        let mut book = self.load();
        let removed = book.remove(game_id, size).is_some();
        if removed {
            self.save(&book);
        }
        log::debug!("Stats reset for {} ({}): {}", game_id, size, removed);
        removed
    }

    pub fn reset_all(&mut self) -> bool {
        match self.store.clear() {
            Ok(()) => {
                log::debug!("All stats reset");
                true
            }
            Err(err) => {
                log::error!("Could not reset all stats: {}", err);
                false
            }
        }
    }

    pub fn list_games(&self) -> Vec<String> {
        self.load().games().map(String::from).collect()
    }

    pub fn list_sizes(&self, game_id: &str) -> Vec<CellCount> {
        self.load().sizes(game_id)
    }
}

impl<S: StatsStore> CompletionListener for StatsRecorder<S> {
    fn on_completion(&mut self, event: &CompletionEvent) {
        self.record(&event.game_id, event.size_metric, event.value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct BrokenStore;

    impl StatsStore for BrokenStore {
        fn load(&self) -> core::result::Result<Option<StatsBook>, StoreError> {
            Err(StoreError::Unavailable("offline".into()))
        }

        fn save(&mut self, _book: &StatsBook) -> core::result::Result<(), StoreError> {
            Err(StoreError::Unavailable("offline".into()))
        }

        fn clear(&mut self) -> core::result::Result<(), StoreError> {
            Err(StoreError::Unavailable("offline".into()))
        }
    }

    #[test]
    fn running_average() {
        let mut recorder = StatsRecorder::new(MemoryStore::default());
        for value in [5, 7, 6] {
            recorder.record("g", 16, value);
        }

        assert_eq!(
            recorder.get("g", 16),
            StatsEntry {
                games_played: 3,
                total_value: 18,
                average_value: "6.00".into(),
            }
        );
    }

    #[test]
    fn average_rounds_to_two_places() {
        assert_eq!(format_average(10, 3), "3.33");
        assert_eq!(format_average(20, 3), "6.67");
        assert_eq!(format_average(1, 8), "0.13");
        assert_eq!(format_average(7, 1), "7.00");
        assert_eq!(format_average(0, 0), "0.00");
    }

    #[test]
    fn unknown_key_reads_as_default() {
        let recorder = StatsRecorder::new(MemoryStore::default());
        assert_eq!(recorder.get("nothing", 9), StatsEntry::default());
        assert_eq!(recorder.get("nothing", 9).average_value, "0.00");
    }

    #[test]
    fn sizes_sorted_numerically() {
        let mut recorder = StatsRecorder::new(MemoryStore::default());
        for size in [64, 9, 25, 16] {
            recorder.record(GAME_ID, size, 3);
        }

        assert_eq!(recorder.list_sizes(GAME_ID), [9, 16, 25, 64]);
        assert_eq!(recorder.list_games(), [GAME_ID]);
        assert!(recorder.list_sizes("other").is_empty());
    }

    #[test]
    fn reset_removes_entry_then_game() {
        let mut recorder = StatsRecorder::new(MemoryStore::default());
        recorder.record("g", 9, 1);
        recorder.record("g", 16, 2);

        assert!(recorder.reset("g", 9));
        assert!(!recorder.reset("g", 9));
        assert_eq!(recorder.list_sizes("g"), [16]);

        assert!(recorder.reset("g", 16));
        assert!(recorder.list_games().is_empty());
    }

    #[test]
    fn reset_all_clears_store() {
        let mut recorder = StatsRecorder::new(MemoryStore::default());
        recorder.record("a", 9, 1);
        recorder.record("b", 16, 2);

        assert!(recorder.reset_all());
        assert!(recorder.list_games().is_empty());
    }

    #[test]
    fn broken_store_is_swallowed() {
        let mut recorder = StatsRecorder::new(BrokenStore);

        recorder.record("g", 16, 4);
        assert_eq!(recorder.get("g", 16), StatsEntry::default());
        assert!(!recorder.reset("g", 16));
        assert!(!recorder.reset_all());
        assert!(recorder.list_games().is_empty());
    }

    #[test]
    fn recorder_listens_to_session() {
        let board = FixedKingGenerator::new((1, 1))
            .generate(BoardSize::new(3).unwrap())
            .unwrap();
        let mut session = GameSession::new(board, 0);
        let mut recorder = StatsRecorder::new(MemoryStore::default());

        session.flip_notify((0, 0), &mut recorder).unwrap();
        session.flip_notify((1, 1), &mut recorder).unwrap();

        let entry = recorder.get(GAME_ID, 9);
        assert_eq!(entry.games_played, 1);
        assert_eq!(entry.total_value, 2);
    }
}
