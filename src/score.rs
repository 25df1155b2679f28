//! Persistence sink for final results. The game core only produces outcome
//! values; this store is the one place that touches disk.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Scoreboard {
    pub entries: Vec<ScoreEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub name: String,
    pub best_streak: u32,
}

/// JSON-file scoreboard keyed by player name, tracking the best solo win
/// streak per player.
pub struct HighscoreStore {
    path: PathBuf,
}

impl HighscoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// A missing file is an empty scoreboard, not an error.
    pub fn load(&self) -> Result<Scoreboard> {
        if !self.path.exists() {
            return Ok(Scoreboard::default());
        }
        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("reading scores from {}", self.path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("parsing scores in {}", self.path.display()))
    }

    /// Books a finished solo run. Returns true when `streak` is a new best
    /// for this player.
    pub fn record_streak(&self, name: &str, streak: u32) -> Result<bool> {
        let mut board = self.load()?;
        let improved = match board.entries.iter_mut().find(|e| e.name == name) {
            Some(entry) if streak > entry.best_streak => {
                entry.best_streak = streak;
                true
            }
            Some(_) => false,
            None => {
                board.entries.push(ScoreEntry { name: name.to_string(), best_streak: streak });
                true
            }
        };
        if improved {
            self.save(&board)?;
            debug!(player = name, streak, "new best streak recorded");
        }
        Ok(improved)
    }

    fn save(&self, board: &Scoreboard) -> Result<()> {
        let raw = serde_json::to_string_pretty(board)?;
        fs::write(&self.path, raw)
            .with_context(|| format!("writing scores to {}", self.path.display()))
    }
}

impl Default for HighscoreStore {
    fn default() -> Self {
        Self::new(Path::new(".gallows-scores.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> HighscoreStore {
        HighscoreStore::new(dir.path().join("scores.json"))
    }

    #[test]
    fn missing_file_is_an_empty_board() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert!(store.load().unwrap().entries.is_empty());
    }

    #[test]
    fn records_and_keeps_only_improvements() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        assert!(store.record_streak("Ada", 2).unwrap());
        assert!(!store.record_streak("Ada", 1).unwrap());
        assert!(store.record_streak("Ada", 5).unwrap());
        assert!(store.record_streak("Brook", 1).unwrap());

        let board = store.load().unwrap();
        assert_eq!(board.entries.len(), 2);
        let ada = board.entries.iter().find(|e| e.name == "Ada").unwrap();
        assert_eq!(ada.best_streak, 5);
    }
}
