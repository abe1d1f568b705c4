//! Score ledger
//!
//! Top 10 run results, persisted as a JSON list of `{score, timestamp}`.
//! A missing or corrupt file loads as an empty ledger, and save failures
//! are logged rather than propagated into the game loop.

use std::fs;
use std::path::Path;

use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;

/// Maximum number of ranked scores to keep
pub const MAX_RANKED_SCORES: usize = 10;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A single ranked run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub score: u64,
    /// Local time the run ended (`YYYY-MM-DD HH:MM:SS`)
    #[serde(alias = "date")]
    pub timestamp: String,
}

/// Ranked scores, highest first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreLedger {
    entries: Vec<ScoreRecord>,
}

impl ScoreLedger {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn entries(&self) -> &[ScoreRecord] {
        &self.entries
    }

    /// Check if a score would make the board
    pub fn qualifies(&self, score: u64) -> bool {
        if self.entries.len() < MAX_RANKED_SCORES {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Rank a score would achieve (1-indexed), None if it doesn't qualify
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Insert a score (ties rank after existing equal scores).
    /// Returns the rank achieved or None if it didn't qualify.
    pub fn add_score(&mut self, score: u64, timestamp: String) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = ScoreRecord { score, timestamp };
        let rank = match self.entries.iter().position(|e| score > e.score) {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };
        self.entries.truncate(MAX_RANKED_SCORES);

        Some(rank)
    }

    /// Record a finished run stamped with the current local time and write
    /// the ledger to `path`. Write errors are logged, never returned.
    pub fn record(&mut self, score: u64, path: &Path) -> Option<usize> {
        let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
        let rank = self.add_score(score, timestamp);

        if let Err(e) = self.save(path) {
            log::error!("Could not save scores to {}: {}", path.display(), e);
        }
        rank
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Load, treating a missing or unreadable file as an empty ledger
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(ledger) => {
                log::info!("Loaded {} ranked scores", ledger.len());
                ledger
            }
            Err(LedgerError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No score file at {}, starting fresh", path.display());
                Self::new()
            }
            Err(e) => {
                log::warn!("Ignoring score file {}: {}", path.display(), e);
                Self::new()
            }
        }
    }

    /// Strict load. Entries are re-ranked in case the file was edited by hand.
    pub fn try_load(path: &Path) -> Result<Self, LedgerError> {
        let text = fs::read_to_string(path)?;
        let mut ledger: ScoreLedger = serde_json::from_str(&text)?;
        ledger.entries.sort_by(|a, b| b.score.cmp(&a.score));
        ledger.entries.truncate(MAX_RANKED_SCORES);
        Ok(ledger)
    }

    pub fn save(&self, path: &Path) -> Result<(), LedgerError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("Scores saved ({} entries)", self.entries.len());
        Ok(())
    }
}
