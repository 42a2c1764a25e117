//! High score leaderboard and the score-persistence boundary
//!
//! The core never touches storage: the host hands raw values in and carries
//! the serialized leaderboard out. Validation lives here so a corrupt or
//! implausible value is rejected before it can reach storage; the in-memory
//! session score is never affected by a rejection.

use serde::{Deserialize, Serialize};

use crate::consts::MAX_PLAUSIBLE_SCORE;
use crate::sim::Difficulty;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// Validate a raw score value arriving at the persistence boundary.
///
/// NaN, infinite, negative, or implausibly large (> 1,000,000) values are
/// rejected; the caller is notified via `None` and a warning is logged.
pub fn sanitize_score(raw: f64) -> Option<u64> {
    if !raw.is_finite() || raw < 0.0 {
        log::warn!("rejected non-finite or negative score: {raw}");
        return None;
    }
    let score = raw as u64;
    if score > MAX_PLAUSIBLE_SCORE {
        log::warn!("rejected implausible score: {score}");
        return None;
    }
    Some(score)
}

/// A single high score entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u64,
    pub difficulty: Difficulty,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

/// High score leaderboard
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if it doesn't qualify)
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Validate and insert a raw score from the host. Returns the rank
    /// achieved (1-indexed), or None if the value was rejected or did not
    /// qualify.
    pub fn submit(&mut self, raw: f64, difficulty: Difficulty, timestamp: f64) -> Option<usize> {
        let score = sanitize_score(raw)?;
        self.add_score(score, difficulty, timestamp)
    }

    /// Insert an already-validated score (sorted descending, truncated to
    /// the top 10). Returns the rank achieved or None if it didn't qualify.
    pub fn add_score(
        &mut self,
        score: u64,
        difficulty: Difficulty,
        timestamp: f64,
    ) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = HighScoreEntry {
            score,
            difficulty,
            timestamp,
        };

        let pos = self.entries.iter().position(|e| score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_HIGH_SCORES);
        log::info!("high score rank {rank}: {score} ({})", difficulty.as_str());
        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Serialize for the storage collaborator
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Deserialize from the storage collaborator; a corrupt payload yields
    /// a fresh empty leaderboard rather than an error surface.
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(scores) => scores,
            Err(err) => {
                log::warn!("corrupt leaderboard payload, starting fresh: {err}");
                Self::new()
            }
        }
    }
}
