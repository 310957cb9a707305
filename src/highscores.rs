//! Score history
//!
//! Every finished run is appended; the high score is the best of them.
//! Kept in memory for the lifetime of the process only.

use serde::{Deserialize, Serialize};

/// One finished run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Final score
    pub score: u64,
    /// Level reached
    pub level: u32,
}

/// Append-only history of final scores
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    /// In the order the runs finished
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Create empty history
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append a final score
    ///
    /// Returns true when it ties or beats every earlier run (the first run is
    /// always a new best).
    pub fn record(&mut self, score: u64, level: u32) -> bool {
        let is_best = self.best().is_none_or(|best| score >= best);
        self.entries.push(HighScoreEntry { score, level });
        is_best
    }

    /// The best score so far (if any)
    pub fn best(&self) -> Option<u64> {
        self.entries.iter().map(|e| e.score).max()
    }

    /// Up to `n` entries, best first; ties keep finishing order
    pub fn top(&self, n: usize) -> Vec<HighScoreEntry> {
        let mut sorted = self.entries.clone();
        sorted.sort_by(|a, b| b.score.cmp(&a.score));
        sorted.truncate(n);
        sorted
    }

    /// The rank a score would take among recorded runs (1-indexed)
    pub fn rank_of(&self, score: u64) -> usize {
        self.entries.iter().filter(|e| e.score > score).count() + 1
    }

    /// Number of finished runs
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no run has finished yet
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
