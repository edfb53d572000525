//! High score leaderboard
//!
//! Top 10 runs by score, stored in the player profile.

use serde::{Deserialize, Serialize};

use crate::sim::GameMode;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single finished run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u64,
    /// Wave reached (difficulty step in Command mode)
    pub wave: u32,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
    #[serde(default)]
    pub mode: GameMode,
}

/// Leaderboard, sorted by descending score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a score would make the board
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().is_none_or(|e| score > e.score)
    }

    /// Rank a score would get (1-indexed), None if it doesn't qualify
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Record a finished run. Returns the rank achieved (1-indexed) or None.
    ///
    /// Ties keep the older entry ahead.
    pub fn add_score(
        &mut self,
        score: u64,
        wave: u32,
        timestamp: f64,
        mode: GameMode,
    ) -> Option<usize> {
        let rank = self.potential_rank(score)?;
        self.entries.insert(
            rank - 1,
            HighScoreEntry {
                score,
                wave,
                timestamp,
                mode,
            },
        );
        self.entries.truncate(MAX_HIGH_SCORES);
        log::info!("New high score #{}: {} (wave {})", rank, score, wave);
        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Furthest wave on the board
    pub fn best_wave(&self) -> Option<u32> {
        self.entries.iter().map(|e| e.wave).max()
    }

    /// Drop anything that breaks ordering or size (hand-edited saves)
    pub fn normalize(&mut self) {
        self.entries.retain(|e| e.score > 0);
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(MAX_HIGH_SCORES);
    }
}

/// Format a timestamp relative to `now` (both Unix ms)
pub fn format_date(timestamp: f64, now: f64) -> String {
    let mins = ((now - timestamp) / 60_000.0).max(0.0).floor() as u64;
    let hours = mins / 60;
    let days = hours / 24;

    match (days, hours, mins) {
        (0, 0, 0) => "Just now".to_string(),
        (0, 0, 1) => "1 min ago".to_string(),
        (0, 0, m) => format!("{} mins ago", m),
        (0, 1, _) => "1 hour ago".to_string(),
        (0, h, _) => format!("{} hours ago", h),
        (1, _, _) => "Yesterday".to_string(),
        (d, _, _) if d < 7 => format!("{} days ago", d),
        (d, _, _) if d < 14 => "Last week".to_string(),
        (d, _, _) => format!("{} weeks ago", d / 7),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_and_capped() {
        let mut scores = HighScores::new();
        for score in [500, 100, 900, 300, 700, 200, 800, 400, 600, 1000, 50] {
            scores.add_score(score, 1, 0.0, GameMode::Arcade);
        }
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(scores.top_score(), Some(1000));
        // 50 never made it
        assert_eq!(scores.entries.last().map(|e| e.score), Some(100));
        assert!(!scores.qualifies(100));
        assert_eq!(scores.potential_rank(650), Some(5));
    }

    #[test]
    fn test_zero_never_qualifies() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add_score(0, 3, 0.0, GameMode::Command), None);
        assert!(scores.is_empty());
    }

    #[test]
    fn test_tie_goes_after_existing() {
        let mut scores = HighScores::new();
        scores.add_score(300, 2, 1.0, GameMode::Arcade);
        assert_eq!(scores.add_score(300, 5, 2.0, GameMode::Arcade), Some(2));
        assert_eq!(scores.entries[0].timestamp, 1.0);
        assert_eq!(scores.best_wave(), Some(5));
    }

    #[test]
    fn test_normalize() {
        let mut scores = HighScores {
            entries: (0..15)
                .map(|i| HighScoreEntry {
                    score: i * 10,
                    wave: 1,
                    timestamp: 0.0,
                    mode: GameMode::Arcade,
                })
                .collect(),
        };
        scores.normalize();
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(scores.top_score(), Some(140));
        assert!(scores.entries.iter().all(|e| e.score > 0));
    }

    #[test]
    fn test_format_date() {
        let now = 10.0 * 86_400_000.0;
        assert_eq!(format_date(now - 5_000.0, now), "Just now");
        assert_eq!(format_date(now - 120_000.0, now), "2 mins ago");
        assert_eq!(format_date(now - 3_600_000.0, now), "1 hour ago");
        assert_eq!(format_date(now - 86_400_000.0, now), "Yesterday");
        assert_eq!(format_date(now - 3.0 * 86_400_000.0, now), "3 days ago");
        assert_eq!(format_date(0.0, now), "Last week");
        assert_eq!(format_date(0.0, 3.0 * now), "4 weeks ago");
    }
}
