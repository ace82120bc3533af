//! Session leaderboard
//!
//! Cosmetic opponents with random scores ranked against the live player.
//! Nothing here is simulated or persisted.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Rows shown on the board
pub const LEADERBOARD_SIZE: usize = 10;

/// One row on the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: u64,
    pub level: u32,
    /// Marks the live player's row
    pub is_player: bool,
}

/// Entries sorted descending by score
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Board pre-filled with `count` opponents named `Cosmic1..=CosmicN`,
    /// scores in 0..5000 and levels in 1..=5
    pub fn with_opponents<R: Rng>(count: usize, rng: &mut R) -> Self {
        let mut board = Self::new();
        board.entries = (1..=count)
            .map(|i| LeaderboardEntry {
                name: format!("Cosmic{i}"),
                score: rng.random_range(0..5000),
                level: rng.random_range(1..=5),
                is_player: false,
            })
            .collect();
        board.sort();
        board
    }

    fn sort(&mut self) {
        // Stable, so ties keep insertion order
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
    }

    /// Insert or refresh the player's row
    pub fn update_player(&mut self, name: &str, score: u64, level: u32) {
        match self.entries.iter_mut().find(|e| e.is_player) {
            Some(entry) => {
                entry.name = name.to_string();
                entry.score = score;
                entry.level = level;
            }
            None => self.entries.push(LeaderboardEntry {
                name: name.to_string(),
                score,
                level,
                is_player: true,
            }),
        }
        self.sort();
    }

    /// Top rows for display
    pub fn top(&self) -> &[LeaderboardEntry] {
        &self.entries[..self.entries.len().min(LEADERBOARD_SIZE)]
    }

    /// Every row, including those below the display cut
    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    /// Player's 1-indexed rank, if they have a row
    pub fn player_rank(&self) -> Option<usize> {
        self.entries.iter().position(|e| e.is_player).map(|i| i + 1)
    }

    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
