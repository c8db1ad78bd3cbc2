use serde::Serialize;
use std::collections::HashMap;

use crate::constants::LEADERBOARD_CAPACITY;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub player: String,
    pub wins: u64,
}

/// Win counters for every player ever recorded, plus a bounded board of the
/// highest counts. Ties rank by who reached the count first; an equal count
/// never displaces an incumbent.
pub struct Leaderboard {
    wins: HashMap<String, u64>,
    top: Vec<LeaderboardEntry>,
    capacity: usize,
}

impl Default for Leaderboard {
    fn default() -> Self {
        Self::with_capacity(LEADERBOARD_CAPACITY)
    }
}

impl Leaderboard {
    pub fn with_capacity(capacity: usize) -> Self {
        Leaderboard {
            wins: HashMap::new(),
            top: Vec::new(),
            capacity,
        }
    }

    /// Bumps the player's total and re-ranks. The player's stale entry is
    /// replaced with a fresh one, never mutated in place.
    pub fn record_win(&mut self, player: &str) -> u64 {
        let total = self.wins.entry(player.to_string()).or_insert(0);
        *total += 1;
        let total = *total;

        self.top.retain(|entry| entry.player != player);
        let position = self
            .top
            .iter()
            .position(|entry| entry.wins < total)
            .unwrap_or(self.top.len());
        self.top.insert(
            position,
            LeaderboardEntry {
                player: player.to_string(),
                wins: total,
            },
        );
        self.top.truncate(self.capacity);

        total
    }

    /// Highest win counts, descending.
    pub fn top_scores(&self) -> Vec<LeaderboardEntry> {
        self.top.clone()
    }

    pub fn wins_of(&self, player: &str) -> u64 {
        self.wins.get(player).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wins_default_to_zero() {
        let board = Leaderboard::default();
        assert_eq!(board.wins_of("0xnobody"), 0);
        assert!(board.top_scores().is_empty());
    }

    #[test]
    fn record_win_increments_and_ranks() {
        let mut board = Leaderboard::default();
        board.record_win("0xa");
        board.record_win("0xa");
        board.record_win("0xb");

        assert_eq!(board.wins_of("0xa"), 2);
        assert_eq!(board.wins_of("0xb"), 1);

        let top = board.top_scores();
        assert_eq!(top[0].player, "0xa");
        assert_eq!(top[0].wins, 2);
        assert_eq!(top[1].player, "0xb");
    }

    #[test]
    fn ties_rank_by_first_to_reach() {
        let mut board = Leaderboard::default();
        board.record_win("0xa");
        board.record_win("0xb");
        let top = board.top_scores();
        assert_eq!(top[0].player, "0xa");
        assert_eq!(top[1].player, "0xb");

        // 0xb pulls ahead, then 0xa catches up: 0xb reached 2 first
        board.record_win("0xb");
        board.record_win("0xa");
        let top = board.top_scores();
        assert_eq!(top[0].player, "0xb");
        assert_eq!(top[1].player, "0xa");
    }

    #[test]
    fn capacity_is_enforced_and_minimum_displaced() {
        let mut board = Leaderboard::with_capacity(3);
        for player in ["0xa", "0xb", "0xc"] {
            board.record_win(player);
            board.record_win(player);
        }
        // Board full of twos; a single win does not displace anyone
        board.record_win("0xd");
        let top = board.top_scores();
        assert_eq!(top.len(), 3);
        assert!(!top.iter().any(|e| e.player == "0xd"));
        assert_eq!(board.wins_of("0xd"), 1);

        // A second and third win push 0xd past the minimum
        board.record_win("0xd");
        board.record_win("0xd");
        let top = board.top_scores();
        assert_eq!(top.len(), 3);
        assert_eq!(top[0].player, "0xd");
        assert_eq!(top[0].wins, 3);
    }

    #[test]
    fn equal_count_does_not_displace_incumbent() {
        let mut board = Leaderboard::with_capacity(2);
        board.record_win("0xa");
        board.record_win("0xb");
        board.record_win("0xc");
        let top = board.top_scores();
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].player, "0xa");
        assert_eq!(top[1].player, "0xb");
        // 0xc still has its counter even while off the board
        assert_eq!(board.wins_of("0xc"), 1);
    }
}
