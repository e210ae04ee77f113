//! Crossword leaderboard
//!
//! Fixed friend times plus the player's own solve time, fastest first.

use serde::Serialize;

/// Friends' solve times for every puzzle (milliseconds)
pub const FRIEND_TIMES: [(&str, i64); 3] = [
    ("Alice.algo", 95_000),
    ("CryptoKing", 142_000),
    ("Satoshi_Fan", 203_000),
];

/// Name shown on the player's own row
pub const PLAYER_NAME: &str = "You";

/// A single leaderboard row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderboardEntry {
    pub name: String,
    /// Solve time in milliseconds
    pub time_ms: i64,
    pub is_player: bool,
}

/// Ranked solve times
#[derive(Debug, Clone, Default, Serialize)]
pub struct Leaderboard {
    pub entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    /// Friends only, until the player has a finished time
    pub fn new(player_time_ms: Option<i64>) -> Self {
        let mut board = Self {
            entries: FRIEND_TIMES
                .iter()
                .map(|(name, time_ms)| LeaderboardEntry {
                    name: (*name).to_string(),
                    time_ms: *time_ms,
                    is_player: false,
                })
                .collect(),
        };
        if let Some(time_ms) = player_time_ms {
            board.add_time(PLAYER_NAME, time_ms, true);
        }
        board
    }

    /// Rank a time would achieve (1-indexed)
    pub fn potential_rank(&self, time_ms: i64) -> usize {
        self.entries
            .iter()
            .position(|e| time_ms < e.time_ms)
            .unwrap_or(self.entries.len())
            + 1
    }

    /// Insert keeping ascending order; ties go after existing entries.
    /// Returns the rank achieved.
    pub fn add_time(&mut self, name: &str, time_ms: i64, is_player: bool) -> usize {
        let rank = self.potential_rank(time_ms);
        self.entries.insert(
            rank - 1,
            LeaderboardEntry {
                name: name.to_string(),
                time_ms,
                is_player,
            },
        );
        rank
    }

    /// The player's rank, if they are on the board
    pub fn player_rank(&self) -> Option<usize> {
        self.entries.iter().position(|e| e.is_player).map(|i| i + 1)
    }

    pub fn fastest(&self) -> Option<&LeaderboardEntry> {
        self.entries.first()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_friends_only_before_solving() {
        let board = Leaderboard::new(None);
        assert_eq!(board.len(), 3);
        assert_eq!(board.player_rank(), None);
        assert_eq!(board.fastest().unwrap().name, "Alice.algo");
    }

    #[test]
    fn test_player_is_ranked() {
        let board = Leaderboard::new(Some(120_000));
        let names: Vec<_> = board.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Alice.algo", "You", "CryptoKing", "Satoshi_Fan"]);
        assert_eq!(board.player_rank(), Some(2));

        let fastest = Leaderboard::new(Some(10_000));
        assert_eq!(fastest.player_rank(), Some(1));
        let slowest = Leaderboard::new(Some(500_000));
        assert_eq!(slowest.player_rank(), Some(4));
    }

    #[test]
    fn test_sorted_ascending() {
        let board = Leaderboard::new(Some(142_000));
        assert!(board.entries.windows(2).all(|w| w[0].time_ms <= w[1].time_ms));
        // Tie with CryptoKing lands after them
        assert_eq!(board.player_rank(), Some(3));
    }
}
