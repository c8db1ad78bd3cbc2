pub mod board;
pub mod events;
pub mod leaderboard;
pub mod match_state;
pub mod service;

pub use board::{Board, CellState, Grid};
pub use events::{EventLog, EventRecord, GameEvent};
pub use leaderboard::{Leaderboard, LeaderboardEntry};
pub use match_state::{MatchState, MatchView};
pub use service::{AttackResult, GameService, StartOutcome};
