/// Application constants

pub const API_VERSION: &str = "v1";

// Board geometry
pub const BOARD_SIZE: usize = 5;
pub const TOTAL_BOTS: usize = 5;

// Wire codes for cell states (shared with the frontend)
pub const CELL_EMPTY: u8 = 0;
pub const CELL_OCCUPIED: u8 = 1;
pub const CELL_HIT: u8 = 2;
pub const CELL_MISS: u8 = 3;

// Forfeiture policy. The frontend shows its cancel button much earlier,
// but this is the enforced threshold: cancel succeeds only when the
// elapsed idle time is strictly greater than this.
pub const INACTIVITY_TIMEOUT_SECS: i64 = 86_400;

// Leaderboard keeps the top N win counts ever seen
pub const LEADERBOARD_CAPACITY: usize = 10;
