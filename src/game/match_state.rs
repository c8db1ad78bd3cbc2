use serde::Serialize;

use crate::error::{AppError, Result};

use super::board::{in_bounds, Board, CellState, Grid};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    One,
    Two,
}

/// Outcome of a resolved attack. `winner` is set when the attack found the
/// defender's last bot and ended the match.
#[derive(Debug, Clone)]
pub struct AttackOutcome {
    pub hit: bool,
    pub winner: Option<String>,
}

/// Public spectator projection of a match. Board contents never appear here.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MatchView {
    pub match_id: u64,
    pub player_one: String,
    pub player_two: Option<String>,
    pub board_set_one: bool,
    pub board_set_two: bool,
    pub is_over: bool,
    pub winner: Option<String>,
    pub current_turn: Option<String>,
    pub last_action_at: i64,
}

/// One complete two-player contest from pairing to terminal outcome.
///
/// Every mutation is a pure function over `&mut self`: the wall clock is
/// passed in by the caller, and a returned error guarantees no state change.
#[derive(Debug, Clone)]
pub struct MatchState {
    id: u64,
    player_one: String,
    player_two: Option<String>,
    board_one: Board,
    board_two: Board,
    overlay_one: Board,
    overlay_two: Board,
    board_set_one: bool,
    board_set_two: bool,
    is_over: bool,
    winner: Option<String>,
    // true = playerOne's turn; the creator moves first
    turn_one: bool,
    last_action_at: i64,
}

impl MatchState {
    pub fn new(id: u64, creator: &str, now: i64) -> Self {
        MatchState {
            id,
            player_one: creator.to_string(),
            player_two: None,
            board_one: Board::default(),
            board_two: Board::default(),
            overlay_one: Board::default(),
            overlay_two: Board::default(),
            board_set_one: false,
            board_set_two: false,
            is_over: false,
            winner: None,
            turn_one: true,
            last_action_at: now,
        }
    }

    /// A match stays active until it reaches a terminal outcome. A match
    /// nobody ever joined is still active for its creator.
    pub fn is_terminal(&self) -> bool {
        self.is_over
    }

    fn side_of(&self, caller: &str) -> Option<Side> {
        if self.player_one == caller {
            return Some(Side::One);
        }
        if self.player_two.as_deref() == Some(caller) {
            return Some(Side::Two);
        }
        None
    }

    fn require_participant(&self, caller: &str) -> Result<Side> {
        self.side_of(caller).ok_or(AppError::NotAParticipant)
    }

    fn boards_ready(&self) -> bool {
        self.board_set_one && self.board_set_two
    }

    fn on_turn_player(&self) -> &str {
        if self.turn_one {
            &self.player_one
        } else {
            self.player_two.as_deref().unwrap_or(&self.player_one)
        }
    }

    /// Fills the second slot. The registry guarantees the joiner is a
    /// distinct caller; the self-join check here is defense in the state
    /// machine itself, since any participant can attempt any action.
    pub fn join(&mut self, opponent: &str, now: i64) -> Result<()> {
        if self.player_two.is_some() {
            return Err(AppError::BadRequest(
                "Match already has two players".to_string(),
            ));
        }
        if self.player_one == opponent {
            return Err(AppError::BadRequest(
                "Cannot join a match you created".to_string(),
            ));
        }
        self.player_two = Some(opponent.to_string());
        self.last_action_at = now;
        Ok(())
    }

    /// Stores the caller's secret board. Placement is finalized exactly once
    /// per player and is immutable afterwards; pre-staging a board while the
    /// match is still waiting for an opponent is rejected.
    pub fn place_bots(&mut self, caller: &str, grid: &Grid, now: i64) -> Result<()> {
        let side = self.require_participant(caller)?;
        if self.is_over {
            return Err(AppError::MatchOver);
        }
        if self.player_two.is_none() {
            return Err(AppError::BoardsNotReady);
        }

        let set_flag = match side {
            Side::One => self.board_set_one,
            Side::Two => self.board_set_two,
        };
        if set_flag {
            return Err(AppError::AlreadySet);
        }

        let board = Board::from_placement(grid)?;
        match side {
            Side::One => {
                self.board_one = board;
                self.board_set_one = true;
            }
            Side::Two => {
                self.board_two = board;
                self.board_set_two = true;
            }
        }
        self.last_action_at = now;
        Ok(())
    }

    /// Resolves one attack at `(x, y)` against the opponent's board.
    ///
    /// Check order: participant, match over, boards ready, turn, bounds,
    /// repeat attack. A cell may be attacked at most once per player; the
    /// second attempt is rejected, not silently idempotent.
    pub fn attack(&mut self, caller: &str, x: usize, y: usize, now: i64) -> Result<AttackOutcome> {
        let side = self.require_participant(caller)?;
        if self.is_over {
            return Err(AppError::MatchOver);
        }
        if !self.boards_ready() {
            return Err(AppError::BoardsNotReady);
        }

        let on_turn = match side {
            Side::One => self.turn_one,
            Side::Two => !self.turn_one,
        };
        if !on_turn {
            return Err(AppError::NotYourTurn);
        }

        if !in_bounds(x, y) {
            return Err(AppError::CoordinateOutOfRange(x, y));
        }

        let (overlay, defender_board) = match side {
            Side::One => (&mut self.overlay_one, &mut self.board_two),
            Side::Two => (&mut self.overlay_two, &mut self.board_one),
        };
        if overlay.get(x, y) != CellState::Empty {
            return Err(AppError::AlreadyAttacked);
        }

        let hit = defender_board.get(x, y) == CellState::Occupied;
        let mark = if hit { CellState::Hit } else { CellState::Miss };
        defender_board.set(x, y, mark);
        overlay.set(x, y, mark);

        self.last_action_at = now;

        let defender_remaining = defender_board.occupied_count();
        if defender_remaining == 0 {
            self.is_over = true;
            self.winner = Some(caller.to_string());
            return Ok(AttackOutcome {
                hit,
                winner: Some(caller.to_string()),
            });
        }

        self.turn_one = !self.turn_one;
        Ok(AttackOutcome { hit, winner: None })
    }

    /// Forfeits the player who was due to move but sat idle past the
    /// threshold. Time-based, not caller-based: anyone may invoke this and
    /// the state machine alone decides who loses.
    pub fn cancel_inactive(&mut self, now: i64, timeout_secs: i64) -> Result<String> {
        if self.is_over {
            return Err(AppError::MatchOver);
        }
        if !self.boards_ready() {
            return Err(AppError::BoardsNotReady);
        }
        if now - self.last_action_at <= timeout_secs {
            return Err(AppError::TooSoon);
        }

        // The on-turn player failed to move; the other player wins.
        let winner = if self.turn_one {
            self.player_two.clone().unwrap_or_default()
        } else {
            self.player_one.clone()
        };
        self.is_over = true;
        self.winner = Some(winner.clone());
        Ok(winner)
    }

    /// Caller-scoped view: own board (with Occupied cells, it is their own
    /// layout) plus own attack overlay. This access check is the hidden
    /// information boundary; state is plaintext but read-restricted.
    pub fn boards_for(&self, caller: &str) -> Result<(Grid, Grid)> {
        let side = self.require_participant(caller)?;
        let (board, overlay) = match side {
            Side::One => (&self.board_one, &self.overlay_one),
            Side::Two => (&self.board_two, &self.overlay_two),
        };
        Ok((board.to_grid(), overlay.to_grid()))
    }

    pub fn view(&self) -> MatchView {
        MatchView {
            match_id: self.id,
            player_one: self.player_one.clone(),
            player_two: self.player_two.clone(),
            board_set_one: self.board_set_one,
            board_set_two: self.board_set_two,
            is_over: self.is_over,
            winner: self.winner.clone(),
            current_turn: if self.is_over {
                None
            } else {
                Some(self.on_turn_player().to_string())
            },
            last_action_at: self.last_action_at,
        }
    }
}
