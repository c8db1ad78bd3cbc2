use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;

use crate::error::{AppError, Result};

use super::board::Grid;
use super::events::{EventLog, EventRecord, GameEvent};
use super::leaderboard::{Leaderboard, LeaderboardEntry};
use super::match_state::{MatchState, MatchView};

fn now_unix() -> i64 {
    chrono::Utc::now().timestamp()
}

#[derive(Debug, Clone, Serialize)]
pub struct StartOutcome {
    pub match_id: u64,
    /// false when a fresh match was opened and is waiting for an opponent
    pub joined: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct AttackResult {
    pub match_id: u64,
    pub x: usize,
    pub y: usize,
    pub hit: bool,
    pub winner: Option<String>,
}

/// Arena of matches: a growable id-indexed table plus per-player histories.
/// Pairing is single-slot, first come first served.
#[derive(Default)]
struct Registry {
    // 1-based, process-wide; ids are never reused
    next_id: u64,
    matches: HashMap<u64, Arc<RwLock<MatchState>>>,
    histories: HashMap<String, Vec<u64>>,
    open_match: Option<u64>,
}

/// The authoritative store. Every mutation applies atomically under one
/// match's write lock, so mutations on different matches never block each
/// other, while reads always observe a fully applied state.
///
/// Lock order is registry -> match -> (events | leaderboard); no code path
/// holds a match lock while waiting on the registry.
pub struct GameService {
    registry: RwLock<Registry>,
    leaderboard: RwLock<Leaderboard>,
    events: EventLog,
    inactivity_timeout_secs: i64,
}

impl GameService {
    pub fn new(inactivity_timeout_secs: i64) -> Self {
        GameService {
            registry: RwLock::new(Registry::default()),
            leaderboard: RwLock::new(Leaderboard::default()),
            events: EventLog::default(),
            inactivity_timeout_secs,
        }
    }

    async fn match_handle(&self, match_id: u64) -> Option<Arc<RwLock<MatchState>>> {
        let registry = self.registry.read().await;
        registry.matches.get(&match_id).cloned()
    }

    /// Joins the open waiting match if another player left one, otherwise
    /// opens a new match with the caller as player one.
    ///
    /// Pairing events are appended while the registry write lock is still
    /// held: a joiner racing the creator must observe `MatchCreated` before
    /// `OpponentJoined`, and a `place_bots` right after joining has to wait
    /// on the registry read before it can log `BoardPlaced`.
    pub async fn start_or_join(&self, caller: &str) -> Result<StartOutcome> {
        let mut registry = self.registry.write().await;
        let now = now_unix();

        // One active match per player: only the most recent can still be
        // live, every older one ended before a new start was allowed.
        if let Some(last_id) = registry
            .histories
            .get(caller)
            .and_then(|ids| ids.last().copied())
        {
            if let Some(handle) = registry.matches.get(&last_id) {
                if !handle.read().await.is_terminal() {
                    return Err(AppError::AlreadyActive);
                }
            }
        }

        if let Some(open_id) = registry.open_match {
            let handle = registry
                .matches
                .get(&open_id)
                .cloned()
                .ok_or_else(|| AppError::Internal("open match missing from arena".to_string()))?;
            handle.write().await.join(caller, now)?;

            registry.open_match = None;
            registry
                .histories
                .entry(caller.to_string())
                .or_default()
                .push(open_id);

            tracing::info!(match_id = open_id, opponent = %caller, "opponent joined match");
            self.events
                .append(
                    GameEvent::OpponentJoined {
                        match_id: open_id,
                        opponent: caller.to_string(),
                    },
                    now,
                )
                .await;
            return Ok(StartOutcome {
                match_id: open_id,
                joined: true,
            });
        }

        registry.next_id += 1;
        let match_id = registry.next_id;
        registry
            .matches
            .insert(match_id, Arc::new(RwLock::new(MatchState::new(match_id, caller, now))));
        registry.open_match = Some(match_id);
        registry
            .histories
            .entry(caller.to_string())
            .or_default()
            .push(match_id);

        tracing::info!(match_id, creator = %caller, "match created, waiting for opponent");
        self.events
            .append(
                GameEvent::MatchCreated {
                    match_id,
                    creator: caller.to_string(),
                },
                now,
            )
            .await;
        Ok(StartOutcome {
            match_id,
            joined: false,
        })
    }

    pub async fn place_bots(&self, match_id: u64, caller: &str, grid: &Grid) -> Result<()> {
        let handle = self
            .match_handle(match_id)
            .await
            .ok_or_else(|| AppError::BadRequest("Match not found".to_string()))?;

        let mut game = handle.write().await;
        // Clock is read under the lock so timestamps follow serialization order
        let now = now_unix();
        game.place_bots(caller, grid, now)?;

        self.events
            .append(
                GameEvent::BoardPlaced {
                    match_id,
                    player: caller.to_string(),
                },
                now,
            )
            .await;
        Ok(())
    }

    pub async fn attack(
        &self,
        match_id: u64,
        caller: &str,
        x: usize,
        y: usize,
    ) -> Result<AttackResult> {
        let handle = self
            .match_handle(match_id)
            .await
            .ok_or_else(|| AppError::BadRequest("Match not found".to_string()))?;

        let mut game = handle.write().await;
        let now = now_unix();
        let outcome = game.attack(caller, x, y, now)?;

        self.events
            .append(
                GameEvent::AttackResult {
                    match_id,
                    attacker: caller.to_string(),
                    x,
                    y,
                    hit: outcome.hit,
                },
                now,
            )
            .await;

        if let Some(winner) = outcome.winner.as_deref() {
            self.finish_match(match_id, winner, now).await;
        }

        Ok(AttackResult {
            match_id,
            x,
            y,
            hit: outcome.hit,
            winner: outcome.winner,
        })
    }

    /// Time-based forfeiture. Any caller may invoke this; the match decides
    /// who loses from its own turn flag.
    pub async fn cancel_inactive(&self, match_id: u64) -> Result<String> {
        let handle = self
            .match_handle(match_id)
            .await
            .ok_or_else(|| AppError::BadRequest("Match not found".to_string()))?;

        let mut game = handle.write().await;
        let now = now_unix();
        let winner = game.cancel_inactive(now, self.inactivity_timeout_secs)?;

        tracing::info!(match_id, winner = %winner, "match forfeited after inactivity");
        self.finish_match(match_id, &winner, now).await;
        Ok(winner)
    }

    async fn finish_match(&self, match_id: u64, winner: &str, now: i64) {
        let total = self.leaderboard.write().await.record_win(winner);
        tracing::info!(match_id, winner = %winner, total_wins = total, "match over");
        self.events
            .append(
                GameEvent::MatchOver {
                    match_id,
                    winner: winner.to_string(),
                },
                now,
            )
            .await;
    }

    /// Ordered match-id history, most recent last. Unknown players have an
    /// empty history rather than an error.
    pub async fn player_matches(&self, player: &str) -> Vec<u64> {
        let registry = self.registry.read().await;
        registry.histories.get(player).cloned().unwrap_or_default()
    }

    /// Public spectator projection. Unknown ids project as unset instead of
    /// failing, mirroring an empty slot in the arena.
    pub async fn get_state(&self, match_id: u64) -> MatchView {
        match self.match_handle(match_id).await {
            Some(handle) => handle.read().await.view(),
            None => MatchView {
                match_id,
                ..MatchView::default()
            },
        }
    }

    /// Caller-scoped boards. The participant check also covers ids that do
    /// not exist: a bystander learns nothing either way.
    pub async fn get_boards(&self, match_id: u64, caller: &str) -> Result<(Grid, Grid)> {
        let handle = self
            .match_handle(match_id)
            .await
            .ok_or(AppError::NotAParticipant)?;
        let game = handle.read().await;
        game.boards_for(caller)
    }

    pub async fn top_scores(&self) -> Vec<LeaderboardEntry> {
        self.leaderboard.read().await.top_scores()
    }

    pub async fn wins_of(&self, player: &str) -> u64 {
        self.leaderboard.read().await.wins_of(player)
    }

    pub async fn events_since(&self, since: u64, match_id: Option<u64>) -> Vec<EventRecord> {
        self.events.since(since, match_id).await
    }
}
