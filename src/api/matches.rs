use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::game::{AttackResult, Grid, MatchView, StartOutcome};
use crate::models::ApiResponse;

use super::{require_player, AppState};

#[derive(Debug, Deserialize)]
pub struct PlaceBotsRequest {
    pub match_id: u64,
    /// 5x5 grid of wire codes; only 0 (empty) and 1 (occupied) are accepted
    pub board: Grid,
}

#[derive(Debug, Deserialize)]
pub struct AttackRequest {
    pub match_id: u64,
    pub x: usize,
    pub y: usize,
}

#[derive(Debug, Deserialize)]
pub struct CancelInactiveRequest {
    pub match_id: u64,
}

#[derive(Debug, Serialize)]
pub struct CancelInactiveResponse {
    pub match_id: u64,
    pub winner: String,
}

#[derive(Debug, Serialize)]
pub struct PlayerBoardsResponse {
    pub match_id: u64,
    /// The caller's own layout, hits and misses included
    pub board: Grid,
    /// What the caller has discovered about the opponent
    pub attack_overlay: Grid,
}

#[derive(Debug, Serialize)]
pub struct PlayerMatchesResponse {
    pub player: String,
    /// Ordered history; the most recent match is the last element
    pub match_ids: Vec<u64>,
}

/// POST /api/v1/match/start
pub async fn start_or_join(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<StartOutcome>>> {
    let player = require_player(&headers)?;
    let outcome = state.service.start_or_join(&player).await?;
    Ok(Json(ApiResponse::success(outcome)))
}

/// POST /api/v1/match/place
pub async fn place_bots(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<PlaceBotsRequest>,
) -> Result<Json<ApiResponse<MatchView>>> {
    let player = require_player(&headers)?;
    state
        .service
        .place_bots(req.match_id, &player, &req.board)
        .await?;
    Ok(Json(ApiResponse::success(
        state.service.get_state(req.match_id).await,
    )))
}

/// POST /api/v1/match/attack
pub async fn attack(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<AttackRequest>,
) -> Result<Json<ApiResponse<AttackResult>>> {
    let player = require_player(&headers)?;
    let result = state
        .service
        .attack(req.match_id, &player, req.x, req.y)
        .await?;
    Ok(Json(ApiResponse::success(result)))
}

/// POST /api/v1/match/cancel-inactive
pub async fn cancel_inactive(
    State(state): State<AppState>,
    Json(req): Json<CancelInactiveRequest>,
) -> Result<Json<ApiResponse<CancelInactiveResponse>>> {
    // Deliberately no identity check: authorization is time-based and the
    // state machine decides who forfeits, whoever submits the call.
    let winner = state.service.cancel_inactive(req.match_id).await?;
    Ok(Json(ApiResponse::success(CancelInactiveResponse {
        match_id: req.match_id,
        winner,
    })))
}

/// GET /api/v1/match/{match_id}/state
pub async fn get_state(
    State(state): State<AppState>,
    Path(match_id): Path<u64>,
) -> Result<Json<ApiResponse<MatchView>>> {
    Ok(Json(ApiResponse::success(
        state.service.get_state(match_id).await,
    )))
}

/// GET /api/v1/match/{match_id}/boards
pub async fn get_boards(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(match_id): Path<u64>,
) -> Result<Json<ApiResponse<PlayerBoardsResponse>>> {
    let player = require_player(&headers)?;
    let (board, attack_overlay) = state.service.get_boards(match_id, &player).await?;
    Ok(Json(ApiResponse::success(PlayerBoardsResponse {
        match_id,
        board,
        attack_overlay,
    })))
}

/// GET /api/v1/match/player/{address}
pub async fn player_matches(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<ApiResponse<PlayerMatchesResponse>>> {
    let player = address.trim().to_ascii_lowercase();
    let match_ids = state.service.player_matches(&player).await;
    Ok(Json(ApiResponse::success(PlayerMatchesResponse {
        player,
        match_ids,
    })))
}
