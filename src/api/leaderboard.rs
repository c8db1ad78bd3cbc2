use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use crate::error::Result;
use crate::game::LeaderboardEntry;
use crate::models::ApiResponse;

use super::AppState;

#[derive(Debug, Serialize)]
pub struct TopScoresResponse {
    pub entries: Vec<LeaderboardEntry>,
}

#[derive(Debug, Serialize)]
pub struct PlayerWinsResponse {
    pub player: String,
    pub wins: u64,
}

/// GET /api/v1/leaderboard/top
pub async fn top_scores(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<TopScoresResponse>>> {
    let entries = state.service.top_scores().await;
    Ok(Json(ApiResponse::success(TopScoresResponse { entries })))
}

/// GET /api/v1/leaderboard/{address}/wins
pub async fn player_wins(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<ApiResponse<PlayerWinsResponse>>> {
    let player = address.trim().to_ascii_lowercase();
    let wins = state.service.wins_of(&player).await;
    Ok(Json(ApiResponse::success(PlayerWinsResponse {
        player,
        wins,
    })))
}
