use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::game::EventRecord;
use crate::models::ApiResponse;

use super::AppState;

#[derive(Debug, Deserialize)]
pub struct EventsQuery {
    /// Exclusive cursor: only events with seq > since are returned
    #[serde(default)]
    pub since: u64,
    pub match_id: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct EventsResponse {
    pub events: Vec<EventRecord>,
    /// Cursor for the next poll; equal to `since` when nothing new arrived
    pub cursor: u64,
}

/// GET /api/v1/events?since=&match_id=
pub async fn poll_events(
    State(state): State<AppState>,
    Query(query): Query<EventsQuery>,
) -> Result<Json<ApiResponse<EventsResponse>>> {
    let events = state
        .service
        .events_since(query.since, query.match_id)
        .await;
    let cursor = events.last().map(|record| record.seq).unwrap_or(query.since);
    Ok(Json(ApiResponse::success(EventsResponse {
        events,
        cursor,
    })))
}
