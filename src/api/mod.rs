pub mod events;
pub mod health;
pub mod leaderboard;
pub mod matches;

use std::sync::Arc;

use axum::http::HeaderMap;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::game::GameService;

/// Caller identity header. Authentication itself belongs to the surrounding
/// transport layer; this backend only attributes actions to whatever
/// identity that layer supplies.
pub const PLAYER_HEADER: &str = "x-player-address";

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub service: Arc<GameService>,
}

/// Extracts the caller identity. Addresses are trimmed and lower-cased so
/// the same wallet string always names the same player.
pub fn require_player(headers: &HeaderMap) -> Result<String> {
    let raw = headers
        .get(PLAYER_HEADER)
        .ok_or_else(|| AppError::AuthError(format!("Missing {} header", PLAYER_HEADER)))?;
    let value = raw
        .to_str()
        .map_err(|_| AppError::AuthError(format!("Invalid {} header", PLAYER_HEADER)))?
        .trim();
    if value.is_empty() {
        return Err(AppError::AuthError(format!(
            "Empty {} header",
            PLAYER_HEADER
        )));
    }
    Ok(value.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn missing_header_is_auth_error() {
        let headers = HeaderMap::new();
        assert!(matches!(
            require_player(&headers).unwrap_err(),
            AppError::AuthError(_)
        ));
    }

    #[test]
    fn address_is_normalized() {
        let mut headers = HeaderMap::new();
        headers.insert(PLAYER_HEADER, HeaderValue::from_static("  0xABCdef "));
        assert_eq!(require_player(&headers).unwrap(), "0xabcdef");
    }

    #[test]
    fn blank_header_is_rejected() {
        let mut headers = HeaderMap::new();
        headers.insert(PLAYER_HEADER, HeaderValue::from_static("   "));
        assert!(require_player(&headers).is_err());
    }
}
