use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Player already has an active match")]
    AlreadyActive,

    #[error("You are not a participant of this match")]
    NotAParticipant,

    #[error("Board has already been placed for this match")]
    AlreadySet,

    #[error("Invalid placement: {0}")]
    InvalidPlacement(String),

    #[error("Match is already over")]
    MatchOver,

    #[error("Both boards must be placed before this action")]
    BoardsNotReady,

    #[error("It is not your turn")]
    NotYourTurn,

    #[error("Coordinate out of range: ({0}, {1})")]
    CoordinateOutOfRange(usize, usize),

    #[error("Coordinate was already attacked")]
    AlreadyAttacked,

    #[error("Inactivity threshold has not elapsed yet")]
    TooSoon,

    #[error("Authentication failed: {0}")]
    AuthError(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl AppError {
    /// Stable machine-readable code, independent of the human message.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::AlreadyActive => "ALREADY_ACTIVE",
            AppError::NotAParticipant => "NOT_A_PARTICIPANT",
            AppError::AlreadySet => "ALREADY_SET",
            AppError::InvalidPlacement(_) => "INVALID_PLACEMENT",
            AppError::MatchOver => "MATCH_OVER",
            AppError::BoardsNotReady => "BOARDS_NOT_READY",
            AppError::NotYourTurn => "NOT_YOUR_TURN",
            AppError::CoordinateOutOfRange(_, _) => "COORDINATE_OUT_OF_RANGE",
            AppError::AlreadyAttacked => "ALREADY_ATTACKED",
            AppError::TooSoon => "TOO_SOON",
            AppError::AuthError(_) => "AUTH_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidPlacement(_)
            | AppError::CoordinateOutOfRange(_, _)
            | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotAParticipant => StatusCode::FORBIDDEN,
            AppError::AuthError(_) => StatusCode::UNAUTHORIZED,
            AppError::AlreadyActive
            | AppError::AlreadySet
            | AppError::MatchOver
            | AppError::BoardsNotReady
            | AppError::NotYourTurn
            | AppError::AlreadyAttacked
            | AppError::TooSoon => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(ErrorResponse {
            success: false,
            error: ErrorDetail {
                code: self.code().to_string(),
                message: self.to_string(),
                details: None,
            },
        });

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_violations_map_to_conflict() {
        assert_eq!(AppError::NotYourTurn.status(), StatusCode::CONFLICT);
        assert_eq!(AppError::AlreadyAttacked.status(), StatusCode::CONFLICT);
        assert_eq!(AppError::TooSoon.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn participant_check_is_forbidden() {
        assert_eq!(AppError::NotAParticipant.status(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::NotAParticipant.code(), "NOT_A_PARTICIPANT");
    }

    #[test]
    fn codes_are_stable() {
        assert_eq!(AppError::AlreadyActive.code(), "ALREADY_ACTIVE");
        assert_eq!(
            AppError::InvalidPlacement("x".into()).code(),
            "INVALID_PLACEMENT"
        );
        assert_eq!(AppError::CoordinateOutOfRange(5, 0).code(), "COORDINATE_OUT_OF_RANGE");
    }
}
