use axum::{http::StatusCode, response::IntoResponse, Json};
use chrono::{DateTime, Utc};
use gamideck_core::{CoreError, Credit, Friend, RateOutcome, SessionSnapshot};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Serialize)]
pub struct DeckOut {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub cards: usize,
}

#[derive(Deserialize)]
pub struct SessionIn {
    /// Deck id or name
    pub deck: String,
}

#[derive(Serialize)]
pub struct SessionOut {
    pub id: Uuid,
    #[serde(flatten)]
    pub snapshot: SessionSnapshot,
}

#[derive(Deserialize)]
pub struct RateIn {
    pub rating: String,
}

#[derive(Serialize)]
pub struct RateOut {
    pub outcome: RateOutcome,
    pub credit: Option<Credit>,
    pub session: SessionOut,
}

#[derive(Serialize)]
pub struct LeaderboardOut {
    pub friends: Vec<Friend>,
    pub show_rank_up_badge: bool,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

pub struct ApiError(pub CoreError);

impl From<CoreError> for ApiError {
    fn from(e: CoreError) -> Self {
        ApiError(e)
    }
}

pub fn status_for(e: &CoreError) -> StatusCode {
    match e {
        CoreError::NotFound(_) => StatusCode::NOT_FOUND,
        CoreError::Invalid(_) | CoreError::InvalidRating(_) => StatusCode::BAD_REQUEST,
        CoreError::Conflict(_) | CoreError::NotRevealed | CoreError::AlreadySpun { .. } => StatusCode::CONFLICT,
        CoreError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = status_for(&self.0);
        (status, Json(ErrorBody { error: self.0.to_string() })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn review_errors_map_to_client_statuses() {
        assert_eq!(status_for(&CoreError::InvalidRating("x".into())), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(&CoreError::NotRevealed), StatusCode::CONFLICT);
        assert_eq!(status_for(&CoreError::NotFound("session")), StatusCode::NOT_FOUND);
        assert_eq!(status_for(&CoreError::AlreadySpun { reward: 2.0 }), StatusCode::CONFLICT);
        assert_eq!(status_for(&CoreError::Storage("io")), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
