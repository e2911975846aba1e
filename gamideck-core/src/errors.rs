use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CoreError {
    #[error("not found: {0}")]
    NotFound(&'static str),
    #[error("invalid input: {0}")]
    Invalid(&'static str),
    #[error("conflict: {0}")]
    Conflict(&'static str),
    #[error("storage error: {0}")]
    Storage(&'static str),
    #[error("card must be revealed before it can be rated")]
    NotRevealed,
    #[error("invalid rating: {0:?} (expected again, hard, good or easy)")]
    InvalidRating(String),
    #[error("already spun this session (reward {reward}x)")]
    AlreadySpun { reward: f32 },
}
