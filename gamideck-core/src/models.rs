use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::CoreError;

pub type DeckId = Uuid;
pub type CardId = Uuid;

/// Answer quality chosen after the back of a card has been revealed.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Rating {
    Again,
    Hard,
    Good,
    Easy,
}

impl Rating {
    /// Good and easy take a card out of rotation for the rest of the session.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Rating::Good | Rating::Easy)
    }

    /// How far ahead of the active position a non-terminal card is put back.
    pub fn requeue_offset(&self) -> Option<usize> {
        match self {
            Rating::Again => Some(2),
            Rating::Hard => Some(4),
            Rating::Good | Rating::Easy => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Rating::Again => "again",
            Rating::Hard => "hard",
            Rating::Good => "good",
            Rating::Easy => "easy",
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Rating {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1" | "a" | "again" => Ok(Rating::Again),
            "2" | "h" | "hard" => Ok(Rating::Hard),
            "3" | "g" | "good" => Ok(Rating::Good),
            "4" | "e" | "easy" => Ok(Rating::Easy),
            _ => Err(CoreError::InvalidRating(s.to_string())),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Deck {
    pub id: DeckId,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl Deck {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            created_at: Utc::now(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Card {
    pub id: CardId,
    pub deck_id: DeckId,
    pub front: String,
    pub back: String,
    pub created_at: DateTime<Utc>,
}

impl Card {
    pub fn new(deck_id: DeckId, front: impl Into<String>, back: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            deck_id,
            front: front.into(),
            back: back.into(),
            created_at: Utc::now(),
        }
    }
}
