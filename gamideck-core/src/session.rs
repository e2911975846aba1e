//! Review session: the card queue a learner works through, one reveal and one
//! rating at a time.
//!
//! Cards rated again or hard go back into the queue a fixed distance ahead of
//! the active position. Cards rated good or easy are mastered and leave the
//! queue for the rest of the session. The session is complete once the queue
//! is empty.

use crate::{Card, CardId, CoreError, Rating, Totals};
use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, warn};

/// What a call to [`ReviewSession::rate`] did to the queue.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RateOutcome {
    /// Session already complete; nothing changed.
    Ignored,
    /// Card went back into the queue at `position`.
    Requeued { position: usize },
    /// Card was mastered and more cards remain.
    Mastered,
    /// Card was mastered and it was the last one.
    Completed,
}

/// Read-only projection handed to front ends after every operation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub active: Option<Card>,
    pub next: Option<Card>,
    pub revealed: bool,
    pub progress: f32,
    pub complete: bool,
    pub remaining: usize,
    pub mastered: usize,
    pub total: usize,
}

#[derive(Clone, Debug)]
pub struct ReviewSession {
    original: Vec<Card>,
    deck: Vec<Card>,
    active_index: usize,
    revealed: bool,
    mastered: HashSet<CardId>,
    complete: bool,
    tally: Totals,
}

impl ReviewSession {
    pub fn new(cards: Vec<Card>) -> Result<Self, CoreError> {
        let mut seen = HashSet::with_capacity(cards.len());
        if !cards.iter().all(|c| seen.insert(c.id)) {
            return Err(CoreError::Invalid("duplicate card id in session input"));
        }
        let complete = cards.is_empty();
        Ok(Self {
            deck: cards.clone(),
            original: cards,
            active_index: 0,
            revealed: false,
            mastered: HashSet::new(),
            complete,
            tally: Totals::default(),
        })
    }

    pub fn active_card(&self) -> Option<&Card> {
        if self.complete {
            return None;
        }
        self.deck.get(self.active_index)
    }

    /// The card that follows the active one, if there is a different one.
    pub fn next_card(&self) -> Option<&Card> {
        if self.complete || self.deck.len() < 2 {
            return None;
        }
        self.deck.get((self.active_index + 1) % self.deck.len())
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn deck(&self) -> &[Card] {
        &self.deck
    }

    pub fn original(&self) -> &[Card] {
        &self.original
    }

    pub fn mastered(&self) -> &HashSet<CardId> {
        &self.mastered
    }

    pub fn is_mastered(&self, id: CardId) -> bool {
        self.mastered.contains(&id)
    }

    pub fn tally(&self) -> &Totals {
        &self.tally
    }

    /// Cards still in rotation.
    pub fn len(&self) -> usize {
        self.deck.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deck.is_empty()
    }

    /// Fraction of the original cards mastered so far. An empty session counts
    /// as fully done.
    pub fn progress(&self) -> f32 {
        if self.original.is_empty() {
            return 1.0;
        }
        self.mastered.len() as f32 / self.original.len() as f32
    }

    /// Shows the back of the active card. Returns false when there was nothing
    /// to reveal.
    pub fn reveal(&mut self) -> bool {
        if self.complete || self.revealed || self.active_card().is_none() {
            return false;
        }
        self.revealed = true;
        debug!(index = self.active_index, "card revealed");
        true
    }

    pub fn rate(&mut self, rating: Rating) -> Result<RateOutcome, CoreError> {
        if self.complete {
            return Ok(RateOutcome::Ignored);
        }
        if !self.revealed {
            warn!(%rating, "rating rejected, card not revealed");
            return Err(CoreError::NotRevealed);
        }

        let card = self.deck.remove(self.active_index);
        self.tally.record(&rating);

        let mut outcome = match rating.requeue_offset() {
            Some(offset) => {
                let position = (self.active_index + offset).min(self.deck.len());
                debug!(card = %card.id, %rating, position, "card requeued");
                self.deck.insert(position, card);
                RateOutcome::Requeued { position }
            }
            None => {
                debug!(card = %card.id, %rating, "card mastered");
                self.mastered.insert(card.id);
                RateOutcome::Mastered
            }
        };

        self.revealed = false;
        if self.deck.is_empty() {
            self.complete = true;
            outcome = RateOutcome::Completed;
            debug!(ratings = self.tally.total, "session complete");
        } else if self.active_index >= self.deck.len() {
            self.active_index = 0;
        }
        Ok(outcome)
    }

    /// Parses a rating by name and applies it. Unknown names leave the session
    /// untouched.
    pub fn rate_str(&mut self, name: &str) -> Result<(Rating, RateOutcome), CoreError> {
        let rating: Rating = name.parse().inspect_err(|_| {
            warn!(name, "rating rejected, unknown value");
        })?;
        Ok((rating, self.rate(rating)?))
    }

    pub fn restart(&mut self) {
        self.deck = self.original.clone();
        self.active_index = 0;
        self.revealed = false;
        self.mastered.clear();
        self.complete = self.original.is_empty();
        self.tally = Totals::default();
        debug!(cards = self.deck.len(), "session restarted");
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            active: self.active_card().cloned(),
            next: self.next_card().cloned(),
            revealed: self.revealed,
            progress: self.progress(),
            complete: self.complete,
            remaining: self.deck.len(),
            mastered: self.mastered.len(),
            total: self.original.len(),
        }
    }
}
