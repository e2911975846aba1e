use crate::{Card, CardId, CoreError, Deck, DeckId, ReminderSettings};
use async_trait::async_trait;

pub mod memory;

#[async_trait]
pub trait Repository: Send + Sync {
    // Decks
    async fn create_deck(&self, name: &str) -> Result<Deck, CoreError>;
    async fn get_deck(&self, id: DeckId) -> Result<Deck, CoreError>;
    async fn list_decks(&self) -> Result<Vec<Deck>, CoreError>;
    async fn delete_deck(&self, id: DeckId) -> Result<(), CoreError>;

    // Cards
    async fn add_card(&self, deck_id: DeckId, front: &str, back: &str) -> Result<Card, CoreError>;
    async fn get_card(&self, id: CardId) -> Result<Card, CoreError>;
    /// Cards in insertion order, optionally limited to one deck.
    async fn list_cards(&self, deck_id: Option<DeckId>) -> Result<Vec<Card>, CoreError>;
    async fn delete_card(&self, id: CardId) -> Result<(), CoreError>;

    // Reminders
    async fn get_reminder(&self, deck_id: DeckId) -> Result<ReminderSettings, CoreError>;
    async fn set_reminder(&self, deck_id: DeckId, settings: &ReminderSettings) -> Result<(), CoreError>;
}

/// Looks a deck up by id first, then by case-insensitive name.
pub async fn resolve_deck<R: Repository + ?Sized>(repo: &R, sel: &str) -> Result<Deck, CoreError> {
    if let Ok(id) = uuid::Uuid::parse_str(sel) {
        if let Ok(d) = repo.get_deck(id).await {
            return Ok(d);
        }
    }
    repo.list_decks()
        .await?
        .into_iter()
        .find(|d| d.name.eq_ignore_ascii_case(sel.trim()))
        .ok_or(CoreError::NotFound("deck"))
}

/// Returns the deck with this name, creating it when missing.
pub async fn ensure_deck<R: Repository + ?Sized>(repo: &R, name: &str) -> Result<Deck, CoreError> {
    match resolve_deck(repo, name).await {
        Ok(d) => Ok(d),
        Err(CoreError::NotFound(_)) => repo.create_deck(name.trim()).await,
        Err(e) => Err(e),
    }
}
