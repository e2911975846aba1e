use crate::{Card, CardId, CoreError, Deck, DeckId, ReminderSettings};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;

#[derive(Default)]
pub struct MemoryRepo {
    decks: RwLock<HashMap<DeckId, Deck>>,
    cards: RwLock<Vec<Card>>,
    reminders: RwLock<HashMap<DeckId, ReminderSettings>>,
}

impl MemoryRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl crate::repo::Repository for MemoryRepo {
    async fn create_deck(&self, name: &str) -> Result<Deck, CoreError> {
        if name.trim().is_empty() {
            return Err(CoreError::Invalid("deck name is empty"));
        }
        let deck = Deck::new(name);
        let mut m = self.decks.write();
        if m.values().any(|d| d.name.eq_ignore_ascii_case(name)) {
            return Err(CoreError::Conflict("deck name already exists"));
        }
        m.insert(deck.id, deck.clone());
        Ok(deck)
    }

    async fn get_deck(&self, id: DeckId) -> Result<Deck, CoreError> {
        self.decks
            .read()
            .get(&id)
            .cloned()
            .ok_or(CoreError::NotFound("deck"))
    }

    async fn list_decks(&self) -> Result<Vec<Deck>, CoreError> {
        let mut v: Vec<Deck> = self.decks.read().values().cloned().collect();
        v.sort_by_key(|d| d.created_at);
        Ok(v)
    }

    async fn delete_deck(&self, id: DeckId) -> Result<(), CoreError> {
        self.decks
            .write()
            .remove(&id)
            .ok_or(CoreError::NotFound("deck"))?;
        self.cards.write().retain(|c| c.deck_id != id);
        self.reminders.write().remove(&id);
        Ok(())
    }

    async fn add_card(&self, deck_id: DeckId, front: &str, back: &str) -> Result<Card, CoreError> {
        if !self.decks.read().contains_key(&deck_id) {
            return Err(CoreError::NotFound("deck"));
        }
        let card = Card::new(deck_id, front, back);
        self.cards.write().push(card.clone());
        Ok(card)
    }

    async fn get_card(&self, id: CardId) -> Result<Card, CoreError> {
        self.cards
            .read()
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or(CoreError::NotFound("card"))
    }

    async fn list_cards(&self, deck_id: Option<DeckId>) -> Result<Vec<Card>, CoreError> {
        let cards = self.cards.read();
        Ok(match deck_id {
            Some(did) => crate::filter_by_deck(&cards, did),
            None => cards.clone(),
        })
    }

    async fn delete_card(&self, id: CardId) -> Result<(), CoreError> {
        let mut cards = self.cards.write();
        let before = cards.len();
        cards.retain(|c| c.id != id);
        if cards.len() == before {
            return Err(CoreError::NotFound("card"));
        }
        Ok(())
    }

    async fn get_reminder(&self, deck_id: DeckId) -> Result<ReminderSettings, CoreError> {
        if !self.decks.read().contains_key(&deck_id) {
            return Err(CoreError::NotFound("deck"));
        }
        Ok(self.reminders.read().get(&deck_id).cloned().unwrap_or_default())
    }

    async fn set_reminder(&self, deck_id: DeckId, settings: &ReminderSettings) -> Result<(), CoreError> {
        if !self.decks.read().contains_key(&deck_id) {
            return Err(CoreError::NotFound("deck"));
        }
        self.reminders.write().insert(deck_id, settings.clone());
        Ok(())
    }
}
