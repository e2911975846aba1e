use crate::{Card, DeckId};

pub fn filter_by_text(cards: &[Card], query: &str) -> Vec<Card> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return cards.to_vec();
    }
    cards
        .iter()
        .filter(|c| c.front.to_lowercase().contains(&q) || c.back.to_lowercase().contains(&q))
        .cloned()
        .collect()
}

pub fn filter_by_deck(cards: &[Card], deck_id: DeckId) -> Vec<Card> {
    cards.iter().filter(|c| c.deck_id == deck_id).cloned().collect()
}
