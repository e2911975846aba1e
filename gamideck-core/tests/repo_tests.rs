use gamideck_core::{
    ensure_deck, filter_by_text, memory::MemoryRepo, resolve_deck, CoreError, ReminderFrequency,
    ReminderSettings, Repository, ReviewSession,
};

#[tokio::test]
async fn deck_and_card_lifecycle() {
    let repo = MemoryRepo::new();
    let deck = repo.create_deck("Basic Korean").await.unwrap();
    assert_eq!(
        repo.create_deck("basic korean").await.unwrap_err(),
        CoreError::Conflict("deck name already exists")
    );

    let a = repo.add_card(deck.id, "annyeong", "hello").await.unwrap();
    let b = repo.add_card(deck.id, "gamsahamnida", "thank you").await.unwrap();

    let listed = repo.list_cards(Some(deck.id)).await.unwrap();
    assert_eq!(listed.iter().map(|c| c.id).collect::<Vec<_>>(), [a.id, b.id]);

    repo.delete_card(a.id).await.unwrap();
    assert_eq!(repo.get_card(a.id).await.unwrap_err(), CoreError::NotFound("card"));

    repo.delete_deck(deck.id).await.unwrap();
    assert!(repo.list_cards(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn add_card_to_missing_deck_fails() {
    let repo = MemoryRepo::new();
    let err = repo.add_card(uuid::Uuid::new_v4(), "q", "a").await.unwrap_err();
    assert_eq!(err, CoreError::NotFound("deck"));
}

#[tokio::test]
async fn resolve_by_name_or_id() {
    let repo = MemoryRepo::new();
    let deck = repo.create_deck("Introduction to Logic").await.unwrap();

    assert_eq!(resolve_deck(&repo, "introduction to logic").await.unwrap(), deck);
    assert_eq!(resolve_deck(&repo, &deck.id.to_string()).await.unwrap(), deck);
    assert!(resolve_deck(&repo, "nope").await.is_err());

    let again = ensure_deck(&repo, "Introduction to Logic").await.unwrap();
    assert_eq!(again.id, deck.id);
    let fresh = ensure_deck(&repo, "Basic Japanese").await.unwrap();
    assert_ne!(fresh.id, deck.id);
}

#[tokio::test]
async fn reminders_default_and_update() {
    let repo = MemoryRepo::new();
    let deck = repo.create_deck("CS6250").await.unwrap();
    assert_eq!(repo.get_reminder(deck.id).await.unwrap(), ReminderSettings::default());

    let settings = ReminderSettings {
        enabled: true,
        frequency: ReminderFrequency::EveryDays(2),
        ..Default::default()
    };
    repo.set_reminder(deck.id, &settings).await.unwrap();
    assert_eq!(repo.get_reminder(deck.id).await.unwrap(), settings);
}

#[tokio::test]
async fn session_from_repo_keeps_insertion_order() {
    let repo = MemoryRepo::new();
    let deck = repo.create_deck("Python").await.unwrap();
    for (f, b) in [("list", "[]"), ("dict", "{}"), ("tuple", "()")] {
        repo.add_card(deck.id, f, b).await.unwrap();
    }
    let cards = repo.list_cards(Some(deck.id)).await.unwrap();
    let session = ReviewSession::new(cards.clone()).unwrap();
    assert_eq!(session.active_card().unwrap().front, "list");

    assert_eq!(filter_by_text(&cards, "DIC").len(), 1);
    assert_eq!(filter_by_text(&cards, "  ").len(), 3);
}
