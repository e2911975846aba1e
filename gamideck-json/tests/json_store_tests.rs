use gamideck_core::{CoreError, ReminderFrequency, ReminderSettings, Repository};
use gamideck_json::JsonStore;
use std::fs;

#[tokio::test]
async fn data_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();

    let (deck_id, card_ids) = {
        let store = JsonStore::open_in(dir.path(), 3).await.unwrap();
        let deck = store.create_deck("Basic Japanese").await.unwrap();
        let a = store.add_card(deck.id, "neko", "cat").await.unwrap();
        let b = store.add_card(deck.id, "inu", "dog").await.unwrap();
        let settings = ReminderSettings {
            enabled: true,
            frequency: ReminderFrequency::EveryDays(3),
            ..Default::default()
        };
        store.set_reminder(deck.id, &settings).await.unwrap();
        (deck.id, vec![a.id, b.id])
    };

    let store = JsonStore::open_in(dir.path(), 3).await.unwrap();
    let deck = store.get_deck(deck_id).await.unwrap();
    assert_eq!(deck.name, "Basic Japanese");
    let cards = store.list_cards(Some(deck_id)).await.unwrap();
    assert_eq!(cards.iter().map(|c| c.id).collect::<Vec<_>>(), card_ids);
    let reminder = store.get_reminder(deck_id).await.unwrap();
    assert!(reminder.enabled);
    assert_eq!(reminder.frequency, ReminderFrequency::EveryDays(3));
}

#[tokio::test]
async fn delete_deck_cascades_to_cards() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonStore::open_in(dir.path(), 3).await.unwrap();
    let keep = store.create_deck("Keep").await.unwrap();
    let gone = store.create_deck("Gone").await.unwrap();
    store.add_card(keep.id, "q1", "a1").await.unwrap();
    store.add_card(gone.id, "q2", "a2").await.unwrap();

    store.delete_deck(gone.id).await.unwrap();

    let all = store.list_cards(None).await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].deck_id, keep.id);
    assert_eq!(store.get_reminder(gone.id).await.unwrap_err(), CoreError::NotFound("deck"));
}

#[tokio::test]
async fn duplicate_deck_name_conflicts() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonStore::open_in(dir.path(), 3).await.unwrap();
    store.create_deck("CSE6350").await.unwrap();
    let err = store.create_deck("cse6350").await.unwrap_err();
    assert_eq!(err, CoreError::Conflict("deck name already exists"));
}

#[tokio::test]
async fn backups_are_rotated() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonStore::open_in(dir.path(), 2).await.unwrap();
    let deck = store.create_deck("Logic").await.unwrap();
    for i in 0..5 {
        store.add_card(deck.id, &format!("q{i}"), "a").await.unwrap();
    }
    let backups = fs::read_dir(dir.path().join("backups")).unwrap().count();
    assert!(backups <= 2, "expected at most 2 backups, found {backups}");
    assert!(backups >= 1);
}

#[tokio::test]
async fn corrupt_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("gamideck.json"), b"{ not json").unwrap();
    let err = JsonStore::open_in(dir.path(), 3).await.err().unwrap();
    assert!(matches!(err, CoreError::Storage(_)));
}

#[tokio::test]
async fn failed_write_leaves_memory_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("lib");
    let store = JsonStore::open_in(&root, 3).await.unwrap();
    let deck = store.create_deck("Rust").await.unwrap();

    // a plain file where the library directory was makes every write fail
    fs::remove_dir_all(&root).unwrap();
    fs::write(&root, b"").unwrap();

    let err = store.add_card(deck.id, "Box", "heap pointer").await.unwrap_err();
    assert_eq!(err, CoreError::Storage("io"));
    assert!(store.list_cards(Some(deck.id)).await.unwrap().is_empty());

    let err = store.delete_deck(deck.id).await.unwrap_err();
    assert_eq!(err, CoreError::Storage("io"));
    assert_eq!(store.get_deck(deck.id).await.unwrap().name, "Rust");

    fs::remove_file(&root).unwrap();
    let card = store.add_card(deck.id, "Box", "heap pointer").await.unwrap();
    assert_eq!(store.list_cards(None).await.unwrap(), vec![card]);
}
