use async_trait::async_trait;
use chrono::{DateTime, Utc};
use gamideck_core::{repo::Repository, Card, CardId, CoreError, Deck, DeckId, ReminderSettings};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tokio::{sync::Mutex, task};
use tracing::{debug, info, warn};

pub mod paths;

const FILE_VERSION: u32 = 1;
pub const DEFAULT_MAX_BACKUPS: usize = 10;

#[derive(Clone, Serialize, Deserialize)]
struct DeckReminder {
    deck_id: DeckId,
    settings: ReminderSettings,
}

#[derive(Clone, Serialize, Deserialize)]
struct FileImage {
    version: u32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    decks: Vec<Deck>,
    cards: Vec<Card>,
    #[serde(default)]
    reminders: Vec<DeckReminder>,
}

#[derive(Clone)]
struct State {
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    decks: HashMap<DeckId, Deck>,
    // insertion order is the review order
    cards: Vec<Card>,
    reminders: HashMap<DeckId, ReminderSettings>,
}

impl State {
    fn new_empty() -> Self {
        let now = Utc::now();
        Self {
            created_at: now,
            updated_at: now,
            decks: HashMap::new(),
            cards: Vec::new(),
            reminders: HashMap::new(),
        }
    }

    fn to_image(&self) -> FileImage {
        let mut decks: Vec<Deck> = self.decks.values().cloned().collect();
        decks.sort_by_key(|d| d.created_at);
        FileImage {
            version: FILE_VERSION,
            created_at: self.created_at,
            updated_at: self.updated_at,
            decks,
            cards: self.cards.clone(),
            reminders: self
                .reminders
                .iter()
                .map(|(deck_id, settings)| DeckReminder {
                    deck_id: *deck_id,
                    settings: settings.clone(),
                })
                .collect(),
        }
    }

    fn from_image(img: FileImage) -> Result<Self, CoreError> {
        if img.version > FILE_VERSION {
            return Err(CoreError::Storage("unsupported store version"));
        }
        let decks = img.decks.into_iter().map(|d| (d.id, d)).collect();
        let reminders = img
            .reminders
            .into_iter()
            .map(|r| (r.deck_id, r.settings))
            .collect();
        Ok(Self {
            created_at: img.created_at,
            updated_at: img.updated_at,
            decks,
            cards: img.cards,
            reminders,
        })
    }

    fn require_deck(&self, id: DeckId) -> Result<(), CoreError> {
        if self.decks.contains_key(&id) {
            Ok(())
        } else {
            Err(CoreError::NotFound("deck"))
        }
    }
}

/// Deck library kept in a single JSON file. Every mutation rewrites the file
/// atomically and drops a timestamped copy into the backups directory.
///
/// Mutations are staged on a copy of the state and only become visible once
/// the file write succeeds, so a failed save leaves memory matching disk.
pub struct JsonStore {
    path: PathBuf,
    backups_dir: PathBuf,
    max_backups: usize,
    state: RwLock<State>,
    // one writer at a time, held across the file write
    writer: Mutex<()>,
}

impl JsonStore {
    pub async fn open_default() -> Result<Self, CoreError> {
        let (file, backups) = paths::default_store_file();
        Self::open_with(file, backups, DEFAULT_MAX_BACKUPS).await
    }

    pub async fn open_in(root: &Path, max_backups: usize) -> Result<Self, CoreError> {
        let (file, backups) = paths::store_files(root);
        Self::open_with(file, backups, max_backups).await
    }

    pub async fn open_with(path: PathBuf, backups_dir: PathBuf, max_backups: usize) -> Result<Self, CoreError> {
        ensure_parent_dirs(&path)?;
        ensure_dir(&backups_dir)?;
        let state = load_or_init(&path).await?;
        info!(path = %path.display(), decks = state.decks.len(), cards = state.cards.len(), "json store opened");
        Ok(Self {
            path,
            backups_dir,
            max_backups: max_backups.max(1),
            state: RwLock::new(state),
            writer: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Applies `f` to a copy of the state, writes it out, then installs it.
    async fn commit<T, F>(&self, f: F) -> Result<T, CoreError>
    where
        T: Send,
        F: FnOnce(&mut State) -> Result<T, CoreError> + Send,
    {
        let _gate = self.writer.lock().await;
        let mut next = self.state.read().clone();
        let out = f(&mut next)?;
        next.updated_at = Utc::now();
        self.save(next.to_image()).await?;
        *self.state.write() = next;
        Ok(out)
    }

    async fn save(&self, snapshot: FileImage) -> Result<(), CoreError> {
        let path = self.path.clone();
        let backups = self.backups_dir.clone();
        let keep = self.max_backups;

        task::spawn_blocking(move || write_with_backup(&path, &backups, keep, &snapshot))
            .await
            .map_err(|_| CoreError::Storage("io"))?
            .map_err(|e| {
                warn!(error = %e, "json store write failed");
                CoreError::Storage("io")
            })?;
        debug!(path = %self.path.display(), "json store saved");
        Ok(())
    }
}

fn ensure_parent_dirs(path: &Path) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    Ok(())
}

fn ensure_dir(path: &Path) -> Result<(), CoreError> {
    fs::create_dir_all(path).map_err(|_| CoreError::Storage("io"))
}

async fn load_or_init(path: &Path) -> Result<State, CoreError> {
    if path.exists() {
        let p = path.to_path_buf();
        let img: FileImage = task::spawn_blocking(move || {
            let buf = fs::read_to_string(&p)?;
            let v = serde_json::from_str::<FileImage>(&buf)?;
            Ok::<FileImage, std::io::Error>(v)
        })
        .await
        .map_err(|_| CoreError::Storage("io"))?
        .map_err(|e| {
            warn!(error = %e, "json store unreadable");
            CoreError::Storage("corrupt store file")
        })?;
        let mut st = State::from_image(img)?;
        st.updated_at = Utc::now();
        Ok(st)
    } else {
        let st = State::new_empty();
        write_atomic(path, &encode(&st.to_image())?).map_err(|_| CoreError::Storage("io"))?;
        Ok(st)
    }
}

fn encode(img: &FileImage) -> Result<Vec<u8>, CoreError> {
    serde_json::to_vec_pretty(img).map_err(|_| CoreError::Storage("serialize"))
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), std::io::Error> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir)?;
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

fn write_with_backup(path: &Path, backups_dir: &Path, max_backups: usize, img: &FileImage) -> Result<(), std::io::Error> {
    let json = serde_json::to_vec_pretty(img)?;
    write_atomic(path, &json)?;

    // the library itself is saved at this point; a missed backup is only logged
    let backup = || -> Result<(), std::io::Error> {
        fs::create_dir_all(backups_dir)?;
        let ts = chrono::Local::now().format("%Y%m%d-%H%M%S%.3f");
        let backup_path = backups_dir.join(format!("gamideck-{ts}.json"));
        write_atomic(&backup_path, &json)?;
        rotate_backups(backups_dir, max_backups)
    };
    if let Err(e) = backup() {
        warn!(error = %e, dir = %backups_dir.display(), "backup failed");
    }
    Ok(())
}

fn rotate_backups(dir: &Path, keep: usize) -> Result<(), std::io::Error> {
    let mut entries: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.extension().and_then(|s| s.to_str()) == Some("json"))
        .collect();
    // names embed the timestamp, so lexical order is age order
    entries.sort();
    if entries.len() > keep {
        for p in &entries[..entries.len() - keep] {
            let _ = fs::remove_file(p);
        }
    }
    Ok(())
}

#[async_trait]
impl Repository for JsonStore {
    async fn create_deck(&self, name: &str) -> Result<Deck, CoreError> {
        if name.trim().is_empty() {
            return Err(CoreError::Invalid("deck name is empty"));
        }
        let deck = Deck::new(name);
        self.commit(|s| {
            if s.decks.values().any(|d| d.name.eq_ignore_ascii_case(name)) {
                return Err(CoreError::Conflict("deck name already exists"));
            }
            s.decks.insert(deck.id, deck.clone());
            Ok(())
        })
        .await?;
        info!(deck = %deck.id, name, "deck created");
        Ok(deck)
    }

    async fn get_deck(&self, id: DeckId) -> Result<Deck, CoreError> {
        let s = self.state.read();
        s.decks.get(&id).cloned().ok_or(CoreError::NotFound("deck"))
    }

    async fn list_decks(&self) -> Result<Vec<Deck>, CoreError> {
        let s = self.state.read();
        let mut v: Vec<Deck> = s.decks.values().cloned().collect();
        v.sort_by_key(|d| d.created_at);
        Ok(v)
    }

    async fn delete_deck(&self, id: DeckId) -> Result<(), CoreError> {
        self.commit(|s| {
            if s.decks.remove(&id).is_none() {
                return Err(CoreError::NotFound("deck"));
            }
            s.cards.retain(|c| c.deck_id != id);
            s.reminders.remove(&id);
            Ok(())
        })
        .await?;
        info!(deck = %id, "deck deleted");
        Ok(())
    }

    async fn add_card(&self, deck_id: DeckId, front: &str, back: &str) -> Result<Card, CoreError> {
        let card = self
            .commit(|s| {
                s.require_deck(deck_id)?;
                let c = Card::new(deck_id, front, back);
                s.cards.push(c.clone());
                Ok(c)
            })
            .await?;
        debug!(card = %card.id, deck = %deck_id, "card added");
        Ok(card)
    }

    async fn get_card(&self, id: CardId) -> Result<Card, CoreError> {
        let s = self.state.read();
        s.cards
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or(CoreError::NotFound("card"))
    }

    async fn list_cards(&self, deck_id: Option<DeckId>) -> Result<Vec<Card>, CoreError> {
        let s = self.state.read();
        Ok(match deck_id {
            Some(did) => gamideck_core::filter_by_deck(&s.cards, did),
            None => s.cards.clone(),
        })
    }

    async fn delete_card(&self, id: CardId) -> Result<(), CoreError> {
        self.commit(|s| {
            let before = s.cards.len();
            s.cards.retain(|c| c.id != id);
            if s.cards.len() == before {
                return Err(CoreError::NotFound("card"));
            }
            Ok(())
        })
        .await
    }

    async fn get_reminder(&self, deck_id: DeckId) -> Result<ReminderSettings, CoreError> {
        let s = self.state.read();
        s.require_deck(deck_id)?;
        Ok(s.reminders.get(&deck_id).cloned().unwrap_or_default())
    }

    async fn set_reminder(&self, deck_id: DeckId, settings: &ReminderSettings) -> Result<(), CoreError> {
        self.commit(|s| {
            s.require_deck(deck_id)?;
            s.reminders.insert(deck_id, settings.clone());
            Ok(())
        })
        .await
    }
}
