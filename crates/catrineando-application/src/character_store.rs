//! The character store: the single source of truth for created characters.
//!
//! The store keeps the ordered collection in memory and mirrors every mutation
//! to a [`KeyValueStorage`] as one JSON array under a single key. One instance
//! is created per process and shared with consumers through an `Arc`.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, broadcast};

use catrineando_core::character::{Character, CharacterDraft, CharacterEvent};
use catrineando_core::config::{AppConfig, PersistencePolicy};
use catrineando_core::error::Result;
use catrineando_core::storage::{CHARACTERS_KEY, KeyValueStorage};
use catrineando_infrastructure::dto::{decode_characters, encode_characters};

const EVENT_CAPACITY: usize = 64;

#[derive(Debug, Default)]
struct StoreState {
    characters: Vec<Character>,
    loaded: bool,
    /// Highest millisecond id issued or loaded; new ids are always above it.
    last_id: i64,
}

/// Ordered, persisted collection of characters.
///
/// Mutations are serialized through an internal async gate and each one
/// rewrites the whole persisted collection. Reads are synchronous snapshots.
///
/// What happens when a write to storage fails depends on the
/// [`PersistencePolicy`]: under `FailOpen` the in-memory change stands and the
/// failure is logged; under `FailClosed` the change is discarded and the error
/// returned.
pub struct CharacterStore {
    storage: Arc<dyn KeyValueStorage>,
    key: String,
    policy: PersistencePolicy,
    state: RwLock<StoreState>,
    write_gate: Mutex<()>,
    events: broadcast::Sender<CharacterEvent>,
}

impl CharacterStore {
    /// Creates an empty, not yet loaded store over `storage`.
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            storage,
            key: CHARACTERS_KEY.to_string(),
            policy: PersistencePolicy::default(),
            state: RwLock::new(StoreState::default()),
            write_gate: Mutex::new(()),
            events,
        }
    }

    /// Creates a store using the storage key and policy from `config`.
    pub fn from_config(storage: Arc<dyn KeyValueStorage>, config: &AppConfig) -> Self {
        Self::new(storage)
            .with_key(config.storage.key.clone())
            .with_policy(config.persistence.policy)
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn with_policy(mut self, policy: PersistencePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> PersistencePolicy {
        self.policy
    }

    /// Subscribes to change notifications.
    ///
    /// Receivers only see events sent after they subscribed.
    pub fn subscribe(&self) -> broadcast::Receiver<CharacterEvent> {
        self.events.subscribe()
    }

    // ============================================================================
    // Mutations
    // ============================================================================

    /// Reads the persisted collection, replacing whatever is in memory.
    ///
    /// Never fails: a missing value gives an empty collection, and a storage
    /// error or malformed payload is logged and also gives an empty collection.
    /// Returns the number of characters loaded.
    pub async fn load(&self) -> usize {
        let _gate = self.write_gate.lock().await;
        self.load_locked().await
    }

    /// Loads the persisted collection first if nothing has been loaded yet,
    /// so a mutation never overwrites a collection it has not seen.
    ///
    /// Callers must hold the write gate.
    async fn ensure_loaded(&self) {
        if !self.read_state().loaded {
            self.load_locked().await;
        }
    }

    async fn load_locked(&self) -> usize {
        let characters = match self.storage.get_item(&self.key).await {
            Ok(None) => {
                tracing::debug!("[CharacterStore] No saved characters under '{}'", self.key);
                Vec::new()
            }
            Ok(Some(payload)) => match decode_characters(&payload) {
                Ok(decoded) => {
                    for character in &decoded.rejected {
                        tracing::warn!(
                            "[CharacterStore] Dropping character {} with invalid image index {} for {}",
                            character.id,
                            character.image_index,
                            character.gender
                        );
                    }
                    decoded.characters
                }
                Err(e) => {
                    tracing::error!(
                        "[CharacterStore] Saved characters are malformed, starting empty: {}",
                        e
                    );
                    Vec::new()
                }
            },
            Err(e) => {
                tracing::error!(
                    "[CharacterStore] Failed to read saved characters, starting empty: {}",
                    e
                );
                Vec::new()
            }
        };

        let count = characters.len();
        {
            let mut state = self.write_state();
            state.last_id = characters
                .iter()
                .filter_map(|c| c.id.parse::<i64>().ok())
                .fold(state.last_id, i64::max);
            state.characters = characters;
            state.loaded = true;
        }

        tracing::info!("[CharacterStore] Loaded {} characters", count);
        self.publish(CharacterEvent::Loaded { count });
        count
    }

    /// Validates `draft`, assigns an id and creation time, appends the new
    /// character and persists the collection.
    ///
    /// Validation errors are returned before anything changes.
    pub async fn add(&self, draft: CharacterDraft) -> Result<Character> {
        let draft = draft.validate()?;
        let _gate = self.write_gate.lock().await;
        self.ensure_loaded().await;

        let now = Utc::now();
        let (character, updated) = {
            let state = self.read_state();
            let id = next_id(&state, now);
            let character = Character::from_draft(id, draft, now);
            let mut updated = state.characters.clone();
            updated.push(character.clone());
            (character, updated)
        };

        let persisted = self.persist(&updated).await;
        self.settle("add", persisted)?;

        {
            let mut state = self.write_state();
            state.last_id = state.last_id.max(character.id.parse().unwrap_or(0));
            state.characters = updated;
        }

        tracing::info!(
            "[CharacterStore] Added {} '{}' ({})",
            character.gender,
            character.name,
            character.id
        );
        self.publish(CharacterEvent::Added {
            id: character.id.clone(),
        });
        Ok(character)
    }

    /// Removes the character with `id`. Removing an unknown id is a no-op.
    pub async fn remove(&self, id: &str) -> Result<()> {
        let _gate = self.write_gate.lock().await;
        self.ensure_loaded().await;

        let updated = {
            let state = self.read_state();
            if !state.characters.iter().any(|c| c.id == id) {
                tracing::debug!("[CharacterStore] Nothing to remove for id {}", id);
                return Ok(());
            }
            state
                .characters
                .iter()
                .filter(|c| c.id != id)
                .cloned()
                .collect::<Vec<_>>()
        };

        let persisted = self.persist(&updated).await;
        self.settle("remove", persisted)?;

        self.write_state().characters = updated;

        tracing::info!("[CharacterStore] Removed character {}", id);
        self.publish(CharacterEvent::Removed { id: id.to_string() });
        Ok(())
    }

    /// Clears the collection in memory and in storage.
    ///
    /// The storage value is removed even when the in-memory collection is
    /// already empty, so a payload `load` could not parse is cleared too.
    pub async fn remove_all(&self) -> Result<()> {
        let _gate = self.write_gate.lock().await;
        self.ensure_loaded().await;

        let removed = self.storage.remove_item(&self.key).await;
        self.settle("remove_all", removed)?;

        let cleared = {
            let mut state = self.write_state();
            let count = state.characters.len();
            state.characters.clear();
            count
        };

        if cleared > 0 {
            tracing::info!("[CharacterStore] Removed all {} characters", cleared);
            self.publish(CharacterEvent::Cleared);
        }
        Ok(())
    }

    // ============================================================================
    // Queries
    // ============================================================================

    /// Looks up a character by id.
    pub fn find_by_id(&self, id: &str) -> Option<Character> {
        self.read_state()
            .characters
            .iter()
            .find(|c| c.id == id)
            .cloned()
    }

    /// Snapshot of the collection in insertion order.
    pub fn characters(&self) -> Vec<Character> {
        self.read_state().characters.clone()
    }

    pub fn len(&self) -> usize {
        self.read_state().characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read_state().characters.is_empty()
    }

    /// Whether `load` has completed at least once.
    pub fn is_loaded(&self) -> bool {
        self.read_state().loaded
    }

    // ============================================================================
    // Internals
    // ============================================================================

    async fn persist(&self, characters: &[Character]) -> Result<()> {
        let payload = encode_characters(characters)?;
        self.storage.set_item(&self.key, &payload).await
    }

    /// Applies the persistence policy to a storage outcome.
    ///
    /// `Ok` means the in-memory change should be committed.
    fn settle(&self, operation: &str, outcome: Result<()>) -> Result<()> {
        match (outcome, self.policy) {
            (Ok(()), _) => Ok(()),
            (Err(e), PersistencePolicy::FailOpen) => {
                tracing::error!(
                    "[CharacterStore] Failed to persist {}, keeping in-memory change: {}",
                    operation,
                    e
                );
                Ok(())
            }
            (Err(e), PersistencePolicy::FailClosed) => {
                tracing::warn!(
                    "[CharacterStore] Failed to persist {}, change discarded: {}",
                    operation,
                    e
                );
                Err(e)
            }
        }
    }

    fn publish(&self, event: CharacterEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }

    fn read_state(&self) -> RwLockReadGuard<'_, StoreState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, StoreState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Millisecond timestamp id, bumped past every id already issued or present.
///
/// A loaded id at `i64::MAX` leaves nothing above it; the search then walks
/// down from the current time to the nearest free value instead.
fn next_id(state: &StoreState, now: DateTime<Utc>) -> String {
    let taken = |candidate: i64| {
        let candidate = candidate.to_string();
        state.characters.iter().any(|c| c.id == candidate)
    };

    let mut candidate = now.timestamp_millis().max(state.last_id.saturating_add(1));
    while taken(candidate) {
        match candidate.checked_add(1) {
            Some(next) => candidate = next,
            None => break,
        }
    }
    if !taken(candidate) {
        return candidate.to_string();
    }

    let mut candidate = now.timestamp_millis();
    while taken(candidate) {
        candidate = candidate.saturating_sub(1);
    }
    candidate.to_string()
}
