use serde::{Deserialize, Serialize};

/// Change notifications published by the character store.
///
/// Subscribers re-read the current snapshot on receipt; events carry only
/// enough to decide whether that is worth doing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CharacterEvent {
    /// The persisted collection was read at startup.
    Loaded { count: usize },
    /// A character was appended.
    Added { id: String },
    /// A single character was removed.
    Removed { id: String },
    /// The whole collection was cleared.
    Cleared,
}
