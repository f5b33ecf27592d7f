//! Persisted character collection format.
//!
//! The whole collection is one JSON array of records with camelCase keys:
//!
//! ```json
//! [{"id":"1730462400000","name":"Ana","gender":"catrina","imageIndex":0,
//!   "createdAt":"2024-11-01T12:00:00.000Z"}]
//! ```
//!
//! There is no version field; every save rewrites the array.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use catrineando_core::character::{Character, Gender};
use catrineando_core::error::Result;

/// One persisted character.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterRecord {
    pub id: String,
    pub name: String,
    pub gender: Gender,
    /// Records written before the index was stored default to the first image.
    #[serde(default)]
    pub image_index: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_uri: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&Character> for CharacterRecord {
    fn from(character: &Character) -> Self {
        CharacterRecord {
            id: character.id.clone(),
            name: character.name.clone(),
            gender: character.gender,
            image_index: character.image_index,
            image_uri: character.image_uri.clone(),
            created_at: character.created_at,
        }
    }
}

impl From<CharacterRecord> for Character {
    fn from(record: CharacterRecord) -> Self {
        Character {
            id: record.id,
            name: record.name,
            gender: record.gender,
            image_index: record.image_index,
            image_uri: record.image_uri,
            created_at: record.created_at,
        }
    }
}

/// Result of decoding a persisted collection.
#[derive(Debug, Default)]
pub struct DecodedCharacters {
    /// Valid characters in stored order.
    pub characters: Vec<Character>,
    /// Records dropped because their image index is invalid for their gender.
    pub rejected: Vec<Character>,
}

/// Serializes the collection in order.
pub fn encode_characters(characters: &[Character]) -> Result<String> {
    let records: Vec<CharacterRecord> = characters.iter().map(CharacterRecord::from).collect();
    Ok(serde_json::to_string(&records)?)
}

/// Parses a persisted collection.
///
/// Fails if the payload is not a JSON array of records. Records that parse but
/// break the image index invariant are returned in `rejected` instead.
pub fn decode_characters(payload: &str) -> Result<DecodedCharacters> {
    let records: Vec<CharacterRecord> = serde_json::from_str(payload)?;

    let (characters, rejected): (Vec<Character>, Vec<Character>) = records
        .into_iter()
        .map(Character::from)
        .partition(Character::has_valid_image);

    Ok(DecodedCharacters {
        characters,
        rejected,
    })
}
