//! Data transfer objects for persistence.

pub mod character;

pub use character::{CharacterRecord, DecodedCharacters, decode_characters, encode_characters};
