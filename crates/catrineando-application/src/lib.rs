//! Application services: the character store and the creation flow built on it.

pub mod character_store;
pub mod creation;

pub use character_store::CharacterStore;
pub use creation::{CharacterCreator, CreatedCharacter};
