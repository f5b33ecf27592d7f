//! Character domain models and change events.
//!
//! A character is a user-named Catrín or Catrina bound to one bundled
//! illustration. Characters are append-only: they are created and removed,
//! never edited.

mod event;
mod model;

pub use event::CharacterEvent;
pub use model::{Character, CharacterDraft, Gender, NAME_MAX_CHARS};
