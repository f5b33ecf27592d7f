//! Share payloads for exported character images.
//!
//! Capturing the rendered view and presenting the platform share sheet are
//! collaborator concerns; this module only prepares the text and metadata they
//! need and defines the narrow [`ImageSharer`] seam.

use async_trait::async_trait;
use serde::Serialize;

use crate::character::{Character, Gender};
use crate::error::Result;

/// MIME type of captured character images.
pub const SHARE_MIME_TYPE: &str = "image/png";

/// Share-sheet title, e.g. "Ana la Catrina".
pub fn share_title(name: &str, gender: Gender) -> String {
    format!("{} {}", name, gender.with_article())
}

/// Message used when the platform can only share text.
pub fn share_message(name: &str, gender: Gender) -> String {
    format!(
        "¡Mira mi {} para el Día de Muertos! 💀🌺 Mi nombre es {}. ¡Crea el tuyo en Catrineando!",
        gender.display_name(),
        name
    )
}

/// Everything a share collaborator needs to publish one character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SharePayload {
    pub character_id: String,
    pub title: String,
    pub message: String,
    pub mime_type: &'static str,
    /// Bundled illustration the captured image is rendered from.
    pub image_path: &'static str,
}

impl SharePayload {
    pub fn for_character(character: &Character) -> Self {
        Self {
            character_id: character.id.clone(),
            title: share_title(&character.name, character.gender),
            message: share_message(&character.name, character.gender),
            mime_type: SHARE_MIME_TYPE,
            image_path: character.image().asset_path,
        }
    }
}

/// Platform share mechanism.
#[async_trait]
pub trait ImageSharer: Send + Sync {
    /// Whether sharing images is possible on this device.
    async fn is_available(&self) -> bool;

    /// Hands the payload to the platform.
    async fn share(&self, payload: &SharePayload) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::CharacterDraft;
    use chrono::Utc;

    fn sample(gender: Gender, index: usize) -> Character {
        Character::from_draft("1", CharacterDraft::new("Luis", gender, index), Utc::now())
    }

    #[test]
    fn test_share_title_uses_article() {
        assert_eq!(share_title("Luis", Gender::Catrin), "Luis el Catrín");
        assert_eq!(share_title("Ana", Gender::Catrina), "Ana la Catrina");
    }

    #[test]
    fn test_share_message_mentions_name_and_variant() {
        let message = share_message("Ana", Gender::Catrina);
        assert!(message.starts_with("¡Mira mi Catrina para el Día de Muertos!"));
        assert!(message.contains("Mi nombre es Ana."));
    }

    #[test]
    fn test_payload_resolves_bundled_image() {
        let payload = SharePayload::for_character(&sample(Gender::Catrin, 1));
        assert_eq!(payload.title, "Luis el Catrín");
        assert_eq!(payload.mime_type, "image/png");
        assert_eq!(payload.image_path, "assets/images/catrines/catrin-2.jpg");
    }
}
