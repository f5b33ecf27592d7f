//! Character creation flow: form input to stored character.

use std::sync::Arc;

use rand::Rng;

use catrineando_core::CatrineandoError;
use catrineando_core::assets::{self, BundledImage};
use catrineando_core::character::{Character, CharacterDraft, Gender};
use catrineando_core::error::Result;

use crate::character_store::CharacterStore;

/// A freshly created character together with the illustration it renders with.
#[derive(Debug, Clone)]
pub struct CreatedCharacter {
    pub character: Character,
    pub image: &'static BundledImage,
}

/// Turns raw form input into a stored character.
///
/// The image index is drawn here, once, and stays fixed for the character's
/// whole lifetime.
pub struct CharacterCreator {
    store: Arc<CharacterStore>,
}

impl CharacterCreator {
    pub fn new(store: Arc<CharacterStore>) -> Self {
        Self { store }
    }

    /// Creates a character with a randomly chosen illustration.
    pub async fn create(&self, name: &str, gender: Option<Gender>) -> Result<CreatedCharacter> {
        let draft = Self::draft(name, gender, &mut rand::thread_rng())?;
        self.store_draft(draft).await
    }

    /// Same as [`create`](Self::create) with a caller-supplied RNG.
    pub async fn create_with<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        name: &str,
        gender: Option<Gender>,
    ) -> Result<CreatedCharacter> {
        let draft = Self::draft(name, gender, rng)?;
        self.store_draft(draft).await
    }

    fn draft<R: Rng + ?Sized>(
        name: &str,
        gender: Option<Gender>,
        rng: &mut R,
    ) -> Result<CharacterDraft> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CatrineandoError::validation(
                "name",
                "Por favor ingresa tu nombre",
            ));
        }
        let gender = gender.ok_or_else(|| {
            CatrineandoError::validation("gender", "Por favor selecciona un personaje")
        })?;

        let image_index = assets::pick_random_index_with(rng, gender);
        Ok(CharacterDraft::new(name, gender, image_index))
    }

    async fn store_draft(&self, draft: CharacterDraft) -> Result<CreatedCharacter> {
        let character = self.store.add(draft).await?;
        let image = character.image();
        tracing::debug!(
            "[CharacterCreator] {} rendered with {}",
            character.id,
            image.asset_path
        );
        Ok(CreatedCharacter { character, image })
    }
}
