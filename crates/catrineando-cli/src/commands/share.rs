use anyhow::{Result, bail};
use async_trait::async_trait;

use catrineando_application::CharacterStore;
use catrineando_core::error::Result as CoreResult;
use catrineando_core::share::{ImageSharer, SharePayload};

/// Terminal stand-in for the platform share sheet: prints the payload.
pub struct StdoutSharer;

#[async_trait]
impl ImageSharer for StdoutSharer {
    async fn is_available(&self) -> bool {
        true
    }

    async fn share(&self, payload: &SharePayload) -> CoreResult<()> {
        println!("📤 {}", payload.title);
        println!("  {} ({})", payload.image_path, payload.mime_type);
        println!("  {}", payload.message);
        Ok(())
    }
}

pub async fn run(store: &CharacterStore, sharer: &dyn ImageSharer, id: &str) -> Result<()> {
    let Some(character) = store.find_by_id(id) else {
        bail!("Character {} not found", id);
    };

    let payload = SharePayload::for_character(&character);
    if !sharer.is_available().await {
        // Text-only fallback.
        println!("{}", payload.message);
        return Ok(());
    }

    sharer.share(&payload).await?;
    tracing::debug!("[Share] Shared {}", payload.character_id);
    Ok(())
}
