use anyhow::{Result, bail};
use chrono::Local;

use catrineando_application::CharacterStore;
use catrineando_core::character::Character;

/// One-line summary used by every command that prints a character.
pub fn describe(character: &Character) -> String {
    format!(
        "{} {} {} [{}] · {} · {}",
        character.gender.emoji(),
        character.name,
        character.gender.display_name(),
        character.id,
        character
            .created_at
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M"),
        character.image().asset_path
    )
}

pub fn list(store: &CharacterStore) -> Result<()> {
    let characters = store.characters();
    if characters.is_empty() {
        println!("🕯️  Your gallery is empty. Create one with: catrineando create --name <NAME> --gender <catrin|catrina>");
        return Ok(());
    }

    println!("💀 {} characters", characters.len());
    for character in &characters {
        println!("  {}", describe(character));
    }
    Ok(())
}

pub fn show(store: &CharacterStore, id: &str) -> Result<()> {
    let Some(character) = store.find_by_id(id) else {
        bail!("Character {} not found", id);
    };
    println!("{}", serde_json::to_string_pretty(&character)?);
    println!("{}", describe(&character));
    Ok(())
}

pub async fn delete(store: &CharacterStore, id: &str) -> Result<()> {
    match store.find_by_id(id) {
        Some(character) => {
            store.remove(id).await?;
            println!("🗑️  Deleted {}", character.name);
        }
        // Deleting is idempotent; say so instead of failing.
        None => println!("Nothing to delete for {}", id),
    }
    Ok(())
}

pub async fn clear(store: &CharacterStore, confirmed: bool) -> Result<()> {
    if store.is_empty() {
        // Still clears a saved payload that failed to load.
        store.remove_all().await?;
        println!("Your gallery is already empty.");
        return Ok(());
    }
    if !confirmed {
        println!(
            "¿Estás seguro de eliminar todos los personajes? ({} saved) Re-run with --yes to confirm.",
            store.len()
        );
        return Ok(());
    }

    let count = store.len();
    store.remove_all().await?;
    println!("🗑️  Deleted {} characters", count);
    Ok(())
}
