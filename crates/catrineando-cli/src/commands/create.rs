use std::sync::Arc;

use anyhow::Result;

use catrineando_application::{CharacterCreator, CharacterStore};
use catrineando_core::character::Gender;
use catrineando_core::share::share_title;

use super::gallery::describe;

pub async fn run(store: Arc<CharacterStore>, name: &str, gender: Option<Gender>) -> Result<()> {
    let creator = CharacterCreator::new(store);
    let created = creator.create(name, gender).await?;

    println!("✨ {}", share_title(&created.character.name, created.character.gender));
    println!("  {}", describe(&created.character));
    println!("  Illustration: {}", created.image.asset_path);
    println!(
        "  Share it with: catrineando share {}",
        created.character.id
    );
    Ok(())
}
