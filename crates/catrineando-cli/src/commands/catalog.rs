use anyhow::Result;

use catrineando_core::assets;
use catrineando_core::character::Gender;
use catrineando_core::tutorial::TUTORIAL_STEPS;

pub fn assets(gender: Option<Gender>) -> Result<()> {
    let genders = match gender {
        Some(gender) => vec![gender],
        None => Gender::ALL.to_vec(),
    };

    for gender in genders {
        println!("{} {}", gender.emoji(), gender.display_name());
        for image in assets::images(gender) {
            println!("  [{}] {}", image.index, image.asset_path);
        }
    }
    Ok(())
}

pub fn tutorial() -> Result<()> {
    for step in TUTORIAL_STEPS {
        println!("{}. {} {}", step.id, step.emoji, step.title);
        println!("   {}", step.description);
    }
    Ok(())
}
