use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use catrineando_application::CharacterStore;
use catrineando_core::character::Gender;
use catrineando_infrastructure::{CatrineandoPaths, ConfigService, FileKeyValueStorage};

mod commands;
mod logging;

#[derive(Parser)]
#[command(name = "catrineando")]
#[command(about = "Catrineando - create your own Catrín or Catrina for Día de Muertos", long_about = None)]
struct Cli {
    /// Path to config.toml (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding saved characters (overrides the config file)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a character and save it to the gallery
    Create {
        /// Name shown on the illustration (up to 20 characters)
        #[arg(short, long)]
        name: String,
        /// catrin or catrina
        #[arg(short, long)]
        gender: Option<Gender>,
    },
    /// List saved characters
    List,
    /// Show one saved character
    Show { id: String },
    /// Delete one saved character
    Delete { id: String },
    /// Delete every saved character
    Clear {
        /// Confirm deleting everything
        #[arg(long)]
        yes: bool,
    },
    /// Share a saved character
    Share { id: String },
    /// List bundled illustrations
    Assets {
        #[arg(short, long)]
        gender: Option<Gender>,
    },
    /// Show how Catrineando works
    Tutorial,
}

/// Loads configuration, installs logging and opens the character store.
async fn bootstrap(cli: &Cli) -> Result<Arc<CharacterStore>> {
    let config_service = match &cli.config {
        Some(path) => ConfigService::with_path(path),
        None => ConfigService::new()?,
    };
    let config = config_service.get_config();

    let level = config
        .as_ref()
        .map(|c| c.logging.level.clone())
        .unwrap_or_else(|_| "info".to_string());
    logging::init(&level, cli.verbose);

    let mut config = config
        .with_context(|| format!("Failed to load {}", config_service.path().display()))?;
    if let Some(dir) = &cli.data_dir {
        config.storage.data_dir = Some(dir.clone());
    }

    let storage_dir = CatrineandoPaths::storage_dir(config.storage.data_dir.as_ref())
        .context("Failed to resolve storage directory")?;
    tracing::debug!("[Bootstrap] Storage directory: {}", storage_dir.display());

    let storage = Arc::new(FileKeyValueStorage::new(storage_dir));
    let store = Arc::new(CharacterStore::from_config(storage, &config));
    store.load().await;

    Ok(store)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let store = bootstrap(&cli).await?;

    match cli.command {
        Commands::Create { name, gender } => commands::create::run(store, &name, gender).await?,
        Commands::List => commands::gallery::list(&store)?,
        Commands::Show { id } => commands::gallery::show(&store, &id)?,
        Commands::Delete { id } => commands::gallery::delete(&store, &id).await?,
        Commands::Clear { yes } => commands::gallery::clear(&store, yes).await?,
        Commands::Share { id } => {
            commands::share::run(&store, &commands::share::StdoutSharer, &id).await?
        }
        Commands::Assets { gender } => commands::catalog::assets(gender)?,
        Commands::Tutorial => commands::catalog::tutorial()?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_create_with_gender() {
        let cli = Cli::try_parse_from([
            "catrineando",
            "create",
            "--name",
            "Ana",
            "--gender",
            "catrina",
        ])
        .unwrap();

        match cli.command {
            Commands::Create { name, gender } => {
                assert_eq!(name, "Ana");
                assert_eq!(gender, Some(Gender::Catrina));
            }
            _ => panic!("expected create"),
        }
    }

    #[test]
    fn test_rejects_unknown_gender() {
        let result = Cli::try_parse_from([
            "catrineando",
            "create",
            "--name",
            "Ana",
            "--gender",
            "calavera",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["catrineando", "list", "--data-dir", "/tmp/c", "-v"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/c")));
    }
}
