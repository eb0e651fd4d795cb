//! Chargen - Development Tools

use std::path::PathBuf;

use chargen_tools::loader::{load_catalog, load_catalog_data, load_character, save_character};
use chargen_tools::summary::CharacterSummary;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "chargen")]
#[command(about = "Character creation tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a catalog file
    Validate {
        /// Path to catalog RON file
        #[arg(default_value = "assets/data/catalog.ron")]
        path: PathBuf,
    },
    /// Write a fresh character file
    New {
        /// Path to catalog RON file
        #[arg(long, default_value = "assets/data/catalog.ron")]
        catalog: PathBuf,
        /// Character name
        #[arg(long, default_value = "")]
        name: String,
        /// Output character RON file
        output: PathBuf,
    },
    /// Summarize a character file
    Summary {
        /// Path to catalog RON file
        #[arg(long, default_value = "assets/data/catalog.ron")]
        catalog: PathBuf,
        /// Character RON file
        character: PathBuf,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { path } => {
            tracing::info!("Validating catalog: {}", path.display());
            let data = load_catalog_data(&path).unwrap_or_else(|e| fail(&e));
            let errors = data.validate();
            if errors.is_empty() {
                tracing::info!("Validation passed");
            } else {
                for error in &errors {
                    tracing::error!("{error}");
                }
                tracing::error!("Validation failed with {} errors", errors.len());
                std::process::exit(1);
            }
        }
        Commands::New {
            catalog,
            name,
            output,
        } => {
            let catalog = load_catalog(&catalog).unwrap_or_else(|e| fail(&e));
            let mut character = catalog.new_character();
            character.set_name(name);
            save_character(&output, &character).unwrap_or_else(|e| fail(&e));
            tracing::info!("Wrote {}", output.display());
        }
        Commands::Summary {
            catalog,
            character,
            json,
        } => {
            let catalog = load_catalog(&catalog).unwrap_or_else(|e| fail(&e));
            let character = load_character(&character).unwrap_or_else(|e| fail(&e));
            let summary = CharacterSummary::new(&character, &catalog);
            if json {
                let text = summary.to_json().unwrap_or_else(|e| fail(&e));
                println!("{text}");
            } else {
                print!("{}", summary.to_text());
            }
            if !summary.report.is_valid() {
                std::process::exit(2);
            }
        }
    }
}

fn fail(error: &dyn std::error::Error) -> ! {
    tracing::error!("{error}");
    std::process::exit(1);
}
