use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use headliner_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "headliner")]
#[command(author, version, about = "Fetch top headlines per country for a static site")]
struct Cli {
    /// Path to config.toml (defaults to ~/.config/headliner/config.toml)
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch headlines for every configured country and write news.json
    Build {
        /// Output directory (overrides general.data_dir)
        #[arg(short = 'o', long)]
        out: Option<PathBuf>,
    },
    /// Fetch and print headlines
    Headlines {
        /// Country code to fetch (repeatable); defaults to the country list
        #[arg(short = 'C', long = "country")]
        countries: Vec<String>,
        /// Print the country next to each headline
        #[arg(long)]
        tagged: bool,
    },
    /// Show the configured country list
    Countries,
    /// Show current weather at a location
    Weather {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
    },
    /// Write a default config file
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config_path = cli.config.unwrap_or_else(AppConfig::config_path);
    let config = AppConfig::load_from(&config_path)?;

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    tracing::debug!("Using config path {}", config_path.display());

    match cli.command {
        Commands::Build { out } => commands::build::run(&config, out).await,
        Commands::Headlines { countries, tagged } => {
            commands::headlines::run(&config, countries, tagged).await
        }
        Commands::Countries => commands::countries::run(&config),
        Commands::Weather { lat, lon } => commands::weather::run(&config, lat, lon).await,
        Commands::Init => commands::init::run(&config_path),
    }
}
