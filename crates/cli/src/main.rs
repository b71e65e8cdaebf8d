//! wkdash CLI - WaniKani progress dashboard in the terminal.

mod config;
mod render;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;
use wkdash_api::{CachedSource, WanikaniClient};
use wkdash_progress::ProgressTracker;
use wkdash_storage::JsonCache;

use crate::config::{GlobalArgs, Settings};

#[derive(Parser)]
#[command(name = "wkdash")]
#[command(about = "WaniKani progress dashboard", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate and store a personal API token
    Login {
        /// WaniKani API token (v2)
        token: String,
    },
    /// Forget the stored token and cached data
    Logout,
    /// Item counts by SRS stage
    Counts,
    /// Current level summary
    Level,
    /// Time spent on each level
    History,
    /// Item counts and current level summary
    Dashboard,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // stdout carries the report; logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.global.verbose);

    let cache = JsonCache::new(&cli.global.cache_dir)
        .await
        .with_context(|| format!("Failed to open cache at {}", cli.global.cache_dir.display()))?;

    let global = &cli.global;
    match cli.command {
        Commands::Login { token } => {
            let token = token.trim().to_string();
            let settings = Settings::new(global, token.clone());
            let client = WanikaniClient::new(settings.client)?;
            let user = client.get_user().await.context("Token check failed")?;

            config::save_login(&cache, &token, &user).await?;
            info!("Stored API token for {}", user.username);
            println!("Logged in as {} (level {})", user.username, user.level);
        }
        Commands::Logout => {
            config::clear_login(&cache).await?;
            println!("Logged out");
        }
        Commands::Counts => {
            let tracker = tracker(global, cache).await?;
            let counts = tracker.counts().await.context("Failed to load assignments")?;
            if global.json {
                println!("{}", serde_json::to_string_pretty(&counts)?);
            } else {
                print!("{}", render::counts(&counts));
            }
        }
        Commands::Level => {
            let tracker = tracker(global, cache).await?;
            let snapshot = tracker
                .level_snapshot()
                .await
                .context("Failed to load current level")?;
            let estimate = snapshot.estimate();
            if global.json {
                println!("{}", serde_json::to_string_pretty(&estimate)?);
            } else {
                print!("{}", render::level(&estimate));
            }
        }
        Commands::History => {
            let tracker = tracker(global, cache).await?;
            let history = tracker.history().await.context("Failed to load levels")?;
            if global.json {
                println!("{}", serde_json::to_string_pretty(&history)?);
            } else {
                print!("{}", render::history(&history));
            }
        }
        Commands::Dashboard => {
            let tracker = tracker(global, cache).await?;
            let snapshot = tracker.snapshot().await.context("Failed to load dashboard")?;
            let dashboard = snapshot.dashboard();
            if global.json {
                println!("{}", serde_json::to_string_pretty(&dashboard)?);
            } else {
                print!("{}", render::dashboard(&dashboard));
            }
        }
    }

    Ok(())
}

/// Tracker over the live API with the cache in front.
async fn tracker(
    global: &GlobalArgs,
    cache: JsonCache,
) -> Result<ProgressTracker<CachedSource<WanikaniClient, JsonCache>>> {
    let api_key = config::resolve_api_key(global.api_key.clone(), &cache).await?;
    let settings = Settings::new(global, api_key);
    let client = WanikaniClient::new(settings.client)?;
    let source = CachedSource::new(client, cache).with_config(settings.cache);
    Ok(ProgressTracker::new(source))
}
