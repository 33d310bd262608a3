//! Headless hexfall driver.
//!
//! Loads a level, lets the auto-player shoot at the nearest hostile each turn,
//! and prints the session summary as JSON on stdout. Logs go to stderr.
mod autoplay;
mod summary;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use hexfall_content::{ConfigLoader, ContentFactory, LevelLoader};
use hexfall_core::{GameConfig, LevelDefinition};
use hexfall_runtime::{Level, RuntimeConfig, ShotKind};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use autoplay::AutoPlayer;

/// Play a hexfall level headless
#[derive(Parser)]
#[command(name = "hexfall")]
#[command(about = "Play a hexfall level headless and print a JSON summary", long_about = None)]
#[command(version)]
struct Cli {
    /// Level file (RON). Defaults to the bundled demo level.
    #[arg(long)]
    level: Option<PathBuf>,

    /// Tunables file (TOML). Missing keys keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Content directory holding `config.toml` and `levels/`.
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Level name inside `--data-dir`.
    #[arg(long, requires = "data_dir")]
    name: Option<String>,

    /// Round fired every turn.
    #[arg(long, value_enum, default_value_t = Shot::Bullet)]
    shot: Shot,

    /// Stop after this many turns even if the match is still running.
    #[arg(long, default_value_t = 32)]
    max_turns: u32,

    /// Pretty-print the summary.
    #[arg(long)]
    pretty: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Shot {
    Bullet,
    Push,
}

impl From<Shot> for ShotKind {
    fn from(shot: Shot) -> Self {
        match shot {
            Shot::Bullet => ShotKind::Bullet,
            Shot::Push => ShotKind::Push,
        }
    }
}

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();
    setup_logging();

    let cli = Cli::parse();
    let base = load_config(&cli)?;
    let runtime = RuntimeConfig::from_env().with_game_config(base);
    let definition = load_level(&cli, &runtime.game_config)?;

    let mut level = Level::new(definition, &runtime.game_config)
        .context("Failed to build level")?;
    let summary = AutoPlayer::new(&runtime, cli.shot.into())
        .with_max_turns(cli.max_turns)
        .play(&mut level)?;

    let json = if cli.pretty {
        serde_json::to_string_pretty(&summary)?
    } else {
        serde_json::to_string(&summary)?
    };
    println!("{json}");
    Ok(())
}

/// Logs to stderr, `info` unless `RUST_LOG` says otherwise.
fn setup_logging() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .init();
}

fn load_config(cli: &Cli) -> Result<GameConfig> {
    if let Some(path) = &cli.config {
        return ConfigLoader::load(path);
    }
    match &cli.data_dir {
        Some(dir) => ContentFactory::new(dir).load_config(),
        None => Ok(GameConfig::default()),
    }
}

fn load_level(cli: &Cli, base: &GameConfig) -> Result<LevelDefinition> {
    if let Some(path) = &cli.level {
        return LevelLoader::load(path, base);
    }
    if let (Some(dir), Some(name)) = (&cli.data_dir, &cli.name) {
        return ContentFactory::new(dir).load_level(name, base);
    }
    tracing::info!("no level given, playing the bundled demo");
    LevelLoader::demo(base)
}
