use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Context;
use clap::Parser;
use gemline_core::{Dim, Game, GameConfig, Grid, RandomKindGenerator, ResolveMode, SwapRule};

mod command;
mod console;
mod repl;
mod settings;

use console::TextConsole;
use settings::Settings;

#[derive(Parser, Debug)]
#[command(version, about = "Match-3 puzzle in the terminal", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Settings file with a `[game]` table
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Board width in cells
    #[arg(long)]
    width: Option<Dim>,

    /// Board height in cells
    #[arg(long)]
    height: Option<Dim>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Only allow swapping orthogonal neighbours
    #[arg(long)]
    adjacent: bool,

    /// Keep resolving refilled matches, up to this many passes
    #[arg(long, value_name = "MAX_PASSES")]
    cascade: Option<u8>,

    /// Start from a board file, one row of cell labels per line
    #[arg(long)]
    board: Option<PathBuf>,
}

impl Args {
    fn game_config(&self) -> anyhow::Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => Settings::from_file(path)?.game,
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if self.adjacent {
            config.swap_rule = SwapRule::Adjacent;
        }
        if let Some(max_passes) = self.cascade {
            config.resolve_mode = ResolveMode::Cascade { max_passes };
        }
        config.seed = self.seed.or(config.seed).or_else(|| Some(clock_seed()));

        config.validate().context("Invalid game settings")?;
        Ok(config)
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or(RandomKindGenerator::DEFAULT_SEED)
}

fn load_board(path: &Path) -> anyhow::Result<Grid> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read board file {}", path.display()))?;
    let rows: Vec<&str> = content.lines().filter(|row| !row.trim().is_empty()).collect();
    Grid::from_rows(&rows).with_context(|| format!("Invalid board in {}", path.display()))
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.verbose.tracing_level_filter())
        .with_writer(std::io::stderr)
        .init();

    let config = args.game_config()?;
    log::debug!("config: {:?}", config);

    let mut game = match &args.board {
        Some(path) => Game::with_grid(
            &config,
            load_board(path)?,
            RandomKindGenerator::from_config(&config),
        ),
        None => Game::new(&config).context("Could not create game")?,
    };

    repl::run(&mut game, &mut TextConsole::stdio())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let args = Args::parse_from([
            "gemline", "--width", "5", "--height", "6", "--seed", "3", "--adjacent", "--cascade",
            "4",
        ]);

        let config = args.game_config().unwrap();

        assert_eq!(config.size(), (5, 6));
        assert_eq!(config.seed, Some(3));
        assert_eq!(config.swap_rule, SwapRule::Adjacent);
        assert_eq!(config.resolve_mode, ResolveMode::Cascade { max_passes: 4 });
    }

    #[test]
    fn missing_seed_comes_from_the_clock() {
        let config = Args::parse_from(["gemline"]).game_config().unwrap();

        assert!(config.seed.is_some());
        assert_eq!(config.size(), (8, 8));
    }

    #[test]
    fn invalid_dimensions_are_rejected() {
        let args = Args::parse_from(["gemline", "--width", "0"]);

        assert!(args.game_config().is_err());
    }
}
