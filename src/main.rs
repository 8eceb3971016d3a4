//! Headless runner (default binary).
//!
//! Reads engine commands from stdin, one per line, and prints one JSON
//! response per line. Finished sessions update the high-score file.

use std::io::{self, BufWriter};

use anyhow::{Context, Result};
use log::info;

use srs_tetris::core::GameState;
use srs_tetris::records::HighScores;
use srs_tetris::runner::{load_game_config, Runner, RunnerConfig};

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let settings = RunnerConfig::from_args_and_env(&args)?;
    let config = load_game_config(settings.config_path.as_deref())?;
    let seed = settings.seed.unwrap_or_else(rand::random);
    info!("[Runner] seed={} records={}", seed, settings.records_path.display());

    let game = GameState::with_config(config, seed).context("create game")?;
    let records = HighScores::load(&settings.records_path)?;
    let mut runner = Runner::new(game, records, Some(settings.records_path));

    let stdin = io::stdin();
    let stdout = io::stdout();
    runner.run(stdin.lock(), BufWriter::new(stdout.lock()))
}
