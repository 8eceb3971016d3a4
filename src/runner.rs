//! Headless command runner.
//!
//! Reads one command per line, applies it to a [`GameState`], and writes one
//! JSON object per line. Besides the engine commands understood by
//! [`GameAction::parse`], the runner accepts `snapshot`, `scores` and `quit`.

use std::fs;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use log::{debug, info, warn};
use serde::Serialize;

use crate::core::{GameSnapshot, GameState, LockEvent};
use crate::records::{self, HighScores};
use crate::types::{GameAction, GameConfig, GameMode, GameStatus};

/// Startup settings resolved from the command line and environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    pub config_path: Option<PathBuf>,
    pub seed: Option<u32>,
    pub records_path: PathBuf,
}

impl RunnerConfig {
    /// First argument (or `SRS_TETRIS_CONFIG`) names a JSON config file;
    /// `SRS_TETRIS_SEED` fixes the seed.
    pub fn from_args_and_env(args: &[String]) -> Result<Self> {
        if args.len() > 1 {
            return Err(anyhow!("usage: srs-tetris [config.json]"));
        }
        let config_path = args
            .first()
            .cloned()
            .or_else(|| std::env::var("SRS_TETRIS_CONFIG").ok())
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);

        let seed = match std::env::var("SRS_TETRIS_SEED") {
            Ok(v) => Some(
                v.trim()
                    .parse::<u32>()
                    .map_err(|_| anyhow!("invalid SRS_TETRIS_SEED value: {}", v))?,
            ),
            Err(_) => None,
        };

        Ok(Self {
            config_path,
            seed,
            records_path: records::default_path(),
        })
    }
}

/// Read and validate a JSON game config; no path means defaults
pub fn load_game_config(path: Option<&Path>) -> Result<GameConfig> {
    let Some(path) = path else {
        return Ok(GameConfig::default());
    };
    let text =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let config: GameConfig =
        serde_json::from_str(&text).with_context(|| format!("parse config {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("invalid config {}", path.display()))?;
    Ok(config)
}

/// One input line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Action(GameAction),
    Snapshot,
    Scores,
    Quit,
}

impl Command {
    /// Parse a line; blank lines and `#` comments yield `None`
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }
        let command = match line.to_ascii_lowercase().as_str() {
            "snapshot" | "state" => Command::Snapshot,
            "scores" => Command::Scores,
            "quit" | "exit" => Command::Quit,
            _ => Command::Action(
                GameAction::parse(line).ok_or_else(|| anyhow!("unknown command: {}", line))?,
            ),
        };
        Ok(Some(command))
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
enum Response<'a> {
    #[serde(rename_all = "camelCase")]
    Ack {
        action: &'a str,
        accepted: bool,
        status: GameStatus,
        score: u32,
        #[serde(skip_serializing_if = "Option::is_none")]
        event: Option<LockEvent>,
    },
    Snapshot {
        snapshot: &'a GameSnapshot,
    },
    #[serde(rename_all = "camelCase")]
    Scores {
        scores: &'a HighScores,
    },
    Error {
        message: String,
    },
}

pub struct Runner {
    game: GameState,
    snapshot: GameSnapshot,
    records: HighScores,
    records_path: Option<PathBuf>,
    /// Set once the finished session has been submitted
    recorded: bool,
}

impl Runner {
    /// `records_path` of `None` keeps scores in memory only
    pub fn new(game: GameState, records: HighScores, records_path: Option<PathBuf>) -> Self {
        Self {
            game,
            snapshot: GameSnapshot::default(),
            records,
            records_path,
            recorded: false,
        }
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn records(&self) -> &HighScores {
        &self.records
    }

    /// Process lines until `quit` or end of input
    pub fn run<I: BufRead, O: Write>(&mut self, input: I, mut output: O) -> Result<()> {
        for line in input.lines() {
            let line = line.context("read command")?;
            let command = match Command::parse(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(err) => {
                    warn!("[Runner] {}", err);
                    write_line(
                        &mut output,
                        &Response::Error {
                            message: err.to_string(),
                        },
                    )?;
                    continue;
                }
            };
            if !self.execute(command, &mut output)? {
                break;
            }
        }
        output.flush().context("flush output")?;
        Ok(())
    }

    /// Run one command; returns false on `quit`
    pub fn execute<O: Write>(&mut self, command: Command, output: &mut O) -> Result<bool> {
        match command {
            Command::Quit => return Ok(false),
            Command::Snapshot => {
                self.game.snapshot_into(&mut self.snapshot);
                write_line(
                    output,
                    &Response::Snapshot {
                        snapshot: &self.snapshot,
                    },
                )?;
            }
            Command::Scores => {
                write_line(
                    output,
                    &Response::Scores {
                        scores: &self.records,
                    },
                )?;
            }
            Command::Action(action) => {
                if matches!(action, GameAction::Start(_) | GameAction::Reset) {
                    self.recorded = false;
                }
                let accepted = self.game.apply(action);
                debug!("[Runner] {} accepted={}", action.as_str(), accepted);
                self.record_if_finished()?;
                write_line(
                    output,
                    &Response::Ack {
                        action: action.as_str(),
                        accepted,
                        status: self.game.status(),
                        score: self.game.score(),
                        event: self.game.take_last_event(),
                    },
                )?;
            }
        }
        Ok(true)
    }

    fn record_if_finished(&mut self) -> Result<()> {
        if self.recorded
            || !matches!(
                self.game.status(),
                GameStatus::GameOver | GameStatus::Completed
            )
        {
            return Ok(());
        }
        self.recorded = true;

        let mode: GameMode = self.game.mode();
        if self.records.submit(mode, self.game.score()) {
            if let Some(path) = &self.records_path {
                self.records.save(path)?;
                info!("[Runner] saved high scores to {}", path.display());
            }
        }
        Ok(())
    }
}

fn write_line<O: Write>(output: &mut O, response: &Response<'_>) -> Result<()> {
    serde_json::to_writer(&mut *output, response).context("encode response")?;
    output.write_all(b"\n").context("write response")?;
    Ok(())
}
