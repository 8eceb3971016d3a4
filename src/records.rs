//! Mode-keyed high-score table persisted as JSON.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::types::GameMode;

/// Default file name when no path is configured
pub const DEFAULT_RECORDS_FILE: &str = "srs-tetris-records.json";

/// Best score per game mode, keyed by the mode's lowercase name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HighScores {
    scores: BTreeMap<String, u32>,
}

impl HighScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the table; a missing file is an empty table
    pub fn load(path: &Path) -> Result<Self> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!("[Records] no table at {}", path.display());
                return Ok(Self::default());
            }
            Err(err) => {
                return Err(err).with_context(|| format!("read high scores from {}", path.display()))
            }
        };
        serde_json::from_str(&text)
            .with_context(|| format!("parse high scores in {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let text = serde_json::to_string_pretty(self).context("serialize high scores")?;
        fs::write(path, text).with_context(|| format!("write high scores to {}", path.display()))
    }

    pub fn best(&self, mode: GameMode) -> Option<u32> {
        self.scores.get(mode.as_str()).copied()
    }

    /// Record `score` if it beats the stored best; returns whether it did
    pub fn submit(&mut self, mode: GameMode, score: u32) -> bool {
        match self.scores.get(mode.as_str()) {
            Some(&best) if best >= score => false,
            _ => {
                info!("[Records] new best for {}: {}", mode.as_str(), score);
                self.scores.insert(mode.as_str().to_string(), score);
                true
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.scores.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

/// `SRS_TETRIS_RECORDS`, or the default file in the working directory
pub fn default_path() -> PathBuf {
    std::env::var("SRS_TETRIS_RECORDS")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_RECORDS_FILE))
}
