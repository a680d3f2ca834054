use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chess_core::PlayerKind;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Environment variable naming a config file when `--config` is absent.
pub const CONFIG_ENV: &str = "CHESS_CONFIG";

/// Settings for a session. Every field is optional in the TOML file.
///
/// ```toml
/// white = "human"
/// black = "computer"
/// save_dir = "saves"
/// seed = 7
/// max_plies = 300
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayConfig {
    pub white: PlayerKind,
    pub black: PlayerKind,
    /// Directory save files are written to
    pub save_dir: PathBuf,
    /// Seed for automated players (None = fresh entropy)
    pub seed: Option<u64>,
    /// Stop after this many plies (None = play to the end)
    pub max_plies: Option<u32>,
}

impl Default for PlayConfig {
    fn default() -> Self {
        Self {
            white: PlayerKind::Human,
            black: PlayerKind::Computer,
            save_dir: PathBuf::from("saves"),
            seed: None,
            max_plies: None,
        }
    }
}

impl PlayConfig {
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("invalid config")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("in {}", path.display()))
    }

    /// Loads `explicit` if given, else the file named by [`CONFIG_ENV`].
    /// A missing file gives the defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => match std::env::var_os(CONFIG_ENV) {
                Some(path) => PathBuf::from(path),
                None => return Ok(Self::default()),
            },
        };
        if !path.exists() {
            warn!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }
        Self::load(&path)
    }
}
