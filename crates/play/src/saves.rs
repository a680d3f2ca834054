use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chess_core::GameState;
use tracing::info;

/// Where a save called `name` lives inside `dir`.
pub fn save_path(dir: &Path, name: &str) -> Result<PathBuf> {
    let name = name.trim();
    if name.is_empty() || name.contains(['/', '\\']) || name.starts_with('.') {
        bail!("invalid save name {name:?}");
    }
    let file = if name.ends_with(".json") {
        name.to_string()
    } else {
        format!("{name}.json")
    };
    Ok(dir.join(file))
}

/// Writes `game` to `dir/name.json`. Refuses to overwrite an existing save.
pub fn save_game(game: &GameState, dir: &Path, name: &str) -> Result<PathBuf> {
    let path = save_path(dir, name)?;
    if path.exists() {
        bail!("{} already exists", path.display());
    }
    fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;

    let json = serde_json::to_string_pretty(game).context("failed to serialize game")?;
    fs::write(&path, json).with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), plies = game.history().len(), "game saved");
    Ok(path)
}

/// Reads a save and checks the position is one the engine can continue.
pub fn load_game(path: &Path) -> Result<GameState> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let game: GameState = serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    game.verify()
        .with_context(|| format!("{} holds an inconsistent position", path.display()))?;
    info!(path = %path.display(), plies = game.history().len(), "game loaded");
    Ok(game)
}

/// Names of the saves in `dir`, sorted. A missing directory has none.
pub fn list_saves(dir: &Path) -> Result<Vec<String>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }
    let mut names = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("failed to list {}", dir.display()))? {
        let path = entry?.path();
        if path.extension().is_some_and(|ext| ext == "json") {
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }
    }
    names.sort();
    Ok(names)
}
