use anyhow::{Context, Result};
use pantry_store::JsonFileItemStore;
use std::fs;
use std::path::PathBuf;

/// `$PANTRY_HOME`, else `~/.pantry`.
pub fn pantry_home() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("PANTRY_HOME") {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    let home = std::env::var("HOME").context("HOME is not set (or set PANTRY_HOME)")?;
    Ok(PathBuf::from(home).join(".pantry"))
}

pub fn ensure_pantry_home() -> Result<PathBuf> {
    let dir = pantry_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

pub fn items_path() -> Result<PathBuf> {
    Ok(ensure_pantry_home()?.join("items.json"))
}

pub fn open_store() -> Result<JsonFileItemStore> {
    JsonFileItemStore::open(items_path()?)
}
