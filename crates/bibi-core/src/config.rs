use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BibiConfig {
    /// Path to the task data file. Relative paths resolve against the
    /// directory holding the config file.
    pub data_file: Option<String>,
}

pub fn config_filename_candidates() -> [&'static str; 2] {
    [".bibi.toml", ".bibirc"]
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(".bibi.toml")
}

pub fn resolve_user_home_dir() -> Option<PathBuf> {
    if let Ok(home) = std::env::var("HOME") {
        let trimmed = home.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }
    if let Ok(profile) = std::env::var("USERPROFILE") {
        let trimmed = profile.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }
    None
}

pub fn resolve_bibi_home_dir() -> Option<PathBuf> {
    if let Ok(value) = std::env::var("BIBI_HOME") {
        let trimmed = value.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }
    resolve_user_home_dir().map(|home| home.join(".bibi"))
}

pub fn global_config_path() -> Option<PathBuf> {
    resolve_bibi_home_dir().map(|home| home.join("config.toml"))
}

pub fn find_config_root(start: &Path) -> Option<PathBuf> {
    let start = start.canonicalize().unwrap_or_else(|_| start.to_path_buf());
    for candidate in start.ancestors() {
        for name in config_filename_candidates() {
            if candidate.join(name).is_file() {
                return Some(candidate.to_path_buf());
            }
        }
    }
    None
}

pub fn load_config(root: &Path) -> Option<BibiConfig> {
    for name in config_filename_candidates() {
        let path = root.join(name);
        if path.is_file() {
            if let Ok(text) = fs::read_to_string(&path) {
                if let Ok(config) = toml::from_str::<BibiConfig>(&text) {
                    return Some(config);
                }
            }
        }
    }
    None
}

pub fn load_global_config() -> Option<BibiConfig> {
    let path = global_config_path()?;
    if !path.is_file() {
        return None;
    }
    let text = fs::read_to_string(path).ok()?;
    toml::from_str::<BibiConfig>(&text).ok()
}

pub fn write_config(root: &Path, config: &BibiConfig) -> Result<PathBuf, ConfigError> {
    let path = config_path(root);
    let body = toml::to_string_pretty(config)?;
    fs::write(&path, body)?;
    Ok(path)
}

/// Fallback task file when nothing is configured. Falls back to the working
/// directory when no home directory can be determined.
pub fn default_data_file() -> PathBuf {
    resolve_bibi_home_dir()
        .map(|home| home.join("tasks.jsonl"))
        .unwrap_or_else(|| PathBuf::from("bibi-tasks.jsonl"))
}

/// Resolution order: explicit flag, project config, global config, default.
pub fn resolve_data_file_with_source(
    start: &Path,
    flag: Option<&Path>,
) -> (PathBuf, &'static str) {
    if let Some(path) = flag {
        return (path.to_path_buf(), "flag");
    }
    if let Some(root) = find_config_root(start) {
        if let Some(file) = load_config(&root).and_then(|config| config.data_file) {
            return (resolve_relative(&root, &file), "project");
        }
    }
    if let Some(file) = load_global_config().and_then(|config| config.data_file) {
        let base = resolve_bibi_home_dir().unwrap_or_else(|| start.to_path_buf());
        return (resolve_relative(&base, &file), "global");
    }
    (default_data_file(), "default")
}

pub fn resolve_data_file(start: &Path, flag: Option<&Path>) -> PathBuf {
    resolve_data_file_with_source(start, flag).0
}

fn resolve_relative(base: &Path, value: &str) -> PathBuf {
    let path = PathBuf::from(value);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}
