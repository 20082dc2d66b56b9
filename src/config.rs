//! Settings
//!
//! Layered lowest to highest: built-in defaults, `word_guess.toml` in the
//! working directory, environment variables. Command-line flags are applied
//! on top by `main`.

use crate::game::DEFAULT_TARGET;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::{
    fs, io,
    path::{Path, PathBuf},
};

/// Config file looked up in the working directory
pub const CONFIG_FILE: &str = "word_guess.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Target for local play and for the scoring endpoint
    pub target_word: String,
    /// Address the scoring endpoint binds to
    pub bind_addr: String,
    /// Scoring endpoint URL; remote mode is unavailable without one
    pub endpoint: Option<String>,
    /// SQLite file holding the guess history
    pub history_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            target_word: DEFAULT_TARGET.into(),
            bind_addr: "127.0.0.1:3000".into(),
            endpoint: None,
            history_path: PathBuf::from("data/history.db"),
        }
    }
}

/// Load settings from `word_guess.toml` and the process environment
///
/// # Errors
/// Returns an error if the config file exists but cannot be read or parsed.
pub fn load_settings() -> Result<Settings> {
    load_from(Path::new(CONFIG_FILE), |key| std::env::var(key).ok())
}

fn load_from(path: &Path, env: impl Fn(&str) -> Option<String>) -> Result<Settings> {
    let mut settings = match fs::read_to_string(path) {
        Ok(raw) => toml::from_str::<Settings>(&raw)
            .with_context(|| format!("invalid config file {}", path.display()))?,
        Err(e) if e.kind() == io::ErrorKind::NotFound => Settings::default(),
        Err(e) => {
            return Err(e).with_context(|| format!("failed to read {}", path.display()));
        }
    };

    if let Some(v) = env("TARGET_WORD") {
        settings.target_word = v;
    }
    if let Some(v) = env("SERVER_BIND") {
        settings.bind_addr = v;
    }
    if let Some(v) = env("SCORE_ENDPOINT") {
        settings.endpoint = Some(v);
    }
    if let Some(v) = env("HISTORY_PATH") {
        settings.history_path = PathBuf::from(v);
    }

    Ok(settings)
}
