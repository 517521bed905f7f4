//! Configuration and source selection.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use quizdrill_core::traits::QuestionSource;

use crate::file::FileSource;
use crate::http::{HttpSource, DEFAULT_TIMEOUT_SECS};

/// Top-level quizdrill configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizdrillConfig {
    /// Where the question bank lives: an http(s) URL or a file path.
    #[serde(default = "default_bank_url")]
    pub bank_url: String,
    /// Request bound for HTTP fetches, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Directory holding the progress snapshot.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

fn default_bank_url() -> String {
    "questions.json".to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./.quizdrill")
}

impl Default for QuizdrillConfig {
    fn default() -> Self {
        Self {
            bank_url: default_bank_url(),
            timeout_secs: default_timeout_secs(),
            data_dir: default_data_dir(),
        }
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `quizdrill.toml` in the current directory
/// 2. `~/.config/quizdrill/config.toml`
///
/// Environment variable override: `QUIZDRILL_BANK_URL`.
pub fn load_config() -> Result<QuizdrillConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizdrillConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("quizdrill.toml");
        if local.exists() {
            Some(local)
        } else if let Some(global) = global_config_path().filter(|p| p.exists()) {
            Some(global)
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<QuizdrillConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => QuizdrillConfig::default(),
    };

    if let Ok(url) = std::env::var("QUIZDRILL_BANK_URL") {
        if !url.is_empty() {
            config.bank_url = url;
        }
    }

    Ok(config)
}

fn global_config_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizdrill").join("config.toml"))
}

/// Build the question source for a bank location: http(s) URLs go over
/// the network, everything else is treated as a local file path.
pub fn source_for(location: &str, timeout_secs: u64) -> Arc<dyn QuestionSource> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Arc::new(HttpSource::with_timeout(location, timeout_secs))
    } else {
        Arc::new(FileSource::new(location))
    }
}
