// SPDX-License-Identifier: MIT OR Apache-2.0

//! Game configuration loaded from `config.toml`

use crate::article::DEFAULT_ARTICLES;
use crate::{ArticlePool, GameError, Variant};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default)]
    pub variant: Variant,
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    #[serde(default = "default_articles")]
    pub articles: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high_score_path: Option<PathBuf>,
}

fn default_tick_interval_ms() -> u64 {
    100
}

fn default_articles() -> Vec<String> {
    DEFAULT_ARTICLES.iter().map(|s| s.to_string()).collect()
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            variant: Variant::default(),
            tick_interval_ms: default_tick_interval_ms(),
            articles: default_articles(),
            high_score_path: None,
        }
    }
}

impl GameConfig {
    /// The configured article pool
    pub fn pool(&self) -> Result<ArticlePool, GameError> {
        ArticlePool::new(self.articles.iter().cloned())
    }

    /// Period of the clock refresh, never below 10 ms
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(10))
    }
}

pub fn get_config_path() -> Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("org", "wikirace", "wikirace")
        .context("Failed to determine config directory")?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

/// Load the config from its default location, writing defaults on first run
pub fn load_config() -> Result<GameConfig> {
    let config_path = get_config_path().context("Failed to determine config path")?;

    if !config_path.exists() {
        tracing::info!("Config file not found, creating default at: {}", config_path.display());

        let default_config = GameConfig::default();
        if let Err(e) = save_config_to(&default_config, &config_path) {
            tracing::warn!("Could not write default config: {:#}", e);
        }
        return Ok(default_config);
    }

    load_config_from(&config_path)
}

pub fn load_config_from(path: &Path) -> Result<GameConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    toml::from_str::<GameConfig>(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

pub fn save_config_to(config: &GameConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    let toml_content = toml::to_string_pretty(config).context("Failed to serialize config")?;

    fs::write(path, toml_content)
        .with_context(|| format!("Failed to write config file: {}", path.display()))?;

    tracing::info!("Saved config to: {}", path.display());
    Ok(())
}
