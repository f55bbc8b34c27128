//! Drill configuration loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level multidrill configuration. Every field has a default, so a
/// missing or partial config file is fine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrillConfig {
    /// Directory holding per-user record logs.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Trials per round; a fully-correct round of this size completes a
    /// session.
    #[serde(default = "default_trials")]
    pub trials_per_round: usize,
    /// Fraction of slowest answers fed back into selection.
    #[serde(default = "default_percentile")]
    pub slow_percentile: f64,
    /// Smallest factor drilled.
    #[serde(default = "default_min_factor")]
    pub min_factor: u8,
    /// Largest factor drilled.
    #[serde(default = "default_max_factor")]
    pub max_factor: u8,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./multidrill-data")
}
fn default_trials() -> usize {
    10
}
fn default_percentile() -> f64 {
    0.3
}
fn default_min_factor() -> u8 {
    2
}
fn default_max_factor() -> u8 {
    9
}

impl Default for DrillConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            trials_per_round: default_trials(),
            slow_percentile: default_percentile(),
            min_factor: default_min_factor(),
            max_factor: default_max_factor(),
        }
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `multidrill.toml` in the current directory
/// 2. `~/.config/multidrill/config.toml`
///
/// `MULTIDRILL_DATA_DIR` overrides the data directory from either source.
pub fn load_config_from(path: Option<&Path>) -> Result<DrillConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("multidrill.toml");
        if local.exists() {
            Some(local)
        } else if let Some(global_dir) = dirs_path() {
            let global = global_dir.join("config.toml");
            global.exists().then_some(global)
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<DrillConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => DrillConfig::default(),
    };

    if let Ok(dir) = std::env::var("MULTIDRILL_DATA_DIR") {
        config.data_dir = PathBuf::from(dir);
    }

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("multidrill"))
}
