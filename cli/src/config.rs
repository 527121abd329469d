//! CLI Configuration

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const KEYS: [&str; 5] = ["store_url", "api_key", "snapshot_path", "default_format", "top_n"];

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub store_url: Option<String>,
    pub api_key: Option<String>,
    pub snapshot_path: Option<PathBuf>,
    pub default_format: Option<String>,
    pub top_n: Option<usize>,
}

impl Config {
    pub fn load(profile: Option<&str>) -> Result<Self> {
        Self::load_from(&Self::config_path(profile)?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content =
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn save(&self, profile: Option<&str>) -> Result<PathBuf> {
        let path = Self::config_path(profile)?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).with_context(|| format!("writing {}", path.display()))
    }

    pub fn set(&mut self, key: &str, value: String) -> Result<()> {
        match key {
            "store_url" => self.store_url = Some(value),
            "api_key" => self.api_key = Some(value),
            "snapshot_path" => self.snapshot_path = Some(PathBuf::from(value)),
            "default_format" => self.default_format = Some(value),
            "top_n" => {
                let n: usize = value
                    .parse()
                    .with_context(|| format!("top_n must be a number, got {}", value))?;
                self.top_n = Some(n);
            }
            _ => anyhow::bail!("Unknown config key: {}", key),
        }
        Ok(())
    }

    /// Value for display; the API key is masked
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(match key {
            "store_url" => self.store_url.clone(),
            "api_key" => self.api_key.as_deref().map(mask),
            "snapshot_path" => self.snapshot_path.as_ref().map(|p| p.display().to_string()),
            "default_format" => self.default_format.clone(),
            "top_n" => self.top_n.map(|n| n.to_string()),
            _ => anyhow::bail!("Unknown config key: {}", key),
        })
    }

    fn config_path(profile: Option<&str>) -> Result<PathBuf> {
        let home = dirs::home_dir().context("Cannot find home directory")?;
        let filename = match profile {
            Some(p) => format!("config.{}.toml", p),
            None => "config.toml".to_string(),
        };
        Ok(home.join(".casework").join(filename))
    }
}

fn mask(key: &str) -> String {
    let visible: String = key.chars().take(8).collect();
    format!("{}****", visible)
}
