use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub omdb: OmdbConfig,
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct OmdbConfig {
    #[serde(default)]
    pub api_key: String,
    /// Override for tests and mirrors; the client falls back to the public
    /// endpoint when unset.
    #[serde(default)]
    pub base_url: Option<String>,
}

impl Config {
    /// Load from `config.toml`, or start from defaults when the file does
    /// not exist yet.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file {}", path.display()))
    }

    /// The OMDb api key, with the `OMDB_API_KEY` environment variable taking
    /// precedence over the config file.
    pub fn api_key(&self) -> Option<String> {
        if let Ok(key) = std::env::var("OMDB_API_KEY") {
            if !key.is_empty() {
                return Some(key);
            }
        }

        if self.omdb.api_key.is_empty() {
            None
        } else {
            Some(self.omdb.api_key.clone())
        }
    }

    pub fn require_api_key(&self) -> Result<String> {
        self.api_key().ok_or_else(|| {
            anyhow::anyhow!(
                "No OMDb api key configured. Run 'popcorn config omdb' or set OMDB_API_KEY."
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.omdb.api_key, "");
        assert!(config.omdb.base_url.is_none());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let config = Config {
            omdb: OmdbConfig {
                api_key: "8d5f20d0".to_string(),
                base_url: Some("http://localhost:9200/".to_string()),
            },
        };
        config.save(&path).unwrap();

        let reloaded = Config::load(&path).unwrap();
        assert_eq!(reloaded.omdb.api_key, "8d5f20d0");
        assert_eq!(
            reloaded.omdb.base_url.as_deref(),
            Some("http://localhost:9200/")
        );
    }

    #[test]
    fn test_partial_config_parses() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[omdb]\napi_key = \"abc\"\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.omdb.api_key, "abc");
        assert!(config.omdb.base_url.is_none());
    }
}
