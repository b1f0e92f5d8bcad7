use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::subscription::TierId;
use crate::Result;

pub const CONFIG_ENV: &str = "ND_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:3000".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Tier a new session starts on.
    pub tier: TierId,
    /// Storage backend name: `memory` or `json`.
    pub storage: String,
    /// Article file for the `json` backend.
    pub corpus_path: Option<PathBuf>,
    /// Timeline file for the `json` backend.
    pub timeline_path: Option<PathBuf>,
    pub analyzer: String,
    pub server: ServerConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tier: TierId::Enterprise,
            storage: "memory".to_string(),
            corpus_path: None,
            timeline_path: None,
            analyzer: "annotations".to_string(),
            server: ServerConfig::default(),
        }
    }
}

impl Config {
    /// Loads from `explicit`, else from `$ND_CONFIG`, else defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let from_env = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        Self::resolve(explicit, from_env.as_deref())
    }

    fn resolve(explicit: Option<&Path>, from_env: Option<&Path>) -> Result<Self> {
        match explicit.or(from_env) {
            Some(path) => Self::load_from(path),
            None => Ok(Self::default()),
        }
    }

    /// A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nd.toml");
        std::fs::write(&path, "tier = \"basic\"\n\n[server]\naddr = \"0.0.0.0:8080\"\n").unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.tier, TierId::Basic);
        assert_eq!(config.server.addr, "0.0.0.0:8080");
        assert_eq!(config.storage, "memory");
    }

    #[test]
    fn test_save_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("nd.toml");
        let config = Config {
            storage: "json".to_string(),
            corpus_path: Some(PathBuf::from("/tmp/articles.json")),
            ..Config::default()
        };
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_explicit_path_wins_over_env() {
        let dir = tempfile::tempdir().unwrap();
        let explicit = dir.path().join("explicit.toml");
        let from_env = dir.path().join("env.toml");
        std::fs::write(&explicit, "tier = \"pro\"\n").unwrap();
        std::fs::write(&from_env, "tier = \"basic\"\n").unwrap();

        let config = Config::resolve(Some(&explicit), Some(&from_env)).unwrap();
        assert_eq!(config.tier, TierId::Pro);
        let config = Config::resolve(None, Some(&from_env)).unwrap();
        assert_eq!(config.tier, TierId::Basic);
        assert_eq!(Config::resolve(None, None).unwrap(), Config::default());
    }

    #[test]
    fn test_load_reads_env_var() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nd.toml");
        std::fs::write(&path, "storage = \"json\"\ntier = \"basic\"\n").unwrap();

        std::env::set_var(CONFIG_ENV, &path);
        let config = Config::load(None);
        std::env::remove_var(CONFIG_ENV);

        let config = config.unwrap();
        assert_eq!(config.tier, TierId::Basic);
        assert_eq!(config.storage, "json");
    }

    #[test]
    fn test_invalid_tier_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nd.toml");
        std::fs::write(&path, "tier = \"platinum\"\n").unwrap();
        assert!(matches!(Config::load_from(&path), Err(Error::Config(_))));
    }
}
