use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use crate::session::{SessionConfig, DEFAULT_RESPONSE_DELAY};

pub const NEWS_API_KEY_ENV: &str = "TALENTFORGE_NEWS_API_KEY";

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub user_name: Option<String>,
    pub response_delay_ms: Option<u64>,
    pub news_api_key: Option<String>,
    pub news_endpoint: Option<String>,
    pub location: Option<LocationConfig>,
}

/// Fixed position reported by the terminal geolocator.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LocationConfig {
    pub latitude: f64,
    pub longitude: f64,
    /// `false` behaves like a denied permission prompt.
    #[serde(default = "enabled_default")]
    pub enabled: bool,
}

fn enabled_default() -> bool {
    true
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let config_content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&config_content)?;
        Ok(config)
    }

    /// Load the config from its default location.
    pub fn load_or_default() -> Self {
        match Self::get_config_path() {
            Ok(path) => Self::load_or_init(&path),
            Err(err) => {
                tracing::warn!("no config location: {err:#}");
                Self::new()
            }
        }
    }

    /// Load `path`, falling back to defaults when it is malformed. A missing
    /// file is created with the defaults so there is something to edit.
    pub fn load_or_init(path: &Path) -> Self {
        if !path.exists() {
            let config = Self::new();
            match config.save_to(path) {
                Ok(()) => tracing::info!(path = %path.display(), "wrote default config"),
                Err(err) => tracing::warn!("could not write default config: {err:#}"),
            }
            return config;
        }

        Self::load_from(path).unwrap_or_else(|err| {
            tracing::warn!("ignoring unreadable config: {err:#}");
            Self::new()
        })
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create config directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let config_content = serde_json::to_string_pretty(self)?;
        fs::write(path, config_content)?;
        Ok(())
    }

    pub fn user_name(&self) -> &str {
        self.user_name.as_deref().unwrap_or("User")
    }

    pub fn response_delay(&self) -> Duration {
        self.response_delay_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_RESPONSE_DELAY)
    }

    pub fn session(&self) -> SessionConfig {
        SessionConfig {
            response_delay: self.response_delay(),
            ..SessionConfig::default()
        }
    }

    /// Env var first, then config.
    pub fn news_api_key(&self) -> Option<String> {
        Self::news_api_key_with(std::env::var(NEWS_API_KEY_ENV).ok(), self)
    }

    fn news_api_key_with(env: Option<String>, config: &Config) -> Option<String> {
        env.filter(|k| !k.is_empty())
            .or_else(|| config.news_api_key.clone())
    }

    fn get_config_path() -> Result<PathBuf> {
        Ok(app_dir()?.join("config.json"))
    }
}

/// `<config_dir>/talentforge`, home of config, preferences and the log.
pub fn app_dir() -> Result<PathBuf> {
    let config_dir =
        dirs::config_dir().ok_or_else(|| anyhow!("Could not determine config directory"))?;

    Ok(config_dir.join("talentforge"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, Config::new());
        assert_eq!(config.user_name(), "User");
        assert_eq!(config.response_delay(), Duration::from_millis(1000));
        assert!(config.location.is_none());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("talentforge").join("config.json");
        let config = Config {
            user_name: Some("Ada".to_string()),
            response_delay_ms: Some(250),
            location: Some(LocationConfig {
                latitude: 20.29,
                longitude: 85.82,
                enabled: true,
            }),
            ..Config::new()
        };

        config.save_to(&path).unwrap();
        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.session().response_delay, Duration::from_millis(250));
    }

    #[test]
    fn test_first_run_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("talentforge").join("config.json");

        let config = Config::load_or_init(&path);
        assert_eq!(config, Config::new());
        assert!(path.exists());
        assert_eq!(Config::load_from(&path).unwrap(), Config::new());
    }

    #[test]
    fn test_malformed_file_falls_back_and_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ nope").unwrap();

        assert_eq!(Config::load_or_init(&path), Config::new());
        assert_eq!(fs::read_to_string(&path).unwrap(), "{ nope");
    }

    #[test]
    fn test_location_enabled_defaults_true() {
        let config: Config =
            serde_json::from_str(r#"{"location": {"latitude": 1.0, "longitude": 2.0}}"#).unwrap();
        assert!(config.location.unwrap().enabled);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ nope").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_env_key_takes_precedence() {
        let config = Config {
            news_api_key: Some("from-config".to_string()),
            ..Config::new()
        };
        assert_eq!(
            Config::news_api_key_with(Some("from-env".to_string()), &config).as_deref(),
            Some("from-env")
        );
        assert_eq!(
            Config::news_api_key_with(Some(String::new()), &config).as_deref(),
            Some("from-config")
        );
        assert_eq!(Config::news_api_key_with(None, &Config::new()), None);
    }
}
