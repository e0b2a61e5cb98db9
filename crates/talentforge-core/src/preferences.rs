//! Durable key-value preferences.
//!
//! A single JSON object in the config directory. Only the `"theme"` key is
//! used; other keys are preserved on write.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde_json::{Map, Value};

use crate::config::app_dir;
use crate::theme::ThemeMode;

const THEME_KEY: &str = "theme";

#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config_dir>/talentforge/preferences.json`
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(app_dir()?.join("preferences.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The stored theme, or dark when unset or unreadable.
    pub fn read(&self) -> ThemeMode {
        match self.load() {
            Ok(map) => ThemeMode::from_stored(map.get(THEME_KEY).and_then(Value::as_str)),
            Err(err) => {
                tracing::warn!(path = %self.path.display(), "could not read preferences: {err:#}");
                ThemeMode::Dark
            }
        }
    }

    pub fn write(&self, mode: ThemeMode) -> Result<()> {
        let mut map = self.load().unwrap_or_default();
        map.insert(THEME_KEY.to_string(), Value::from(mode.as_str()));

        // Create config directory if it doesn't exist
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(&Value::Object(map))?;
        fs::write(&self.path, content)?;
        tracing::debug!(theme = mode.as_str(), "theme preference saved");
        Ok(())
    }

    fn load(&self) -> Result<Map<String, Value>> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let content = fs::read_to_string(&self.path)?;
        match serde_json::from_str(&content)? {
            Value::Object(map) => Ok(map),
            _ => Ok(Map::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> PreferenceStore {
        PreferenceStore::new(dir.path().join("nested").join("preferences.json"))
    }

    #[test]
    fn test_missing_file_reads_dark() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(store_in(&dir).read(), ThemeMode::Dark);
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.write(ThemeMode::Light).unwrap();
        assert_eq!(store.read(), ThemeMode::Light);

        store.write(ThemeMode::Dark).unwrap();
        assert_eq!(store.read(), ThemeMode::Dark);

        let raw = fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("\"theme\": \"dark\""));
    }

    #[test]
    fn test_write_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), r#"{"font": "mono", "theme": "dark"}"#).unwrap();

        store.write(ThemeMode::Light).unwrap();
        let map: Map<String, Value> =
            serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(map["font"], "mono");
        assert_eq!(map["theme"], "light");
    }

    #[test]
    fn test_garbage_reads_dark() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();

        fs::write(store.path(), "not json").unwrap();
        assert_eq!(store.read(), ThemeMode::Dark);

        fs::write(store.path(), r#"{"theme": 1}"#).unwrap();
        assert_eq!(store.read(), ThemeMode::Dark);

        // An unreadable file is overwritten on the next toggle.
        fs::write(store.path(), "not json").unwrap();
        store.write(ThemeMode::Light).unwrap();
        assert_eq!(store.read(), ThemeMode::Light);
    }
}
