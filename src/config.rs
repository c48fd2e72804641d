/// User settings
///
/// Stored as JSON in the user's config directory:
/// - Linux: ~/.config/cat-fetcher/settings.json
/// - macOS: ~/Library/Application Support/cat-fetcher/settings.json
/// - Windows: %APPDATA%\cat-fetcher\settings.json
///
/// Every field has a default, so a missing file or missing keys are fine.
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ConfigError;
use crate::net::cat_api::DEFAULT_API_URL;
use crate::storage::gallery::default_save_dir;
use crate::ui::toast::DEFAULT_DURATION;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Endpoint returning a JSON array of random cat images
    pub api_url: String,

    /// Optional key sent as `x-api-key`
    pub api_key: Option<String>,

    /// Where saved cats go (None = ~/Pictures/cat-fetcher)
    pub save_dir: Option<PathBuf>,

    /// How long the save toast stays on screen
    pub toast_seconds: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: None,
            save_dir: None,
            toast_seconds: DEFAULT_DURATION.as_secs(),
        }
    }
}

impl Settings {
    /// Get the path where the settings file should live
    pub fn default_path() -> Option<PathBuf> {
        let mut path = dirs::config_dir()?;
        path.push("cat-fetcher");
        path.push("settings.json");
        Some(path)
    }

    /// Load settings from the default location.
    /// Problems are logged and the defaults used instead.
    pub fn load() -> Self {
        let Some(path) = Self::default_path() else {
            tracing::warn!("⚠️  No config directory on this system, using default settings");
            return Self::default();
        };

        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("⚠️  Ignoring {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Load settings from a file. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        tracing::debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    /// Write settings to a file, creating its folder if needed
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = self.to_json().map_err(ConfigError::Serialize)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Convert to pretty JSON for the settings file
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Folder saved cats go to
    pub fn save_dir(&self) -> PathBuf {
        self.save_dir.clone().unwrap_or_else(default_save_dir)
    }

    /// Toast lifetime, never shorter than a second
    pub fn toast_duration(&self) -> Duration {
        Duration::from_secs(self.toast_seconds.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_from(&dir.path().join("nope.json")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let mut settings = Settings::default();
        settings.api_key = Some("secret".into());
        settings.save_dir = Some(PathBuf::from("/tmp/cats"));
        settings.toast_seconds = 5;

        settings.save_to(&path).unwrap();
        let restored = Settings::load_from(&path).unwrap();

        assert_eq!(restored, settings);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let settings = Settings::from_json(r#"{ "toast_seconds": 4 }"#).unwrap();

        assert_eq!(settings.toast_seconds, 4);
        assert_eq!(settings.api_url, DEFAULT_API_URL);
        assert!(settings.api_key.is_none());
        assert!(settings.save_dir.is_none());
    }

    #[test]
    fn test_broken_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(Settings::load_from(&path), Err(ConfigError::Parse(_))));
    }

    #[cfg(unix)]
    #[test]
    fn test_unwritable_settings_report_serialize_error() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let settings = Settings {
            // JSON can't hold a path that isn't UTF-8
            save_dir: Some(PathBuf::from(OsStr::from_bytes(b"/srv/\xff"))),
            ..Settings::default()
        };

        let result = settings.save_to(&path);

        assert!(matches!(result, Err(ConfigError::Serialize(_))));
        assert!(!path.exists());
    }

    #[test]
    fn test_save_dir_defaults_to_pictures_folder() {
        let settings = Settings::default();
        assert_eq!(settings.save_dir(), default_save_dir());

        let custom = Settings {
            save_dir: Some(PathBuf::from("/srv/cats")),
            ..Settings::default()
        };
        assert_eq!(custom.save_dir(), PathBuf::from("/srv/cats"));
    }

    #[test]
    fn test_toast_duration_has_a_floor() {
        let settings = Settings {
            toast_seconds: 0,
            ..Settings::default()
        };
        assert_eq!(settings.toast_duration(), Duration::from_secs(1));
        assert_eq!(Settings::default().toast_duration(), DEFAULT_DURATION);
    }
}
