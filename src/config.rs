//! Client configuration
//!
//! Read from `config.json` in the user's config directory:
//! - Linux: ~/.config/image-gallery/config.json
//! - macOS: ~/Library/Application Support/image-gallery/config.json
//! - Windows: %APPDATA%\image-gallery\config.json
//!
//! The file is optional. Missing fields take their defaults.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use crate::error::{GalleryError, Result};

/// Base address of the gallery service when nothing else is configured
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Edge length (pixels) of the square that thumbnails are fitted into
const DEFAULT_THUMBNAIL_SIZE: u32 = 256;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base address that API paths and relative image references are appended to
    pub api_url: String,
    pub thumbnail_size: u32,
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            thumbnail_size: DEFAULT_THUMBNAIL_SIZE,
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

impl Config {
    /// Load the config from the standard location, falling back to defaults
    /// when no file exists.
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) => Self::from_path(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load from an explicit path. A missing file yields the defaults.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(GalleryError::Config(format!(
                    "{}: {}",
                    path.display(),
                    e
                )))
            }
        };

        let config: Self = serde_json::from_str(&content)
            .map_err(|e| GalleryError::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;

        tracing::info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Get the path where the config file is expected
    pub fn default_path() -> Option<PathBuf> {
        let mut path = dirs::config_dir().or_else(dirs::home_dir)?;
        path.push("image-gallery");
        path.push("config.json");
        Some(path)
    }

    /// The parsed base address
    pub fn base_url(&self) -> Result<Url> {
        let url = Url::parse(&self.api_url)
            .map_err(|e| GalleryError::Config(format!("api_url {:?}: {}", self.api_url, e)))?;
        if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
            return Err(GalleryError::Config(format!(
                "api_url {:?} is not an http(s) address",
                self.api_url
            )));
        }
        Ok(url)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    fn validate(&self) -> Result<()> {
        self.base_url()?;
        if self.thumbnail_size == 0 {
            return Err(GalleryError::Config("thumbnail_size must be positive".into()));
        }
        if self.request_timeout_secs == 0 || self.connect_timeout_secs == 0 {
            return Err(GalleryError::Config("timeouts must be positive".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::from_path(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.base_url().unwrap().as_str(), "http://localhost:8000/");
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"api_url": "https://gallery.example.com/base"}}"#).unwrap();

        let config = Config::from_path(file.path()).unwrap();
        assert_eq!(config.api_url, "https://gallery.example.com/base");
        assert_eq!(config.thumbnail_size, 256);
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();

        let err = Config::from_path(file.path()).unwrap_err();
        assert!(matches!(err, GalleryError::Config(_)));
    }

    #[test]
    fn test_rejects_non_http_base() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"api_url": "ftp://files.example.com"}}"#).unwrap();

        assert!(matches!(
            Config::from_path(file.path()),
            Err(GalleryError::Config(_))
        ));
    }

    #[test]
    fn test_rejects_zero_thumbnail_size() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"thumbnail_size": 0}}"#).unwrap();

        assert!(Config::from_path(file.path()).is_err());
    }
}
