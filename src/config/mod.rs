//! Configuration types for download operations.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::location::DEFAULT_BASE_URL;

/// Configuration for download operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DownloadConfig {
    /// Number of concurrent file downloads.
    pub concurrent_files: usize,
    /// Origin that every resource path is appended to.
    pub base_url: String,
    /// Per-file transfer limit in seconds. `None` waits indefinitely.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            concurrent_files: 8,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: None,
        }
    }
}

impl DownloadConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of concurrent file downloads. Zero is raised to one.
    #[must_use]
    pub fn with_concurrent_files(mut self, concurrent: usize) -> Self {
        self.concurrent_files = concurrent.max(1);
        self
    }

    /// Sets the dataset origin.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the per-file timeout.
    #[must_use]
    pub const fn with_timeout_secs(mut self, secs: Option<u64>) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Per-file timeout as a [`Duration`].
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Complete application configuration, as stored in `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Download configuration (`[download]` table).
    pub download: DownloadConfig,
}

impl AppConfig {
    /// Creates a new config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Default location of the config file, e.g. `~/.config/shift-dl/config.toml`.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("shift-dl").join("config.toml"))
    }

    /// Parses a config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML for this schema.
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Loads configuration.
    ///
    /// An explicit `path` must exist. Without one, the default path is used
    /// when present and built-in defaults otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match Self::default_path().filter(|p| p.is_file()) {
                Some(p) => p,
                None => return Ok(Self::default()),
            },
        };
        let text = std::fs::read_to_string(&path)?;
        log::debug!("Loaded config from {}", path.display());
        Self::from_toml(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_download_config() {
        let config = DownloadConfig::default();
        assert_eq!(config.concurrent_files, 8);
        assert_eq!(config.base_url, "https://dl.cv.ethz.ch/shift/");
        assert_eq!(config.timeout(), None);
    }

    #[test]
    fn download_config_builder_pattern() {
        let config = DownloadConfig::new()
            .with_concurrent_files(2)
            .with_base_url("http://localhost:8000/")
            .with_timeout_secs(Some(30));

        assert_eq!(config.concurrent_files, 2);
        assert_eq!(config.base_url, "http://localhost:8000/");
        assert_eq!(config.timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn zero_concurrency_is_clamped() {
        assert_eq!(DownloadConfig::new().with_concurrent_files(0).concurrent_files, 1);
    }

    #[test]
    fn download_config_serializes_to_toml() {
        let config = AppConfig::default();
        let toml_str = toml::to_string(&config).unwrap();
        let deserialized = AppConfig::from_toml(&toml_str).unwrap();
        assert_eq!(deserialized, config);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml("[download]\nconcurrent_files = 3\n").unwrap();
        assert_eq!(config.download.concurrent_files, 3);
        assert_eq!(config.download.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn invalid_toml_is_an_error() {
        assert!(AppConfig::from_toml("[download]\nconcurrent_files = \"many\"\n").is_err());
    }

    #[test]
    fn load_explicit_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[download]\ntimeout_secs = 120\n").unwrap();

        let config = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(config.download.timeout_secs, Some(120));
    }

    #[test]
    fn load_missing_explicit_path_fails() {
        let dir = TempDir::new().unwrap();
        assert!(AppConfig::load(Some(&dir.path().join("absent.toml"))).is_err());
    }

    #[test]
    fn default_path_is_namespaced() {
        if let Some(path) = AppConfig::default_path() {
            assert!(path.ends_with("shift-dl/config.toml"));
        }
    }
}
