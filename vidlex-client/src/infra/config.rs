use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "vidlex";
const CONFIG_FILE: &str = "config.json";
pub const SERVER_URL_ENV: &str = "VIDLEX_SERVER_URL";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Persistent client settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server_url: String,
    /// Items requested per feed page.
    pub page_size: usize,
    /// Snippets requested per phrase search.
    pub snippet_page_size: usize,
    /// Drag distance past which a gesture always leaves the start item.
    pub fling_threshold: f32,
    /// Distance from the end, in viewport heights, that triggers a page load.
    pub end_reached_threshold: f32,
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:3000/api".to_string(),
            page_size: 5,
            snippet_page_size: 12,
            fling_threshold: 24.0,
            end_reached_threshold: 0.6,
            request_timeout_secs: 30,
        }
    }
}

impl Config {
    pub fn load() -> Self {
        let mut config = match Self::config_path() {
            Some(path) if path.exists() => match Self::load_from(&path) {
                Ok(config) => config,
                Err(err) => {
                    log::warn!(
                        "[Config] Ignoring unreadable config {}: {}",
                        path.display(),
                        err
                    );
                    Self::default()
                }
            },
            _ => Self::default(),
        };

        // Allow env var to override config file for server URL
        if let Ok(server_url) = std::env::var(SERVER_URL_ENV) {
            config.server_url = server_url;
        }

        config.sanitized()
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config.sanitized())
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        if let Some(path) = Self::config_path() {
            self.save_to(&path)?;
        }
        Ok(())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Clamp values that would stall pagination or activation.
    fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if self.page_size == 0 {
            self.page_size = defaults.page_size;
        }
        if self.snippet_page_size == 0 {
            self.snippet_page_size = defaults.snippet_page_size;
        }
        if !self.fling_threshold.is_finite() || self.fling_threshold < 0.0 {
            self.fling_threshold = defaults.fling_threshold;
        }
        if !self.end_reached_threshold.is_finite()
            || self.end_reached_threshold < 0.0
        {
            self.end_reached_threshold = defaults.end_reached_threshold;
        }
        if self.request_timeout_secs == 0 {
            self.request_timeout_secs = defaults.request_timeout_secs;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("vidlex-config-{}-{}", std::process::id(), name))
            .join(CONFIG_FILE)
    }

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let path = temp_path("partial");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, r#"{ "page_size": 10 }"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.page_size, 10);
        assert_eq!(config.fling_threshold, 24.0);
        assert_eq!(config.snippet_page_size, 12);
    }

    #[test]
    fn zero_and_negative_values_are_sanitized() {
        let path = temp_path("sanitize");
        let config = Config {
            page_size: 0,
            fling_threshold: -3.0,
            request_timeout_secs: 0,
            ..Config::default()
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let path = temp_path("malformed");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::Parse(_))
        ));
    }
}
