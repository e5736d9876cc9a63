//! Endpoint configuration resolution.
//!
//! The base URL is resolved in priority order:
//!
//! 1. `--base-url` command-line override
//! 2. `SETU_BASE_URL` environment variable
//! 3. `base_url` in `~/.config/setu/config.toml`
//! 4. the local development default

use std::fs;
use std::path::Path;

use serde::Deserialize;
use setu_infrastructure::SetuPaths;

/// Base URL used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Environment variable overriding the configured base URL.
pub const BASE_URL_ENV: &str = "SETU_BASE_URL";

/// Resolved client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
}

/// On-disk shape of `config.toml`.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    #[serde(default)]
    base_url: Option<String>,
}

impl ClientConfig {
    /// Resolves the configuration from the standard sources.
    pub fn resolve(cli_override: Option<String>) -> Self {
        let env_value = std::env::var(BASE_URL_ENV).ok();
        let file_value = SetuPaths::config_file()
            .ok()
            .and_then(|path| load_file_base_url(&path));
        Self::from_sources(cli_override, env_value, file_value)
    }

    fn from_sources(
        cli_override: Option<String>,
        env_value: Option<String>,
        file_value: Option<String>,
    ) -> Self {
        let base_url = cli_override
            .or(env_value)
            .or(file_value)
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self { base_url }
    }
}

/// Reads `base_url` from a config file. A missing file is normal; a
/// malformed one is logged and treated as absent so a bad config never
/// blocks startup.
fn load_file_base_url(path: &Path) -> Option<String> {
    let content = fs::read_to_string(path).ok()?;
    match toml::from_str::<FileConfig>(&content) {
        Ok(config) => config.base_url,
        Err(err) => {
            tracing::warn!(path = %path.display(), %err, "ignoring malformed config file");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_cli_override_wins() {
        let config = ClientConfig::from_sources(
            Some("http://cli:1".to_string()),
            Some("http://env:2".to_string()),
            Some("http://file:3".to_string()),
        );
        assert_eq!(config.base_url, "http://cli:1");
    }

    #[test]
    fn test_env_beats_file() {
        let config = ClientConfig::from_sources(
            None,
            Some("http://env:2".to_string()),
            Some("http://file:3".to_string()),
        );
        assert_eq!(config.base_url, "http://env:2");
    }

    #[test]
    fn test_defaults_when_nothing_configured() {
        let config = ClientConfig::from_sources(None, None, None);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_blank_values_fall_through_to_default() {
        let config = ClientConfig::from_sources(Some("  ".to_string()), None, None);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_load_file_base_url() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "base_url = \"http://clinic.example:8000\"\n").unwrap();
        assert_eq!(
            load_file_base_url(&path),
            Some("http://clinic.example:8000".to_string())
        );
    }

    #[test]
    fn test_malformed_file_is_ignored() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "base_url = [not toml").unwrap();
        assert_eq!(load_file_base_url(&path), None);
    }

    #[test]
    fn test_missing_file_is_ignored() {
        let temp_dir = TempDir::new().unwrap();
        assert_eq!(load_file_base_url(&temp_dir.path().join("absent.toml")), None);
    }
}
