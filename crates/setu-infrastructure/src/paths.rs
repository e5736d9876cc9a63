//! Unified path management for Setu configuration files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/setu/              # Config directory
//! ├── config.toml              # Endpoint configuration
//! └── token                    # Session bearer token (0600)
//! ```

use std::path::PathBuf;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Could not determine config directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Unified path management for Setu.
pub struct SetuPaths;

impl SetuPaths {
    /// Returns the Setu configuration directory.
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: Path to config directory (e.g., `~/.config/setu/`)
    /// - `Err(PathError::ConfigDirNotFound)`: Could not determine directory
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join("setu"))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the path to the endpoint configuration file.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the path to the session-token file.
    ///
    /// # Security Note
    ///
    /// The token file is written with 600 permissions on Unix; it holds the
    /// raw bearer token.
    pub fn token_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("token"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_dir() {
        let config_dir = SetuPaths::config_dir().unwrap();
        assert!(config_dir.ends_with("setu"));
    }

    #[test]
    fn test_config_file() {
        let config_file = SetuPaths::config_file().unwrap();
        assert!(config_file.ends_with("config.toml"));
        let config_dir = SetuPaths::config_dir().unwrap();
        assert!(config_file.starts_with(&config_dir));
    }

    #[test]
    fn test_token_file() {
        let token_file = SetuPaths::token_file().unwrap();
        assert!(token_file.ends_with("token"));
        let config_dir = SetuPaths::config_dir().unwrap();
        assert!(token_file.starts_with(&config_dir));
    }
}
