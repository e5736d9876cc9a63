//! Session-token file storage.
//!
//! The only state Setu persists locally is the opaque bearer token, so a
//! login survives client restarts. One string, one file, cleared on logout.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use setu_core::auth::AccessToken;
use setu_core::{Result, SetuError};

use crate::paths::SetuPaths;

/// Storage for the session token file.
///
/// Responsibilities:
/// - Read the token back at startup (absent file means "not logged in")
/// - Write the token after a successful login
/// - Remove the file on logout or when the server rejects the session
///
/// Does NOT:
/// - Inspect or validate the token (it is opaque to the client)
/// - Handle encryption (plaintext file, 600 permissions on Unix)
pub struct TokenStorage {
    path: PathBuf,
}

impl TokenStorage {
    /// Creates a TokenStorage with the default path (`~/.config/setu/token`).
    pub fn new() -> Result<Self> {
        let path = SetuPaths::token_file().map_err(|e| SetuError::config(e.to_string()))?;
        Ok(Self { path })
    }

    /// Creates a TokenStorage with a custom path (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Loads the stored token, if any.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(token))`: a token is stored
    /// - `Ok(None)`: no token file, or the file is empty
    /// - `Err(_)`: the file exists but could not be read
    pub fn load(&self) -> Result<Option<AccessToken>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let token = content.trim();
        if token.is_empty() {
            return Ok(None);
        }
        Ok(Some(AccessToken::new(token)))
    }

    /// Stores the token, creating the config directory as needed.
    pub fn store(&self, token: &AccessToken) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, token.secret())?;

        // Token file holds the raw credential; keep it user-only on Unix.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600))?;
        }

        tracing::debug!(path = %self.path.display(), "session token stored");
        Ok(())
    }

    /// Removes the token file. Idempotent: clearing an absent token is fine.
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!(path = %self.path.display(), "session token cleared");
                Ok(())
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    /// Returns the path to the token file.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn storage_in(temp_dir: &TempDir) -> TokenStorage {
        TokenStorage::with_path(temp_dir.path().join("setu").join("token"))
    }

    #[test]
    fn test_load_without_file_is_none() {
        let temp_dir = TempDir::new().unwrap();
        assert_eq!(storage_in(&temp_dir).load().unwrap(), None);
    }

    #[test]
    fn test_store_then_load_round_trips() {
        let temp_dir = TempDir::new().unwrap();
        let storage = storage_in(&temp_dir);
        let token = AccessToken::new("eyJhbGciOiJIUzI1NiJ9.demo");

        storage.store(&token).unwrap();
        assert_eq!(storage.load().unwrap(), Some(token));
    }

    #[test]
    fn test_store_overwrites_previous_token() {
        let temp_dir = TempDir::new().unwrap();
        let storage = storage_in(&temp_dir);

        storage.store(&AccessToken::new("first")).unwrap();
        storage.store(&AccessToken::new("second")).unwrap();
        assert_eq!(storage.load().unwrap(), Some(AccessToken::new("second")));
    }

    #[test]
    fn test_clear_removes_token_and_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let storage = storage_in(&temp_dir);

        storage.store(&AccessToken::new("t")).unwrap();
        storage.clear().unwrap();
        assert_eq!(storage.load().unwrap(), None);

        // Clearing again must not error.
        storage.clear().unwrap();
    }

    #[test]
    fn test_whitespace_only_file_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let storage = storage_in(&temp_dir);
        fs::create_dir_all(storage.path().parent().unwrap()).unwrap();
        fs::write(storage.path(), "\n").unwrap();
        assert_eq!(storage.load().unwrap(), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_token_file_is_user_only() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let storage = storage_in(&temp_dir);
        storage.store(&AccessToken::new("t")).unwrap();

        let mode = fs::metadata(storage.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
