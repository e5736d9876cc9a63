//! Session lifecycle: restore, login, register, logout.

use std::sync::Arc;

use setu_core::auth::{AccessToken, AuthApi, Credentials, Registration};
use setu_core::Result;
use setu_infrastructure::TokenStorage;

/// Owns the session token's lifecycle.
///
/// The token is read from persistent storage at startup, written after a
/// successful login, and removed on logout or when the service rejects it.
/// The transport layer is told about token changes by the frontend, which
/// keeps this service free of HTTP concerns.
pub struct SessionService {
    auth: Arc<dyn AuthApi>,
    storage: TokenStorage,
}

impl SessionService {
    pub fn new(auth: Arc<dyn AuthApi>, storage: TokenStorage) -> Self {
        Self { auth, storage }
    }

    /// Reads the persisted token at startup, if a previous session left one.
    pub fn restore(&self) -> Result<Option<AccessToken>> {
        self.storage.load()
    }

    /// Exchanges credentials for a token and persists it.
    ///
    /// On failure the stored token (if any) is left untouched.
    pub async fn login(&self, credentials: &Credentials) -> Result<AccessToken> {
        let token = self.auth.login(credentials).await?;
        self.storage.store(&token)?;
        Ok(token)
    }

    /// Validates and submits a registration.
    ///
    /// Validation failures surface before any request is made.
    pub async fn register(&self, registration: &Registration) -> Result<()> {
        registration.validate()?;
        self.auth.register(registration).await
    }

    /// Clears the persisted token. The caller resets downstream view state.
    pub fn logout(&self) -> Result<()> {
        self.storage.clear()
    }
}
