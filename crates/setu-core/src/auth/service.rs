//! Authentication capability trait.

use async_trait::async_trait;

use super::model::{AccessToken, Credentials, Registration};
use crate::error::Result;

/// Capability for the login and registration endpoints.
///
/// The two operations are the only unauthenticated calls in the system.
/// Keeping them behind a trait lets the session flow be tested without a
/// live HTTP collaborator.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchanges form-encoded credentials for a bearer token.
    ///
    /// # Returns
    ///
    /// - `Ok(AccessToken)`: credentials accepted
    /// - `Err(SetuError::Auth)`: credentials rejected by the service
    /// - `Err(_)`: transport or service failure
    async fn login(&self, credentials: &Credentials) -> Result<AccessToken>;

    /// Creates a new clinician account.
    ///
    /// Callers are expected to run [`Registration::validate`] first; the
    /// implementation submits the payload as-is and surfaces the server's
    /// `detail` message on rejection.
    async fn register(&self, registration: &Registration) -> Result<()>;
}
