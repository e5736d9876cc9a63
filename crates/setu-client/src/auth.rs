//! Login and registration endpoints.

use async_trait::async_trait;
use serde::Deserialize;
use setu_core::auth::{AccessToken, AuthApi, Credentials, Registration};
use setu_core::Result;

use crate::client::ApiClient;

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[async_trait]
impl AuthApi for ApiClient {
    async fn login(&self, credentials: &Credentials) -> Result<AccessToken> {
        // OAuth2 password flow: the token endpoint wants a form body, not JSON.
        let form = [
            ("username", credentials.username.as_str()),
            ("password", credentials.password.as_str()),
        ];
        let response: TokenResponse = self.execute(self.post("/token").form(&form)).await?;
        Ok(AccessToken::new(response.access_token))
    }

    async fn register(&self, registration: &Registration) -> Result<()> {
        // 201 with the public user profile; the client only cares that it
        // succeeded.
        self.execute_unit(self.post("/register").json(registration))
            .await
    }
}
