//! The configured HTTP client shared by every flow.

use std::sync::RwLock;
use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use setu_core::auth::AccessToken;
use setu_core::{Result, SetuError};

/// Per-request deadline. The poll loop already bounds attempts; this keeps
/// a single hung request from stalling a flow indefinitely.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client bound to a base URL and bearer token.
///
/// The token lives behind a lock so a login or logout mid-session is
/// visible to every flow holding the same client. All requests except
/// login/register carry the `Authorization: Bearer` header.
pub struct ApiClient {
    http: Client,
    base_url: String,
    token: RwLock<Option<AccessToken>>,
}

impl ApiClient {
    /// Creates a client for the given base URL (no trailing slash needed).
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: Client::new(),
            base_url,
            token: RwLock::new(None),
        }
    }

    /// Sets or clears the bearer token used by subsequent requests.
    pub fn set_token(&self, token: Option<AccessToken>) {
        // Lock poisoning only happens if a writer panicked; propagating the
        // last value is the right recovery for a plain token slot.
        *self.token.write().unwrap_or_else(|e| e.into_inner()) = token;
    }

    /// True when a bearer token is currently set.
    pub fn has_token(&self) -> bool {
        self.token
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .is_some()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) fn get(&self, path: &str) -> RequestBuilder {
        self.authorize(self.http.get(self.url(path)))
    }

    pub(crate) fn post(&self, path: &str) -> RequestBuilder {
        self.authorize(self.http.post(self.url(path)))
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        let builder = builder.timeout(REQUEST_TIMEOUT);
        let token = self.token.read().unwrap_or_else(|e| e.into_inner());
        match token.as_ref() {
            Some(token) => builder.bearer_auth(token.secret()),
            None => builder,
        }
    }

    /// Sends a request and deserializes the JSON response body.
    pub(crate) async fn execute<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = self.check(builder).await?;
        response.json::<T>().await.map_err(|err| {
            SetuError::Serialization {
                format: "JSON".to_string(),
                message: format!("unexpected response body: {err}"),
            }
        })
    }

    /// Sends a request where only the status matters.
    pub(crate) async fn execute_unit(&self, builder: RequestBuilder) -> Result<()> {
        self.check(builder).await?;
        Ok(())
    }

    async fn check(&self, builder: RequestBuilder) -> Result<Response> {
        let response = builder
            .send()
            .await
            .map_err(|err| SetuError::http(err.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(map_api_error(status, &body))
    }
}

/// Error payload the service sends with non-2xx responses.
#[derive(Deserialize)]
struct ErrorDetail {
    detail: String,
}

/// Maps a non-success response to a typed error, preferring the service's
/// `detail` message over the raw body.
pub(crate) fn map_api_error(status: StatusCode, body: &str) -> SetuError {
    let message = serde_json::from_str::<ErrorDetail>(body)
        .map(|wrapper| wrapper.detail)
        .unwrap_or_else(|_| {
            if body.trim().is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            } else {
                body.trim().to_string()
            }
        });

    if status == StatusCode::UNAUTHORIZED {
        SetuError::auth(message)
    } else {
        SetuError::api(status.as_u16(), message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_api_error_prefers_detail_message() {
        let err = map_api_error(
            StatusCode::BAD_REQUEST,
            r#"{"detail": "Username already taken"}"#,
        );
        match err {
            SetuError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Username already taken");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn test_map_api_error_401_is_auth() {
        let err = map_api_error(
            StatusCode::UNAUTHORIZED,
            r#"{"detail": "Incorrect username or password"}"#,
        );
        assert!(err.is_auth_failure());
    }

    #[test]
    fn test_map_api_error_falls_back_to_body_then_reason() {
        let err = map_api_error(StatusCode::BAD_GATEWAY, "upstream exploded");
        assert_eq!(err.to_string(), "Service error (502): upstream exploded");

        let err = map_api_error(StatusCode::BAD_GATEWAY, "");
        assert_eq!(err.to_string(), "Service error (502): Bad Gateway");
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = ApiClient::new("http://localhost:8000/");
        assert_eq!(client.url("/token"), "http://localhost:8000/token");
    }

    #[test]
    fn test_token_lifecycle() {
        let client = ApiClient::new("http://localhost:8000");
        assert!(!client.has_token());
        client.set_token(Some(AccessToken::new("t")));
        assert!(client.has_token());
        client.set_token(None);
        assert!(!client.has_token());
    }
}
