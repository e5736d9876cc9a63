//! Authentication domain model.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SetuError};

/// Username prefix required by the registration flow.
///
/// Clinician accounts follow the national ABHA-ID convention, so the
/// service expects usernames of the form `ABHA-<number>`. The check is
/// case-insensitive; the server receives whatever casing the user typed.
pub const ABHA_USERNAME_TAG: &str = "ABHA-";

/// An opaque bearer token issued by the `/token` endpoint.
///
/// The client never inspects the token contents; it only stores and
/// replays it. Not `Display`, so a token cannot end up in a log line by
/// accident.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token value, for the `Authorization` header and the token file.
    pub fn secret(&self) -> &str {
        &self.0
    }
}

/// Login form contents for the `/token` endpoint.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Registration payload for the `/register` endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub username: String,
    pub full_name: String,
    pub password: String,
}

impl Registration {
    pub fn new(
        username: impl Into<String>,
        full_name: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            full_name: full_name.into(),
            password: password.into(),
        }
    }

    /// Validates the registration client-side, before any request is made.
    ///
    /// All three fields must be non-empty and the username must carry the
    /// ABHA tag. Returns the first violation as a `Validation` error with
    /// the message shown inline in the form.
    pub fn validate(&self) -> Result<()> {
        if self.username.trim().is_empty()
            || self.full_name.trim().is_empty()
            || self.password.is_empty()
        {
            return Err(SetuError::validation("All fields are required."));
        }
        if !has_abha_tag(&self.username) {
            return Err(SetuError::validation(format!(
                "Username must start with '{ABHA_USERNAME_TAG}' (your ABHA ID)."
            )));
        }
        Ok(())
    }
}

fn has_abha_tag(username: &str) -> bool {
    username
        .get(..ABHA_USERNAME_TAG.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(ABHA_USERNAME_TAG))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration(username: &str) -> Registration {
        Registration::new(username, "Dr. Sanjay Gupta", "supersecretpassword")
    }

    #[test]
    fn test_validate_accepts_abha_username() {
        assert!(registration("ABHA-91-1234").validate().is_ok());
    }

    #[test]
    fn test_validate_tag_is_case_insensitive() {
        assert!(registration("abha-91-1234").validate().is_ok());
        assert!(registration("Abha-91-1234").validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_missing_tag() {
        let err = registration("doctor_sanjay").validate().unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_validate_rejects_empty_fields() {
        let err = Registration::new("", "", "").validate().unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "All fields are required.");

        // Whitespace-only names do not count as filled in.
        let err = Registration::new("ABHA-1", "   ", "pw").validate().unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_validate_rejects_username_shorter_than_tag() {
        assert!(registration("AB").validate().is_err());
    }
}
