//! Session and authentication domain.

pub mod model;
pub mod service;

pub use model::{AccessToken, Credentials, Registration, ABHA_USERNAME_TAG};
pub use service::AuthApi;
