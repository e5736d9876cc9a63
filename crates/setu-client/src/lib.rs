//! HTTP client for the NAMASTE ↔ ICD-11 terminology service.
//!
//! [`ApiClient`] is bound to a base URL and an optional bearer token and
//! implements the capability traits from `setu-core`, one per flow. All
//! wire-format structs are private to this crate; the rest of the client
//! only sees domain types.

mod audit;
mod auth;
mod client;
mod condition;
pub mod config;
mod diagnosis;
mod terminology;

pub use client::ApiClient;
pub use config::{ClientConfig, DEFAULT_BASE_URL};
