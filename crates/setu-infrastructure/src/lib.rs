//! Local persistence for the Setu client: the session-token file and
//! bundle-file reading. Everything else the client touches lives behind
//! the HTTP service.

pub mod bundle;
pub mod paths;
pub mod token_storage;

pub use bundle::read_bundle_file;
pub use paths::SetuPaths;
pub use token_storage::TokenStorage;
