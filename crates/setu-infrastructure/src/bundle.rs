//! Local bundle-file reading for the upload flow.
//!
//! The bundle is parsed client-side before anything goes over the wire, so
//! a malformed file fails fast without a request.

use std::fs;
use std::path::Path;

use serde_json::Value;
use setu_core::Result;

/// Reads and parses a local JSON bundle file.
pub fn read_bundle_file(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path)?;
    let bundle = serde_json::from_str(&content)?;
    Ok(bundle)
}
