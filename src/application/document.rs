//! Reading the configuration document back from disk.

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::domain::AssistantConfig;
use crate::error::SmokeError;

/// Raw text and parsed JSON of the document at `path`.
///
/// Any well-formed JSON is accepted; the schema is not enforced here.
pub fn read_document(path: &Path) -> Result<(String, Value), SmokeError> {
    let contents = fs::read_to_string(path).map_err(|source| SmokeError::ReadConfig {
        path: path.to_path_buf(),
        source,
    })?;

    match serde_json::from_str(&contents) {
        Ok(value) => Ok((contents, value)),
        Err(source) => Err(SmokeError::ParseConfig {
            path: path.to_path_buf(),
            contents,
            source,
        }),
    }
}

/// Load the document as typed configuration, filling missing keys with
/// defaults.
///
/// Syntax errors are [`SmokeError::ParseConfig`]; well-formed JSON with a
/// value of the wrong type is [`SmokeError::Schema`]. Both keep the line and
/// column of the offending token.
pub fn load_config(path: &Path) -> Result<AssistantConfig, SmokeError> {
    let (contents, _) = read_document(path)?;
    match serde_json::from_str(&contents) {
        Ok(config) => Ok(config),
        Err(source) => Err(SmokeError::Schema {
            path: path.to_path_buf(),
            contents,
            source,
        }),
    }
}
