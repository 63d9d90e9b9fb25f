//! CLI output: error mapping and JSON rendering.

use crate::error::ApiError;
use serde::Serialize;

/// Map domain/service errors to a string for CLI output.
pub fn map_error(e: &ApiError) -> String {
    e.to_string()
}

/// Pretty JSON, the default output of every command.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, ApiError> {
    Ok(serde_json::to_string_pretty(value)?)
}
