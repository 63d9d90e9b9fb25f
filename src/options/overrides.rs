//! Deployment override map, loaded once from the settings blob.

use serde_json::{Map, Value};
use tracing::warn;

/// Environment variable holding the settings blob
pub const SETTINGS_ENV: &str = "XO_SETTINGS";

/// Read-only option overrides taking precedence over stored values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    values: Map<String, Value>,
}

impl Overrides {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_map(values: Map<String, Value>) -> Self {
        Self { values }
    }

    /// Parse a settings blob of the form `{"overrides": {...}}`.
    ///
    /// Malformed blobs yield an empty map.
    pub fn from_settings_json(blob: &str) -> Self {
        match serde_json::from_str::<Value>(blob) {
            Ok(settings) => Self::from_settings(&settings),
            Err(e) => {
                warn!(error = %e, "Ignoring unparseable settings blob");
                Self::empty()
            }
        }
    }

    /// Extract the `overrides` object of an already parsed settings value.
    pub fn from_settings(settings: &Value) -> Self {
        match settings.get("overrides") {
            Some(Value::Object(values)) => Self::from_map(values.clone()),
            Some(other) if !other.is_null() => {
                warn!("Settings `overrides` is not an object; ignoring");
                Self::empty()
            }
            _ => Self::empty(),
        }
    }

    /// Load from `XO_SETTINGS` when set
    pub fn from_env() -> Option<Self> {
        std::env::var(SETTINGS_ENV)
            .ok()
            .map(|blob| Self::from_settings_json(&blob))
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
