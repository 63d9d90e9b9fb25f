//! Options Facade
//!
//! Layers the deployment override map over the persisted settings store and
//! routes every read and write through per-key hooks:
//!
//! - `xo/options/get/<key>` transforms values returned by [`Options::get_option`]
//! - `xo/options/set/<key>` transforms values before [`Options::set_option`] persists them
//! - `xo/options/states/<key>` extends [`Options::get_states`]
//! - `xo/options/defaults` transforms the full default map
//! - `xo/options/settings` transforms [`Options::get_current_settings`]

pub mod defaults;
pub mod overrides;
pub mod project;

pub use defaults::{default_settings, DEFAULT_POSTS_PER_PAGE, PAGE_ON_FRONT, POSTS_PER_PAGE};
pub use overrides::Overrides;
pub use project::{derive_options, load_build_targets, BuildTarget};

use crate::error::StorageError;
use crate::hooks::HookRegistry;
use crate::store::SettingsStore;
use crate::types::{Setting, SettingSource};
use serde_json::{Map, Value};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, warn};

/// State tag reported for overridden keys
pub const STATE_OVERRIDE: &str = "override";

fn get_hook(key: &str) -> String {
    format!("xo/options/get/{}", key)
}

fn set_hook(key: &str) -> String {
    format!("xo/options/set/{}", key)
}

fn states_hook(key: &str) -> String {
    format!("xo/options/states/{}", key)
}

const DEFAULTS_HOOK: &str = "xo/options/defaults";
const SETTINGS_HOOK: &str = "xo/options/settings";

/// Options facade over a settings store
pub struct Options {
    store: Arc<dyn SettingsStore>,
    overrides: Arc<Overrides>,
    hooks: Arc<HookRegistry>,
    project_descriptor: Option<PathBuf>,
}

impl Options {
    pub fn new(
        store: Arc<dyn SettingsStore>,
        overrides: Arc<Overrides>,
        hooks: Arc<HookRegistry>,
    ) -> Self {
        Self {
            store,
            overrides,
            hooks,
            project_descriptor: None,
        }
    }

    /// Derive extra defaults from the given project descriptor file
    pub fn with_project_descriptor(mut self, path: Option<PathBuf>) -> Self {
        self.project_descriptor = path;
        self
    }

    pub fn hooks(&self) -> &Arc<HookRegistry> {
        &self.hooks
    }

    pub fn overrides(&self) -> &Overrides {
        &self.overrides
    }

    /// Resolve an option: override, then stored value, then `default`.
    pub fn get_option(&self, key: &str, default: Value) -> Result<Value, StorageError> {
        let value = match self.overrides.get(key) {
            Some(value) => value.clone(),
            None => self.store.get_option(key)?.unwrap_or(default),
        };
        Ok(self.hooks.apply_filters(&get_hook(key), value))
    }

    /// Resolve an option as an integer, accepting numeric strings.
    pub fn get_int(&self, key: &str, default: i64) -> Result<i64, StorageError> {
        let value = self.get_option(key, Value::from(default))?;
        Ok(value_as_int(&value).unwrap_or(0))
    }

    /// Persist an option; returns whether the stored value changed.
    pub fn set_option(&self, key: &str, value: Value) -> Result<bool, StorageError> {
        let value = self.hooks.apply_filters(&set_hook(key), value);
        let changed = self.store.update_option(key, &value)?;
        debug!(key, changed, "Option set");
        Ok(changed)
    }

    /// Compiled-in defaults overlaid with project-derived values.
    pub fn get_defaults(&self) -> Map<String, Value> {
        let mut defaults = default_settings();

        if let Some(derived) = self
            .project_descriptor
            .as_deref()
            .and_then(load_build_targets)
            .and_then(|targets| derive_options(&targets))
        {
            debug!(keys = derived.len(), "Merging project-derived defaults");
            defaults::deep_merge(&mut defaults, derived);
        }

        match self
            .hooks
            .apply_filters(DEFAULTS_HOOK, Value::Object(defaults.clone()))
        {
            Value::Object(filtered) => filtered,
            _ => {
                warn!("Defaults hook returned a non-object value; ignoring it");
                defaults
            }
        }
    }

    /// Store every default that is not yet present; never overwrites.
    pub fn set_defaults(&self) -> Result<bool, StorageError> {
        let mut any_set = false;
        for (key, value) in self.get_defaults() {
            if self.store.add_option(&key, &value)? {
                any_set = true;
            }
        }
        Ok(any_set)
    }

    /// Overwrite every default key with its default value.
    pub fn reset_defaults(&self) -> Result<bool, StorageError> {
        let mut any_set = false;
        for (key, value) in self.get_defaults() {
            if self.store.update_option(&key, &value)? {
                any_set = true;
            }
        }
        Ok(any_set)
    }

    /// State tags of a key: `override` when overridden, plus hook additions.
    pub fn get_states(&self, key: &str) -> Vec<String> {
        let mut states = Vec::new();
        if self.overrides.contains(key) {
            states.push(STATE_OVERRIDE.to_string());
        }
        let filtered = self.hooks.apply_filters(
            &states_hook(key),
            Value::Array(states.iter().cloned().map(Value::String).collect()),
        );
        match filtered {
            Value::Array(values) => values
                .into_iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect(),
            _ => states,
        }
    }

    /// Every default key resolved through [`Options::get_option`].
    pub fn get_current_settings(&self) -> Result<Map<String, Value>, StorageError> {
        let mut settings = Map::new();
        for (key, default) in self.get_defaults() {
            let value = self.get_option(&key, default)?;
            settings.insert(key, value);
        }
        match self
            .hooks
            .apply_filters(SETTINGS_HOOK, Value::Object(settings.clone()))
        {
            Value::Object(filtered) => Ok(filtered),
            _ => Ok(settings),
        }
    }

    /// Resolved value of a key together with where it came from.
    pub fn describe(&self, key: &str) -> Result<Setting, StorageError> {
        let default = self.get_defaults().get(key).cloned().unwrap_or(Value::Null);
        let source = if self.overrides.contains(key) {
            SettingSource::Override
        } else if self.store.get_option(key)?.is_some() {
            SettingSource::Stored
        } else {
            SettingSource::Default
        };
        Ok(Setting {
            key: key.to_string(),
            value: self.get_option(key, default)?,
            source,
            states: self.get_states(key),
        })
    }
}

/// Integer view of a JSON value, in the lenient way host options are read.
pub fn value_as_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        Value::Bool(b) => Some(i64::from(*b)),
        _ => None,
    }
}
