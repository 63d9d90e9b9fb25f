//! Built-in defaults; every other layer is merged on top of these.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};

const DEFAULTS: [(&str, &str); 4] = [
    ("storage.store_path", ".xo/store"),
    ("logging.level", "info"),
    ("logging.format", "text"),
    ("logging.output", "stderr"),
];

/// Create a Config builder with the built-in defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    DEFAULTS
        .iter()
        .try_fold(Config::builder(), |builder, (key, value)| {
            builder.set_default(*key, *value)
        })
}
