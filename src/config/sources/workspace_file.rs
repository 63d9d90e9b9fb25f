//! Workspace config file source: config/config.toml, then config/{XO_ENV}.toml

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::File;
use std::path::Path;
use tracing::debug;

pub const ENV_VAR: &str = "XO_ENV";
const DEFAULT_ENV: &str = "development";

/// Add the workspace base file and the environment file, in that order.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    workspace_root: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let env_name = std::env::var(ENV_VAR).unwrap_or_else(|_| DEFAULT_ENV.to_string());
    let config_dir = workspace_root.join("config");

    let layers = [
        config_dir.join("config.toml"),
        config_dir.join(format!("{}.toml", env_name)),
    ];
    Ok(layers
        .into_iter()
        .filter(|path| path.is_file())
        .fold(builder, |builder, path| {
            debug!(config_path = %path.display(), env = %env_name, "Workspace config layer");
            builder.add_source(File::from(path).required(false))
        }))
}
