//! CLI route: single route table and run context. Dispatches to the posts
//! controller, options facade and presentation.

use crate::config::{ConfigLoader, XoConfig};
use crate::error::{ApiError, StorageError};
use crate::hooks::HookRegistry;
use crate::options::Options;
use crate::post_types::StaticPostTypeRegistry;
use crate::posts::{FilterRequest, GetRequest, PostsController};
use crate::settings::PostsTab;
use crate::store::{SledPostRepository, SledSettingsStore};
use crate::types::ContentItem;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use crate::cli::parse::{Commands, OptionCommands};
use crate::cli::presentation::{format_posts_tab_text, format_settings_table};
use crate::cli::{command_name, to_json};

/// Runtime context for CLI execution: workspace, config and domain facades.
/// Built from workspace path and optional config path using ConfigLoader only.
pub struct RunContext {
    config: XoConfig,
    workspace_root: PathBuf,
    store_path: PathBuf,
    repo: Arc<SledPostRepository>,
    types: Arc<StaticPostTypeRegistry>,
    options: Arc<Options>,
    controller: PostsController,
}

impl RunContext {
    /// Create run context from workspace root and optional config path.
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = if let Some(ref cfg_path) = config_path {
            ConfigLoader::load_from_file(cfg_path)?
        } else {
            ConfigLoader::load(&workspace_root)?
        };
        if let Err(errors) = config.validate() {
            let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            return Err(ApiError::ConfigError(messages.join("; ")));
        }

        let store_path = config.storage.resolve_path(&workspace_root);
        std::fs::create_dir_all(&store_path).map_err(StorageError::IoError)?;
        let db = sled::open(&store_path).map_err(StorageError::from)?;

        let repo = Arc::new(SledPostRepository::from_db(db.clone()));
        let settings_store = Arc::new(SledSettingsStore::from_db(&db)?);
        let options = Arc::new(
            Options::new(
                settings_store,
                Arc::new(config.overrides()),
                Arc::new(HookRegistry::new()),
            )
            .with_project_descriptor(config.project_config_path(&workspace_root)),
        );
        let types = Arc::new(StaticPostTypeRegistry::with_types(
            config.post_types.iter().cloned(),
        ));
        let controller = PostsController::new(repo.clone(), types.clone(), options.clone());

        debug!(store_path = %store_path.display(), "Run context ready");
        Ok(Self {
            config,
            workspace_root,
            store_path,
            repo,
            types,
            options,
            controller,
        })
    }

    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    pub fn store_path(&self) -> &Path {
        &self.store_path
    }

    pub fn options(&self) -> &Arc<Options> {
        &self.options
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        let started = Instant::now();
        let name = command_name(command);
        let result = self.execute_inner(command);
        info!(
            command = %name,
            ok = result.is_ok(),
            duration_ms = started.elapsed().as_millis() as u64,
            "Command finished"
        );
        result
    }

    fn execute_inner(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Get { id, url } => {
                let request = GetRequest {
                    post_id: *id,
                    url: url.clone(),
                };
                to_json(&self.controller.get(&request))
            }
            Commands::Preview { id } => {
                to_json(&self.controller.get_draft_or_preview(&self.config.actor, *id))
            }
            Commands::Filter {
                search,
                post_type,
                current_page,
                posts_per_page,
                order,
                orderby,
                include,
                exclude,
                name,
                tax_query,
                meta_query,
            } => {
                let request = FilterRequest {
                    search: search.clone(),
                    post_type: post_type.clone(),
                    current_page: *current_page,
                    posts_per_page: *posts_per_page,
                    order: order.clone(),
                    orderby: orderby.clone(),
                    include: include.clone(),
                    exclude: exclude.clone(),
                    name: name.clone(),
                    tax_query: parse_json_arg("tax-query", tax_query.as_deref())?,
                    meta_query: parse_json_arg("meta-query", meta_query.as_deref())?,
                };
                to_json(&self.controller.filter(&request))
            }
            Commands::Type { name } => to_json(&self.controller.config(name.as_deref())),
            Commands::Option { command } => self.handle_option_command(command),
            Commands::Import { file } => self.import(file),
            Commands::Settings { format } => {
                let tab = PostsTab::build(self.types.as_ref(), &self.options)?;
                if format == "text" {
                    Ok(format_posts_tab_text(&tab))
                } else {
                    to_json(&tab)
                }
            }
        }
    }

    fn handle_option_command(&self, command: &OptionCommands) -> Result<String, ApiError> {
        match command {
            OptionCommands::Get { key } => to_json(&self.options.describe(key)?),
            OptionCommands::Set { key, value } => {
                let changed = self.options.set_option(key, parse_value(value))?;
                let value = self.options.get_option(key, Value::Null)?;
                to_json(&json!({ "key": key, "value": value, "changed": changed }))
            }
            OptionCommands::States { key } => to_json(&self.options.get_states(key)),
            OptionCommands::Defaults => to_json(&self.options.get_defaults()),
            OptionCommands::SetDefaults => {
                to_json(&json!({ "changed": self.options.set_defaults()? }))
            }
            OptionCommands::Reset => to_json(&json!({ "changed": self.options.reset_defaults()? })),
            OptionCommands::List { format } => {
                let current = self.options.get_current_settings()?;
                if format == "text" {
                    let mut rows = Vec::with_capacity(current.len());
                    for key in current.keys() {
                        rows.push(self.options.describe(key)?);
                    }
                    Ok(format_settings_table(&rows))
                } else {
                    to_json(&current)
                }
            }
        }
    }

    fn import(&self, file: &Path) -> Result<String, ApiError> {
        let raw = std::fs::read_to_string(file).map_err(StorageError::IoError)?;
        let items: Vec<ContentItem> = match serde_json::from_str::<Value>(&raw)? {
            Value::Array(_) => serde_json::from_str(&raw)?,
            _ => vec![serde_json::from_str(&raw)?],
        };
        self.repo.put_batch(&items)?;
        self.repo.flush()?;
        info!(count = items.len(), file = %file.display(), "Imported content items");
        to_json(&json!({ "imported": items.len() }))
    }
}

/// Option values are JSON when they parse as JSON, plain strings otherwise.
fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

fn parse_json_arg<T: serde::de::DeserializeOwned>(
    flag: &str,
    raw: Option<&str>,
) -> Result<Option<T>, ApiError> {
    raw.map(|raw| {
        serde_json::from_str(raw)
            .map_err(|e| ApiError::InvalidInput(format!("--{}: {}", flag, e)))
    })
    .transpose()
}
