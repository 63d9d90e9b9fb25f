//! Option values derived from the front-end project descriptor.
//!
//! The descriptor is an Angular-style workspace file: an ordered map of
//! projects, each with an optional `sourceRoot`, `prefix` and a build target
//! carrying `index` and `outputPath`.

use crate::options::defaults::{INDEX_DIST, INDEX_SRC, TEMPLATES_PATH};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::path::Path;
use tracing::{debug, warn};

/// Build target extracted from one project entry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildTarget {
    pub name: String,
    pub index: Option<String>,
    pub source_root: Option<String>,
    pub output_path: Option<String>,
    pub prefix: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Descriptor {
    #[serde(default)]
    projects: Map<String, Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProjectEntry {
    source_root: Option<String>,
    prefix: Option<String>,
    #[serde(default)]
    architect: Architect,
}

#[derive(Debug, Default, Deserialize)]
struct Architect {
    #[serde(default)]
    build: Build,
}

#[derive(Debug, Default, Deserialize)]
struct Build {
    #[serde(default)]
    options: BuildOptions,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BuildOptions {
    index: Option<String>,
    output_path: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Parse a descriptor into its build targets, in document order.
///
/// Project entries that do not have the expected shape are skipped.
pub fn parse_build_targets(json: &str) -> Result<Vec<BuildTarget>, serde_json::Error> {
    let descriptor: Descriptor = serde_json::from_str(json)?;
    let mut targets = Vec::new();
    for (name, value) in descriptor.projects {
        let entry: ProjectEntry = match serde_json::from_value(value) {
            Ok(entry) => entry,
            Err(e) => {
                debug!(project = %name, error = %e, "Skipping malformed project entry");
                continue;
            }
        };
        let options = entry.architect.build.options;
        targets.push(BuildTarget {
            name,
            index: non_empty(options.index),
            source_root: non_empty(entry.source_root),
            output_path: non_empty(options.output_path),
            prefix: non_empty(entry.prefix),
        });
    }
    Ok(targets)
}

/// Read and parse a descriptor file; missing or invalid files yield `None`.
pub fn load_build_targets(path: &Path) -> Option<Vec<BuildTarget>> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "Project descriptor not readable");
            return None;
        }
    };
    match parse_build_targets(&content) {
        Ok(targets) => Some(targets),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to parse project descriptor");
            None
        }
    }
}

/// Options derivable from a single target; empty when nothing applies.
pub fn derive_target_options(target: &BuildTarget) -> Map<String, Value> {
    let mut config = Map::new();

    if let Some(index) = &target.index {
        let index = index.trim_start();
        config.insert(
            INDEX_SRC.to_string(),
            Value::String(format!("/{}", index.trim_start_matches('/'))),
        );

        if let (Some(source_root), Some(output_path)) = (&target.source_root, &target.output_path)
        {
            if let Some(rest) = index.strip_prefix(source_root.as_str()) {
                let dist = [output_path.trim().trim_matches('/'), rest.trim_start_matches('/')]
                    .into_iter()
                    .filter(|part| !part.is_empty())
                    .collect::<Vec<_>>()
                    .join("/");
                config.insert(INDEX_DIST.to_string(), Value::String(format!("/{}", dist)));
            }
        }
    }

    if let Some(source_root) = &target.source_root {
        let mut templates = format!("/{}", source_root.trim().trim_start_matches('/'));
        if let Some(prefix) = &target.prefix {
            templates.push('/');
            templates.push_str(prefix);
        }
        config.insert(TEMPLATES_PATH.to_string(), Value::String(templates));
    }

    config
}

/// Options from the first target yielding a non-empty derivation.
pub fn derive_options(targets: &[BuildTarget]) -> Option<Map<String, Value>> {
    targets
        .iter()
        .map(derive_target_options)
        .find(|config| !config.is_empty())
}
