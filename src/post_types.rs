//! Post type registry: the set of content types known to the host.

use crate::types::PostTypeConfig;

/// Lookup of registered post types
pub trait PostTypeRegistry: Send + Sync {
    fn get(&self, name: &str) -> Option<PostTypeConfig>;

    /// All registered types in registration order
    fn all(&self) -> Vec<PostTypeConfig>;

    /// Names of publicly queryable types in registration order
    fn public_types(&self) -> Vec<String> {
        self.all()
            .into_iter()
            .filter(|t| t.public)
            .map(|t| t.name)
            .collect()
    }
}

/// Registry fixed at startup: the built-in types followed by configured ones
#[derive(Debug, Clone)]
pub struct StaticPostTypeRegistry {
    types: Vec<PostTypeConfig>,
}

impl StaticPostTypeRegistry {
    /// Registry holding only the built-in types
    pub fn new() -> Self {
        let mut page = PostTypeConfig::new("page", "Pages", true);
        page.hierarchical = true;
        Self {
            types: vec![
                PostTypeConfig::new("post", "Posts", true),
                page,
                PostTypeConfig::new("attachment", "Media", true),
                PostTypeConfig::new("revision", "Revisions", false),
                PostTypeConfig::new("nav_menu_item", "Navigation Menu Items", false),
            ],
        }
    }

    /// Register a type; re-registering a name replaces it in place.
    pub fn register(&mut self, config: PostTypeConfig) {
        match self.types.iter_mut().find(|t| t.name == config.name) {
            Some(existing) => *existing = config,
            None => self.types.push(config),
        }
    }

    /// Built-ins plus the given configured types
    pub fn with_types(types: impl IntoIterator<Item = PostTypeConfig>) -> Self {
        let mut registry = Self::new();
        for config in types {
            registry.register(config);
        }
        registry
    }
}

impl Default for StaticPostTypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl PostTypeRegistry for StaticPostTypeRegistry {
    fn get(&self, name: &str) -> Option<PostTypeConfig> {
        self.types.iter().find(|t| t.name == name).cloned()
    }

    fn all(&self) -> Vec<PostTypeConfig> {
        self.types.clone()
    }
}
