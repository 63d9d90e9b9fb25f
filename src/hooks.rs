//! Hook registry: named extension points.
//!
//! Each hook name maps to an ordered list of value transforms. Transforms run
//! synchronously by ascending priority, then in registration order.

use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::trace;

/// Default priority for filters registered without one
pub const DEFAULT_PRIORITY: i32 = 10;

type Transform = Arc<dyn Fn(Value) -> Value + Send + Sync>;

struct Filter {
    priority: i32,
    transform: Transform,
}

/// Registry of named value filters
#[derive(Default)]
pub struct HookRegistry {
    filters: RwLock<HashMap<String, Vec<Filter>>>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a transform at the default priority
    pub fn add_filter<F>(&self, name: &str, transform: F)
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        self.add_filter_with_priority(name, DEFAULT_PRIORITY, transform);
    }

    pub fn add_filter_with_priority<F>(&self, name: &str, priority: i32, transform: F)
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        let mut filters = self.filters.write();
        let list = filters.entry(name.to_string()).or_default();
        // Stable position: after every filter of equal or lower priority
        let index = list.partition_point(|f| f.priority <= priority);
        list.insert(
            index,
            Filter {
                priority,
                transform: Arc::new(transform),
            },
        );
    }

    /// Remove every transform registered under `name`
    pub fn remove_all(&self, name: &str) -> bool {
        self.filters.write().remove(name).is_some()
    }

    pub fn has_filters(&self, name: &str) -> bool {
        self.filters
            .read()
            .get(name)
            .map(|list| !list.is_empty())
            .unwrap_or(false)
    }

    /// Pass `value` through every transform registered under `name`.
    pub fn apply_filters(&self, name: &str, value: Value) -> Value {
        // Snapshot so transforms may register further filters without deadlocking
        let transforms: Vec<Transform> = match self.filters.read().get(name) {
            Some(list) => list.iter().map(|f| Arc::clone(&f.transform)).collect(),
            None => return value,
        };
        trace!(hook = name, count = transforms.len(), "Applying filters");
        transforms.iter().fold(value, |acc, transform| transform(acc))
    }
}
