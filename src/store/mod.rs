//! Content and Settings Stores
//!
//! Ports for the two collaborators the controller and options facade consume:
//! a post repository (id, path and query access to content items) and a
//! key/value settings store.

pub mod persistence;

pub use persistence::{SledPostRepository, SledSettingsStore};

use crate::error::StorageError;
use crate::query::PostQuery;
use crate::types::{ContentItem, PostId};
use serde_json::Value;

/// Post repository interface
pub trait PostRepository: Send + Sync {
    fn get(&self, id: PostId) -> Result<Option<ContentItem>, StorageError>;
    fn put(&self, item: &ContentItem) -> Result<(), StorageError>;

    /// Translate a relative or absolute URL to a post id via the path index.
    fn url_to_post_id(&self, url: &str) -> Result<Option<PostId>, StorageError>;

    /// Resolve a hierarchical page path (`parent/child`) by slug.
    fn get_by_path(&self, path: &str) -> Result<Option<ContentItem>, StorageError>;

    /// Ids of matching items, ordered by the query's ordering.
    fn query(&self, query: &PostQuery) -> Result<Vec<PostId>, StorageError>;

    /// Published items among `ids` restricted to `post_types`, in `ids` order,
    /// skipping `offset` and returning at most `limit` (all when `None`).
    fn get_many(
        &self,
        ids: &[PostId],
        post_types: &[String],
        limit: Option<usize>,
        offset: usize,
    ) -> Result<Vec<ContentItem>, StorageError>;

    fn count_published(&self, post_type: &str) -> Result<u64, StorageError>;

    /// Most recently modified autosave of `parent` written by `author`.
    fn latest_autosave(
        &self,
        parent: PostId,
        author: Option<u64>,
    ) -> Result<Option<ContentItem>, StorageError>;
}

/// Key/value settings store interface
pub trait SettingsStore: Send + Sync {
    fn get_option(&self, key: &str) -> Result<Option<Value>, StorageError>;

    /// Write a value; returns false when the stored value was already equal.
    fn update_option(&self, key: &str, value: &Value) -> Result<bool, StorageError>;

    /// Write a value only if the key is absent; returns whether it was written.
    fn add_option(&self, key: &str, value: &Value) -> Result<bool, StorageError>;

    fn delete_option(&self, key: &str) -> Result<bool, StorageError>;

    /// All stored options, ordered by key.
    fn list_options(&self) -> Result<Vec<(String, Value)>, StorageError>;
}

/// Normalise a URL into the path-index form: no scheme, host, query or
/// fragment, a single leading slash and no trailing slash (`/` for the root).
pub fn normalize_path(url: &str) -> String {
    let mut rest = url.trim();
    if let Some(idx) = rest.find("://") {
        rest = &rest[idx + 3..];
        rest = match rest.find('/') {
            Some(slash) => &rest[slash..],
            None => "/",
        };
    }
    if let Some(idx) = rest.find(|c| c == '?' || c == '#') {
        rest = &rest[..idx];
    }
    let trimmed = rest.trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", trimmed)
    }
}

/// Extract an explicit id from `?p=<id>` or `?page_id=<id>` query strings.
pub fn query_string_id(url: &str) -> Option<PostId> {
    let query = url.split_once('?')?.1;
    let query = query.split('#').next().unwrap_or(query);
    query.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        match key {
            "p" | "page_id" => value.parse().ok(),
            _ => None,
        }
    })
}
