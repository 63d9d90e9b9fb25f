//! Persistence layer for the content and settings stores

use crate::error::StorageError;
use crate::query::PostQuery;
use crate::store::{normalize_path, query_string_id, PostRepository, SettingsStore};
use crate::types::{ContentItem, PostId, PostStatus, REVISION_TYPE};
use serde_json::Value;
use std::path::Path;
use tracing::debug;

const POST_PREFIX: &[u8] = b"post:";
const PATH_PREFIX: &str = "path:";
const OPTIONS_TREE: &str = "options";

fn post_key(id: PostId) -> Vec<u8> {
    let mut key = POST_PREFIX.to_vec();
    key.extend_from_slice(&id.to_be_bytes());
    key
}

fn decode_item(bytes: &[u8]) -> Result<ContentItem, StorageError> {
    serde_json::from_slice(bytes).map_err(|e| {
        StorageError::InvalidRecord(format!("Failed to deserialize content item: {}", e))
    })
}

fn open_db<P: AsRef<Path>>(path: P) -> Result<sled::Db, StorageError> {
    sled::open(path).map_err(|e| {
        StorageError::IoError(std::io::Error::new(
            std::io::ErrorKind::Other,
            format!("Failed to open sled database: {}", e),
        ))
    })
}

fn is_autosave(item: &ContentItem) -> bool {
    item.post_type == REVISION_TYPE && item.slug.contains("autosave")
}

/// Sled-based implementation of PostRepository
///
/// Items are stored as JSON under `post:<id>`; the path index maps
/// `path:<normalized path>` to a bincode-encoded id.
pub struct SledPostRepository {
    db: sled::Db,
}

impl SledPostRepository {
    /// Create a new SledPostRepository at the given path
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        Ok(Self { db: open_db(path)? })
    }

    /// Build a repository over an already opened database
    pub fn from_db(db: sled::Db) -> Self {
        Self { db }
    }

    /// Get the underlying sled database (for advanced operations)
    pub fn db(&self) -> &sled::Db {
        &self.db
    }

    /// All stored items in id order
    pub fn list_all(&self) -> Result<Vec<ContentItem>, StorageError> {
        let mut items = Vec::new();
        for entry in self.db.scan_prefix(POST_PREFIX) {
            let (_, value) = entry?;
            items.push(decode_item(&value)?);
        }
        Ok(items)
    }

    /// Batch insert multiple items
    pub fn put_batch(&self, items: &[ContentItem]) -> Result<(), StorageError> {
        for item in items {
            self.put(item)?;
        }
        Ok(())
    }

    /// Flush all pending writes to disk
    pub fn flush(&self) -> Result<(), StorageError> {
        self.db.flush()?;
        Ok(())
    }

    fn path_key(path: &str) -> String {
        format!("{}{}", PATH_PREFIX, normalize_path(path))
    }

    fn lookup_path(&self, path: &str) -> Result<Option<PostId>, StorageError> {
        match self.db.get(Self::path_key(path).as_bytes())? {
            Some(bytes) => {
                let id: PostId = bincode::deserialize(&bytes).map_err(|e| {
                    StorageError::InvalidRecord(format!(
                        "Failed to deserialize post id from path mapping: {}",
                        e
                    ))
                })?;
                Ok(Some(id))
            }
            None => Ok(None),
        }
    }
}

impl PostRepository for SledPostRepository {
    fn get(&self, id: PostId) -> Result<Option<ContentItem>, StorageError> {
        match self.db.get(post_key(id))? {
            Some(value) => Ok(Some(decode_item(&value)?)),
            None => Ok(None),
        }
    }

    fn put(&self, item: &ContentItem) -> Result<(), StorageError> {
        let value = serde_json::to_vec(item).map_err(|e| {
            StorageError::InvalidRecord(format!("Failed to serialize content item: {}", e))
        })?;

        // Drop a stale path mapping when the item moved
        if let Some(previous) = self.get(item.id)? {
            if !previous.path.is_empty()
                && normalize_path(&previous.path) != normalize_path(&item.path)
                && self.lookup_path(&previous.path)? == Some(item.id)
            {
                self.db.remove(Self::path_key(&previous.path).as_bytes())?;
            }
        }

        self.db.insert(post_key(item.id), value)?;

        // Revisions are never addressable by URL
        if item.post_type != REVISION_TYPE && !item.path.is_empty() {
            let id_bytes = bincode::serialize(&item.id).map_err(|e| {
                StorageError::InvalidRecord(format!(
                    "Failed to serialize post id for path mapping: {}",
                    e
                ))
            })?;
            self.db.insert(Self::path_key(&item.path).as_bytes(), id_bytes)?;
        }

        Ok(())
    }

    fn url_to_post_id(&self, url: &str) -> Result<Option<PostId>, StorageError> {
        if let Some(id) = query_string_id(url) {
            return Ok(self.get(id)?.map(|item| item.id));
        }
        let normalized = normalize_path(url);
        if normalized == "/" {
            return Ok(None);
        }
        let id = self.lookup_path(&normalized)?;
        debug!(url = %url, path = %normalized, found = id.is_some(), "Path index lookup");
        Ok(id)
    }

    fn get_by_path(&self, path: &str) -> Result<Option<ContentItem>, StorageError> {
        let normalized = normalize_path(path);
        let segments: Vec<&str> = normalized
            .trim_start_matches('/')
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();
        let Some(leaf) = segments.last() else {
            return Ok(None);
        };

        let pages: Vec<ContentItem> = self
            .list_all()?
            .into_iter()
            .filter(|i| i.post_type == "page" && i.status != PostStatus::Trash)
            .collect();

        let find = |id: PostId| pages.iter().find(|p| p.id == id);

        // Walk each candidate's ancestry back up the requested segments
        'candidates: for candidate in pages.iter().filter(|p| p.slug == *leaf) {
            let mut current = candidate;
            for segment in segments.iter().rev().skip(1) {
                match current.parent.and_then(find) {
                    Some(parent) if parent.slug == *segment => current = parent,
                    _ => continue 'candidates,
                }
            }
            if current.parent.and_then(find).is_none() {
                return Ok(Some(candidate.clone()));
            }
        }
        Ok(None)
    }

    fn query(&self, query: &PostQuery) -> Result<Vec<PostId>, StorageError> {
        let mut items: Vec<ContentItem> = self
            .list_all()?
            .into_iter()
            .filter(|item| query.matches(item))
            .collect();
        query.sort(&mut items);
        Ok(items.into_iter().map(|item| item.id).collect())
    }

    fn get_many(
        &self,
        ids: &[PostId],
        post_types: &[String],
        limit: Option<usize>,
        offset: usize,
    ) -> Result<Vec<ContentItem>, StorageError> {
        let mut items = Vec::new();
        for id in ids {
            if let Some(item) = self.get(*id)? {
                if item.is_published()
                    && (post_types.is_empty() || post_types.iter().any(|t| *t == item.post_type))
                {
                    items.push(item);
                }
            }
        }
        Ok(items
            .into_iter()
            .skip(offset)
            .take(limit.unwrap_or(usize::MAX))
            .collect())
    }

    fn count_published(&self, post_type: &str) -> Result<u64, StorageError> {
        Ok(self
            .list_all()?
            .iter()
            .filter(|item| item.post_type == post_type && item.is_published())
            .count() as u64)
    }

    fn latest_autosave(
        &self,
        parent: PostId,
        author: Option<u64>,
    ) -> Result<Option<ContentItem>, StorageError> {
        Ok(self
            .list_all()?
            .into_iter()
            .filter(|item| is_autosave(item) && item.parent == Some(parent))
            .filter(|item| author.is_none() || item.author == author)
            .max_by(|a, b| a.modified.cmp(&b.modified).then_with(|| a.id.cmp(&b.id))))
    }
}

/// Sled-based implementation of SettingsStore
///
/// Options live in their own tree as JSON values.
pub struct SledSettingsStore {
    tree: sled::Tree,
}

impl SledSettingsStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        Self::from_db(&open_db(path)?)
    }

    pub fn from_db(db: &sled::Db) -> Result<Self, StorageError> {
        Ok(Self {
            tree: db.open_tree(OPTIONS_TREE)?,
        })
    }

    fn encode(value: &Value) -> Result<Vec<u8>, StorageError> {
        serde_json::to_vec(value)
            .map_err(|e| StorageError::InvalidRecord(format!("Failed to serialize option: {}", e)))
    }

    fn decode(bytes: &[u8]) -> Result<Value, StorageError> {
        serde_json::from_slice(bytes)
            .map_err(|e| StorageError::InvalidRecord(format!("Failed to deserialize option: {}", e)))
    }
}

impl SettingsStore for SledSettingsStore {
    fn get_option(&self, key: &str) -> Result<Option<Value>, StorageError> {
        match self.tree.get(key.as_bytes())? {
            Some(bytes) => Ok(Some(Self::decode(&bytes)?)),
            None => Ok(None),
        }
    }

    fn update_option(&self, key: &str, value: &Value) -> Result<bool, StorageError> {
        if self.get_option(key)?.as_ref() == Some(value) {
            return Ok(false);
        }
        self.tree.insert(key.as_bytes(), Self::encode(value)?)?;
        Ok(true)
    }

    fn add_option(&self, key: &str, value: &Value) -> Result<bool, StorageError> {
        let swapped = self.tree.compare_and_swap(
            key.as_bytes(),
            None as Option<&[u8]>,
            Some(Self::encode(value)?),
        )?;
        Ok(swapped.is_ok())
    }

    fn delete_option(&self, key: &str) -> Result<bool, StorageError> {
        Ok(self.tree.remove(key.as_bytes())?.is_some())
    }

    fn list_options(&self) -> Result<Vec<(String, Value)>, StorageError> {
        let mut options = Vec::new();
        for entry in self.tree.iter() {
            let (key, value) = entry?;
            options.push((String::from_utf8_lossy(&key).into_owned(), Self::decode(&value)?));
        }
        Ok(options)
    }
}
