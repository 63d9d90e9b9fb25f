//! Core data types shared across the content API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Content item identifier
pub type PostId = u64;

/// Type tag of autosave snapshots.
pub const REVISION_TYPE: &str = "revision";

/// Publication status of a content item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    #[serde(alias = "published")]
    Publish,
    Draft,
    Pending,
    Private,
    Future,
    Inherit,
    Trash,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Publish => "publish",
            PostStatus::Draft => "draft",
            PostStatus::Pending => "pending",
            PostStatus::Private => "private",
            PostStatus::Future => "future",
            PostStatus::Inherit => "inherit",
            PostStatus::Trash => "trash",
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "publish" | "published" => Ok(PostStatus::Publish),
            "draft" => Ok(PostStatus::Draft),
            "pending" => Ok(PostStatus::Pending),
            "private" => Ok(PostStatus::Private),
            "future" => Ok(PostStatus::Future),
            "inherit" => Ok(PostStatus::Inherit),
            "trash" => Ok(PostStatus::Trash),
            other => Err(format!("Unknown post status: {}", other)),
        }
    }
}

/// A single addressable content record (post, page or custom type).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: PostId,
    pub post_type: String,
    pub status: PostStatus,
    /// URL-safe name, unique per type
    pub slug: String,
    /// Relative URL of the item, e.g. `/blog/hello-world`
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub author: Option<u64>,
    #[serde(default)]
    pub parent: Option<PostId>,
    #[serde(default = "Utc::now")]
    pub date: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub modified: DateTime<Utc>,
    #[serde(default)]
    pub menu_order: i64,
    /// Taxonomy name to assigned term slugs
    #[serde(default)]
    pub terms: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub meta: BTreeMap<String, String>,
    /// Opaque host payload, passed through untouched
    #[serde(default)]
    pub payload: serde_json::Value,
}

impl ContentItem {
    /// Minimal item with the given identity; remaining fields take their defaults.
    pub fn new(id: PostId, post_type: impl Into<String>, slug: impl Into<String>) -> Self {
        let slug = slug.into();
        let now = Utc::now();
        Self {
            id,
            post_type: post_type.into(),
            status: PostStatus::Publish,
            path: format!("/{}", slug),
            title: slug.clone(),
            slug,
            content: String::new(),
            excerpt: String::new(),
            author: None,
            parent: None,
            date: now,
            modified: now,
            menu_order: 0,
            terms: BTreeMap::new(),
            meta: BTreeMap::new(),
            payload: serde_json::Value::Null,
        }
    }

    pub fn is_published(&self) -> bool {
        self.status == PostStatus::Publish
    }
}

/// Public configuration of a registered post type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostTypeConfig {
    pub name: String,
    pub label: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub public: bool,
    #[serde(default)]
    pub hierarchical: bool,
    #[serde(default)]
    pub has_archive: bool,
    #[serde(default)]
    pub rest_base: Option<String>,
}

impl PostTypeConfig {
    pub fn new(name: impl Into<String>, label: impl Into<String>, public: bool) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            description: String::new(),
            public,
            hierarchical: false,
            has_archive: false,
            rest_base: None,
        }
    }
}

/// Where a resolved option value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettingSource {
    Override,
    Stored,
    Default,
}

/// A resolved option with its provenance and state tags
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Setting {
    pub key: String,
    pub value: serde_json::Value,
    pub source: SettingSource,
    pub states: Vec<String>,
}
