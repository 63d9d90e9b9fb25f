//! Error types for the Xo content API.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Storage-related errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("Storage I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] sled::Error),
}

/// Errors surfaced by services and the CLI
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::InvalidInput(err.to_string())
    }
}

/// Stable failure categories reported in response envelopes.
///
/// A non-public post type is reported as `NotFound` so callers cannot tell it
/// apart from an unregistered one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    MissingIdentifier,
    NotFound,
    NotPublished,
    Forbidden,
    NoAutosave,
    NoMatches,
    MissingType,
    Internal,
}

/// Failures of the posts controller operations.
///
/// Display strings are the messages returned to callers.
#[derive(Debug, Error)]
pub enum PostsError {
    #[error("Missing post id or url.")]
    MissingIdOrUrl,

    #[error("Missing post id.")]
    MissingId,

    #[error("Unable to locate post.")]
    PostNotFound,

    #[error("The selected post is not published.")]
    NotPublished,

    #[error("Current user is not an editor.")]
    Forbidden,

    #[error("Unable to locate post autosave.")]
    NoAutosave,

    #[error("Unable to locate posts.")]
    NoMatches,

    #[error("Missing post type.")]
    MissingType,

    #[error("Post type not found.")]
    TypeNotFound,

    #[error("Post type not found.")]
    TypeNotPublic,

    #[error("An unexpected error occurred.")]
    Storage(#[from] StorageError),
}

impl PostsError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PostsError::MissingIdOrUrl | PostsError::MissingId => ErrorKind::MissingIdentifier,
            PostsError::PostNotFound | PostsError::TypeNotFound | PostsError::TypeNotPublic => {
                ErrorKind::NotFound
            }
            PostsError::NotPublished => ErrorKind::NotPublished,
            PostsError::Forbidden => ErrorKind::Forbidden,
            PostsError::NoAutosave => ErrorKind::NoAutosave,
            PostsError::NoMatches => ErrorKind::NoMatches,
            PostsError::MissingType => ErrorKind::MissingType,
            PostsError::Storage(_) => ErrorKind::Internal,
        }
    }
}
