//! Response envelopes: success flag, message and an optional payload.

use crate::error::{ErrorKind, PostsError};
use crate::types::{ContentItem, PostTypeConfig};
use serde::{Deserialize, Serialize};

/// Response of `Get` and `GetDraftOrPreview`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostResponse {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post: Option<ContentItem>,
}

impl PostResponse {
    pub fn found(post: ContentItem) -> Self {
        Self {
            success: true,
            message: "Successfully located post.".to_string(),
            error: None,
            post: Some(post),
        }
    }
}

impl From<Result<ContentItem, PostsError>> for PostResponse {
    fn from(result: Result<ContentItem, PostsError>) -> Self {
        match result {
            Ok(post) => Self::found(post),
            Err(e) => Self {
                success: false,
                message: e.to_string(),
                error: Some(e.kind()),
                post: None,
            },
        }
    }
}

/// Matched page of a `Filter` call
#[derive(Debug, Clone, PartialEq)]
pub struct FilterPage {
    pub results: Vec<ContentItem>,
    pub total: u64,
}

/// Response of `Filter`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterResponse {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<ContentItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    /// Published items of the selected types, ignoring search and predicates
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
}

impl From<Result<FilterPage, PostsError>> for FilterResponse {
    fn from(result: Result<FilterPage, PostsError>) -> Self {
        match result {
            Ok(page) => Self {
                success: true,
                message: "Successfully located posts.".to_string(),
                error: None,
                count: Some(page.results.len()),
                total: Some(page.total),
                results: Some(page.results),
            },
            Err(e) => Self {
                success: false,
                message: e.to_string(),
                error: Some(e.kind()),
                results: None,
                count: None,
                total: None,
            },
        }
    }
}

/// Response of `Config`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigResponse {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<PostTypeConfig>,
}

impl From<Result<PostTypeConfig, PostsError>> for ConfigResponse {
    fn from(result: Result<PostTypeConfig, PostsError>) -> Self {
        match result {
            Ok(config) => Self {
                success: true,
                message: "Successfully located post type config.".to_string(),
                error: None,
                config: Some(config),
            },
            Err(e) => Self {
                success: false,
                message: e.to_string(),
                error: Some(e.kind()),
                config: None,
            },
        }
    }
}
