//! Posts Controller
//!
//! Lookup, search and filtering of content items plus post type config
//! retrieval. Every operation folds its outcome into a response envelope;
//! failures are reported, never raised.

mod filter;
mod lookup;
pub mod request;
pub mod response;
mod type_config;

pub use request::{FilterRequest, GetRequest};
pub use response::{ConfigResponse, FilterPage, FilterResponse, PostResponse};

use crate::auth::CapabilityChecker;
use crate::error::PostsError;
use crate::options::Options;
use crate::post_types::PostTypeRegistry;
use crate::store::PostRepository;
use crate::types::PostId;
use std::sync::Arc;
use tracing::{debug, error};

/// Type used by `Filter` when neither a type nor a search is given
pub const DEFAULT_POST_TYPE: &str = "post";

/// Controller over the post repository, type registry and options facade
pub struct PostsController {
    repo: Arc<dyn PostRepository>,
    types: Arc<dyn PostTypeRegistry>,
    options: Arc<Options>,
}

impl PostsController {
    pub fn new(
        repo: Arc<dyn PostRepository>,
        types: Arc<dyn PostTypeRegistry>,
        options: Arc<Options>,
    ) -> Self {
        Self {
            repo,
            types,
            options,
        }
    }

    /// Get a published post by id or relative URL.
    pub fn get(&self, request: &GetRequest) -> PostResponse {
        let result = self.resolve_published(request);
        log_outcome("get", &result);
        result.into()
    }

    /// Get a draft, or the actor's latest autosave of a published post.
    pub fn get_draft_or_preview(
        &self,
        actor: &dyn CapabilityChecker,
        post_id: Option<PostId>,
    ) -> PostResponse {
        let result = self.resolve_preview(actor, post_id);
        log_outcome("get_draft_or_preview", &result);
        result.into()
    }

    /// Filter, search or list published posts.
    pub fn filter(&self, request: &FilterRequest) -> FilterResponse {
        let result = self.filter_posts(request);
        log_outcome("filter", &result);
        result.into()
    }

    /// Public configuration of a post type.
    pub fn config(&self, post_type: Option<&str>) -> ConfigResponse {
        let result = self.type_config(post_type);
        log_outcome("config", &result);
        result.into()
    }
}

fn log_outcome<T>(operation: &str, result: &Result<T, PostsError>) {
    match result {
        Ok(_) => debug!(operation, "Request succeeded"),
        Err(PostsError::Storage(e)) => error!(operation, error = %e, "Storage failure"),
        Err(e) => debug!(operation, kind = ?e.kind(), "Request failed"),
    }
}
