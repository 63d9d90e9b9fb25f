//! Post lookup by id or URL, and draft/preview resolution.

use super::{GetRequest, PostsController};
use crate::auth::{CapabilityChecker, EDIT_OTHERS_PAGES};
use crate::error::PostsError;
use crate::options::PAGE_ON_FRONT;
use crate::types::{ContentItem, PostId};
use tracing::debug;

impl PostsController {
    pub(super) fn resolve_published(
        &self,
        request: &GetRequest,
    ) -> Result<ContentItem, PostsError> {
        let url = request.url.as_deref().map(str::trim).filter(|u| !u.is_empty());
        let post_id = request.post_id.filter(|id| *id != 0);

        let post = match (url, post_id) {
            (None, None) => return Err(PostsError::MissingIdOrUrl),
            (Some(url), _) => self.resolve_url(url)?,
            (None, Some(id)) => self.repo.get(id)?,
        };

        let post = post.ok_or(PostsError::PostNotFound)?;
        if !post.is_published() {
            return Err(PostsError::NotPublished);
        }
        Ok(post)
    }

    /// Front page, then path index, then hierarchical page path.
    fn resolve_url(&self, url: &str) -> Result<Option<ContentItem>, PostsError> {
        let mut post_id: PostId = 0;

        if url == "/" {
            post_id = self.options.get_int(PAGE_ON_FRONT, 0)?.max(0) as PostId;
            debug!(post_id, "Resolving front page");
        }

        if post_id == 0 {
            post_id = self.repo.url_to_post_id(url)?.unwrap_or(0);
        }

        let mut post = None;
        if post_id != 0 {
            post = self.repo.get(post_id)?;
        }

        if post.is_none() {
            debug!(url, "Falling back to page path lookup");
            post = self.repo.get_by_path(url)?;
        }

        Ok(post)
    }

    pub(super) fn resolve_preview(
        &self,
        actor: &dyn CapabilityChecker,
        post_id: Option<PostId>,
    ) -> Result<ContentItem, PostsError> {
        if !actor.current_user_can(EDIT_OTHERS_PAGES) {
            return Err(PostsError::Forbidden);
        }

        let post_id = post_id.filter(|id| *id != 0).ok_or(PostsError::MissingId)?;
        let post = self.repo.get(post_id)?.ok_or(PostsError::PostNotFound)?;

        if !post.is_published() {
            return Ok(post);
        }

        self.repo
            .latest_autosave(post_id, actor.current_user_id())?
            .ok_or(PostsError::NoAutosave)
    }
}
