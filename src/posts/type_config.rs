use super::PostsController;
use crate::error::PostsError;
use crate::types::PostTypeConfig;

impl PostsController {
    pub(super) fn type_config(&self, post_type: Option<&str>) -> Result<PostTypeConfig, PostsError> {
        let post_type = post_type
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(PostsError::MissingType)?;

        let config = self.types.get(post_type).ok_or(PostsError::TypeNotFound)?;
        if !config.public {
            return Err(PostsError::TypeNotPublic);
        }
        Ok(config)
    }
}
