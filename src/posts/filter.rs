//! Filter: include/exclude resolution, keyword search aggregation, paging.

use super::{FilterPage, FilterRequest, PostsController, DEFAULT_POST_TYPE};
use crate::error::PostsError;
use crate::options::{DEFAULT_POSTS_PER_PAGE, POSTS_PER_PAGE};
use crate::query::{Order, OrderBy, PostQuery};
use crate::types::{PostId, PostStatus};
use std::collections::HashSet;
use tracing::debug;

/// Orderby value that is never forwarded to the repository
const WEIGHT_ORDERBY: &str = "weight";

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

impl PostsController {
    pub(super) fn filter_posts(&self, request: &FilterRequest) -> Result<FilterPage, PostsError> {
        let search = non_empty(request.search.as_deref());

        let post_types: Vec<String> = if !request.post_type.is_empty() {
            request.post_type.clone()
        } else if search.is_some() {
            self.types.public_types()
        } else {
            vec![DEFAULT_POST_TYPE.to_string()]
        };

        let current_page = request.current_page.filter(|p| *p > 0).unwrap_or(1);
        let per_page = match request.posts_per_page.filter(|p| *p != 0) {
            Some(per_page) => per_page,
            None => self
                .options
                .get_int(POSTS_PER_PAGE, DEFAULT_POSTS_PER_PAGE)?,
        };
        // Non-positive page sizes return everything
        let (limit, offset) = if per_page > 0 {
            let offset = (current_page - 1).saturating_mul(per_page as u64);
            (
                Some(usize::try_from(per_page).unwrap_or(usize::MAX)),
                usize::try_from(offset).unwrap_or(usize::MAX),
            )
        } else {
            (None, 0)
        };

        let order = non_empty(request.order.as_deref())
            .map(Order::parse)
            .unwrap_or_default();
        let order_by = match non_empty(request.orderby.as_deref()) {
            Some(WEIGHT_ORDERBY) | None => None,
            Some(value) => OrderBy::parse(value),
        };

        let mut base = PostQuery {
            statuses: vec![PostStatus::Publish],
            post_types: post_types.clone(),
            order_by,
            order,
            ..Default::default()
        };

        // Included posts lead the collection
        let mut post_ids: Vec<PostId> = Vec::new();
        if !request.include.is_empty() {
            post_ids = self.repo.query(&PostQuery {
                name_in: request.include.clone(),
                ..base.clone()
            })?;
        }

        let mut exclude_ids: HashSet<PostId> = post_ids.iter().copied().collect();
        if !request.exclude.is_empty() {
            exclude_ids.extend(self.repo.query(&PostQuery {
                name_in: request.exclude.clone(),
                ..base.clone()
            })?);
        }

        base.name = non_empty(request.name.as_deref()).map(str::to_string);
        base.tax_query = request.tax_query.clone().filter(|q| !q.is_empty());
        base.meta_query = request.meta_query.clone().filter(|q| !q.is_empty());

        match search {
            Some(search) => {
                let keywords: Vec<&str> = search.split_whitespace().collect();
                // Later keywords are queried first and so rank first
                for keyword in keywords.iter().rev() {
                    let not_in = exclude_ids.iter().chain(post_ids.iter()).copied().collect();
                    let matched = self.repo.query(&PostQuery {
                        search: Some(keyword.to_string()),
                        not_in,
                        ..base.clone()
                    })?;
                    debug!(keyword, matched = matched.len(), "Keyword query");
                    post_ids.extend(matched);
                }
            }
            None => {
                let not_in = exclude_ids.iter().chain(post_ids.iter()).copied().collect();
                let matched = self.repo.query(&PostQuery { not_in, ..base })?;
                post_ids.extend(matched);
            }
        }

        if post_ids.is_empty() {
            return Err(PostsError::NoMatches);
        }

        let results = self.repo.get_many(&post_ids, &post_types, limit, offset)?;

        // Total counts every published item of the types, ignoring the query
        let mut total = 0;
        for post_type in &post_types {
            total += self.repo.count_published(post_type)?;
        }

        debug!(
            matched = post_ids.len(),
            returned = results.len(),
            total,
            "Filter completed"
        );
        Ok(FilterPage { results, total })
    }
}
