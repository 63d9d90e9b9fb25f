//! Request shapes for the posts controller.

use crate::query::{MetaQuery, TaxQuery};
use crate::types::PostId;
use serde::{Deserialize, Deserializer, Serialize};

/// `Get` request: a post id or a relative URL
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetRequest {
    #[serde(default)]
    pub post_id: Option<PostId>,
    #[serde(default)]
    pub url: Option<String>,
}

impl GetRequest {
    pub fn by_id(post_id: PostId) -> Self {
        Self {
            post_id: Some(post_id),
            url: None,
        }
    }

    pub fn by_url(url: impl Into<String>) -> Self {
        Self {
            post_id: None,
            url: Some(url.into()),
        }
    }
}

/// `Filter` request; every field is optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterRequest {
    #[serde(default)]
    pub search: Option<String>,
    /// A single type tag or a list of them
    #[serde(default, deserialize_with = "one_or_many")]
    pub post_type: Vec<String>,
    #[serde(default)]
    pub current_page: Option<u64>,
    #[serde(default)]
    pub posts_per_page: Option<i64>,
    #[serde(default)]
    pub order: Option<String>,
    #[serde(default)]
    pub orderby: Option<String>,
    /// Slugs placed at the front of the result set
    #[serde(default, deserialize_with = "one_or_many")]
    pub include: Vec<String>,
    /// Slugs removed from the result set
    #[serde(default, deserialize_with = "one_or_many")]
    pub exclude: Vec<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub tax_query: Option<TaxQuery>,
    #[serde(default)]
    pub meta_query: Option<MetaQuery>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        Some(OneOrMany::One(value)) => vec![value],
        Some(OneOrMany::Many(values)) => values,
        None => Vec::new(),
    }
    .into_iter()
    .filter(|v| !v.trim().is_empty())
    .collect())
}
