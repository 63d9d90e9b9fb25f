//! Repository query parameters and their evaluation against content items.
//!
//! `PostQuery` is the contract between the posts controller and a
//! [`PostRepository`](crate::store::PostRepository): ids only, ordered.

use crate::types::{ContentItem, PostId, PostStatus};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Order {
    Asc,
    #[default]
    Desc,
}

impl Order {
    /// Parse a request value; anything other than `asc` sorts descending.
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("asc") {
            Order::Asc
        } else {
            Order::Desc
        }
    }
}

/// Fields a query may be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderBy {
    #[default]
    Date,
    Modified,
    Title,
    Name,
    Id,
    MenuOrder,
}

impl OrderBy {
    /// Map a request value to a field; unknown values yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "date" | "post_date" => Some(OrderBy::Date),
            "modified" | "post_modified" => Some(OrderBy::Modified),
            "title" | "post_title" => Some(OrderBy::Title),
            "name" | "post_name" | "slug" => Some(OrderBy::Name),
            "id" => Some(OrderBy::Id),
            "menu_order" => Some(OrderBy::MenuOrder),
            _ => None,
        }
    }
}

/// How clauses of a compound predicate combine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Relation {
    #[default]
    And,
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TaxOperator {
    #[default]
    #[serde(rename = "IN")]
    In,
    #[serde(rename = "NOT IN")]
    NotIn,
    #[serde(rename = "AND")]
    And,
    #[serde(rename = "EXISTS")]
    Exists,
    #[serde(rename = "NOT EXISTS")]
    NotExists,
}

/// Single taxonomy predicate: `{taxonomy, terms, operator}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxClause {
    pub taxonomy: String,
    #[serde(default)]
    pub terms: Vec<String>,
    #[serde(default)]
    pub operator: TaxOperator,
}

impl TaxClause {
    pub fn matches(&self, item: &ContentItem) -> bool {
        let assigned = item.terms.get(&self.taxonomy);
        let has = |term: &String| assigned.map(|t| t.contains(term)).unwrap_or(false);
        match self.operator {
            TaxOperator::In => self.terms.iter().any(has),
            TaxOperator::NotIn => !self.terms.iter().any(has),
            TaxOperator::And => self.terms.iter().all(has),
            TaxOperator::Exists => assigned.map(|t| !t.is_empty()).unwrap_or(false),
            TaxOperator::NotExists => assigned.map(|t| t.is_empty()).unwrap_or(true),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaxQuery {
    #[serde(default)]
    pub relation: Relation,
    #[serde(default)]
    pub clauses: Vec<TaxClause>,
}

impl TaxQuery {
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn matches(&self, item: &ContentItem) -> bool {
        combine(self.relation, self.clauses.iter().map(|c| c.matches(item)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MetaCompare {
    #[default]
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = "!=")]
    Ne,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    Ge,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    Le,
    #[serde(rename = "LIKE")]
    Like,
    #[serde(rename = "NOT LIKE")]
    NotLike,
    #[serde(rename = "IN")]
    In,
    #[serde(rename = "NOT IN")]
    NotIn,
    #[serde(rename = "EXISTS")]
    Exists,
    #[serde(rename = "NOT EXISTS")]
    NotExists,
}

/// Single meta predicate: `{key, value, compare}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetaClause {
    pub key: String,
    #[serde(default)]
    pub value: Option<String>,
    /// Candidate set for `IN` / `NOT IN`
    #[serde(default)]
    pub values: Vec<String>,
    #[serde(default)]
    pub compare: MetaCompare,
}

impl MetaClause {
    pub fn matches(&self, item: &ContentItem) -> bool {
        let Some(stored) = item.meta.get(&self.key) else {
            // Absent keys only satisfy the negative comparisons.
            return matches!(
                self.compare,
                MetaCompare::Ne | MetaCompare::NotLike | MetaCompare::NotIn | MetaCompare::NotExists
            );
        };
        let expected = self.value.as_deref().unwrap_or("");
        match self.compare {
            MetaCompare::Eq => compare_values(stored, expected) == Ordering::Equal,
            MetaCompare::Ne => compare_values(stored, expected) != Ordering::Equal,
            MetaCompare::Gt => compare_values(stored, expected) == Ordering::Greater,
            MetaCompare::Ge => compare_values(stored, expected) != Ordering::Less,
            MetaCompare::Lt => compare_values(stored, expected) == Ordering::Less,
            MetaCompare::Le => compare_values(stored, expected) != Ordering::Greater,
            MetaCompare::Like => contains_ci(stored, expected),
            MetaCompare::NotLike => !contains_ci(stored, expected),
            MetaCompare::In => self.candidates().any(|v| v == stored),
            MetaCompare::NotIn => !self.candidates().any(|v| v == stored),
            MetaCompare::Exists => true,
            MetaCompare::NotExists => false,
        }
    }

    fn candidates(&self) -> impl Iterator<Item = &String> {
        self.values.iter().chain(self.value.iter())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetaQuery {
    #[serde(default)]
    pub relation: Relation,
    #[serde(default)]
    pub clauses: Vec<MetaClause>,
}

impl MetaQuery {
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn matches(&self, item: &ContentItem) -> bool {
        combine(self.relation, self.clauses.iter().map(|c| c.matches(item)))
    }
}

fn combine(relation: Relation, mut results: impl Iterator<Item = bool>) -> bool {
    match relation {
        Relation::And => results.all(|r| r),
        Relation::Or => {
            let mut any_clause = false;
            for r in results {
                if r {
                    return true;
                }
                any_clause = true;
            }
            !any_clause
        }
    }
}

/// Numeric comparison when both sides parse as numbers, lexical otherwise.
fn compare_values(left: &str, right: &str) -> Ordering {
    match (left.trim().parse::<f64>(), right.trim().parse::<f64>()) {
        (Ok(l), Ok(r)) => l.partial_cmp(&r).unwrap_or(Ordering::Equal),
        _ => left.cmp(right),
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Parameters of a single repository query
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostQuery {
    /// Empty means any status
    pub statuses: Vec<PostStatus>,
    /// Empty means any type
    pub post_types: Vec<String>,
    pub name: Option<String>,
    pub name_in: Vec<String>,
    pub not_in: HashSet<PostId>,
    /// Single keyword matched against title, excerpt and content
    pub search: Option<String>,
    pub tax_query: Option<TaxQuery>,
    pub meta_query: Option<MetaQuery>,
    /// `None` falls back to date ordering
    pub order_by: Option<OrderBy>,
    pub order: Order,
}

impl PostQuery {
    /// Whether an item satisfies every predicate of this query.
    pub fn matches(&self, item: &ContentItem) -> bool {
        if !self.statuses.is_empty() && !self.statuses.contains(&item.status) {
            return false;
        }
        if !self.post_types.is_empty() && !self.post_types.iter().any(|t| *t == item.post_type) {
            return false;
        }
        if let Some(name) = &self.name {
            if item.slug != *name {
                return false;
            }
        }
        if !self.name_in.is_empty() && !self.name_in.iter().any(|n| *n == item.slug) {
            return false;
        }
        if self.not_in.contains(&item.id) {
            return false;
        }
        if let Some(keyword) = &self.search {
            if !(contains_ci(&item.title, keyword)
                || contains_ci(&item.excerpt, keyword)
                || contains_ci(&item.content, keyword))
            {
                return false;
            }
        }
        if let Some(tax) = &self.tax_query {
            if !tax.matches(item) {
                return false;
            }
        }
        if let Some(meta) = &self.meta_query {
            if !meta.matches(item) {
                return false;
            }
        }
        true
    }

    /// Sort items in place by this query's ordering; ties break on id.
    pub fn sort(&self, items: &mut [ContentItem]) {
        let order_by = self.order_by.unwrap_or_default();
        items.sort_by(|a, b| {
            let ord = match order_by {
                OrderBy::Date => a.date.cmp(&b.date),
                OrderBy::Modified => a.modified.cmp(&b.modified),
                OrderBy::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
                OrderBy::Name => a.slug.cmp(&b.slug),
                OrderBy::Id => a.id.cmp(&b.id),
                OrderBy::MenuOrder => a.menu_order.cmp(&b.menu_order),
            }
            .then_with(|| a.id.cmp(&b.id));
            match self.order {
                Order::Asc => ord,
                Order::Desc => ord.reverse(),
            }
        });
    }
}
