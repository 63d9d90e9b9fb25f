//! Integration tests for Filter

use super::test_utils::{ids, item, titled, Fixture};
use proptest::prelude::*;
use serde_json::json;
use std::collections::HashSet;
use xo::error::ErrorKind;
use xo::options::{Overrides, POSTS_PER_PAGE};
use xo::post_types::StaticPostTypeRegistry;
use xo::posts::FilterRequest;
use xo::query::{MetaClause, MetaCompare, MetaQuery, TaxClause, TaxOperator, TaxQuery};
use xo::types::{PostStatus, PostTypeConfig};

fn article_registry() -> StaticPostTypeRegistry {
    StaticPostTypeRegistry::with_types([PostTypeConfig::new("article", "Articles", true)])
}

fn request() -> FilterRequest {
    FilterRequest {
        posts_per_page: Some(-1),
        ..Default::default()
    }
}

#[test]
fn test_included_slugs_lead_results() {
    let fixture = Fixture::with(Overrides::empty(), article_registry());
    fixture.put(item(1, "article", "intro", 30));
    fixture.put(item(2, "article", "a", 2));
    fixture.put(item(3, "article", "b", 1));

    let response = fixture.controller.filter(&FilterRequest {
        post_type: vec!["article".to_string()],
        include: vec!["intro".to_string()],
        ..request()
    });

    assert!(response.success);
    assert_eq!(response.message, "Successfully located posts.");
    let results = response.results.unwrap();
    assert_eq!(ids(&results), vec![1, 3, 2]);
}

#[test]
fn test_keyword_matches_are_unioned_without_duplicates() {
    let fixture = Fixture::new();
    fixture.put(titled(item(1, "post", "f1", 1), "foo one"));
    fixture.put(titled(item(2, "post", "f2", 2), "foo two"));
    fixture.put(titled(item(3, "post", "b1", 3), "bar one"));
    fixture.put(titled(item(4, "post", "b2", 4), "bar two"));
    fixture.put(titled(item(5, "post", "fb", 5), "foo and bar"));
    fixture.put(titled(item(6, "post", "other", 6), "nothing here"));

    let response = fixture.controller.filter(&FilterRequest {
        search: Some("foo bar".to_string()),
        post_type: vec!["post".to_string()],
        ..request()
    });

    let results = response.results.unwrap();
    // Later keywords are queried first
    assert_eq!(ids(&results), vec![3, 4, 5, 1, 2]);
    assert_eq!(response.count, Some(5));
    let unique: HashSet<_> = ids(&results).into_iter().collect();
    assert_eq!(unique.len(), results.len());
}

#[test]
fn test_total_counts_every_published_item_of_the_types() {
    let fixture = Fixture::new();
    let items: Vec<_> = (1..=50)
        .map(|id| {
            let title = if id % 17 == 0 || id == 1 { "needle" } else { "hay" };
            titled(item(id, "post", &format!("p{}", id), id as i64), title)
        })
        .collect();
    fixture.repo.put_batch(&items).unwrap();
    let mut draft = titled(item(51, "post", "draft", 0), "needle");
    draft.status = PostStatus::Draft;
    fixture.put(draft);

    let response = fixture.controller.filter(&FilterRequest {
        search: Some("needle".to_string()),
        post_type: vec!["post".to_string()],
        ..request()
    });

    assert_eq!(response.count, Some(3));
    assert_eq!(response.total, Some(50));
}

#[test]
fn test_no_matches_is_a_failure() {
    let fixture = Fixture::new();
    fixture.put(titled(item(1, "post", "a", 1), "alpha"));

    let response = fixture.controller.filter(&FilterRequest {
        search: Some("omega".to_string()),
        ..request()
    });
    assert!(!response.success);
    assert_eq!(response.error, Some(ErrorKind::NoMatches));
    assert_eq!(response.message, "Unable to locate posts.");
    assert!(response.results.is_none());
    assert!(response.total.is_none());

    let empty = Fixture::new().controller.filter(&FilterRequest::default());
    assert_eq!(empty.error, Some(ErrorKind::NoMatches));
}

#[test]
fn test_default_type_and_search_type_selection() {
    let fixture = Fixture::new();
    fixture.put(titled(item(1, "post", "a", 1), "shared word"));
    fixture.put(titled(item(2, "page", "b", 2), "shared word"));
    fixture.put(titled(item(3, "nav_menu_item", "c", 3), "shared word"));

    let listing = fixture.controller.filter(&request());
    assert_eq!(ids(&listing.results.unwrap()), vec![1]);
    assert_eq!(listing.total, Some(1));

    let search = fixture.controller.filter(&FilterRequest {
        search: Some("shared".to_string()),
        ..request()
    });
    assert_eq!(ids(&search.results.unwrap()), vec![1, 2]);
    // post + page + attachment
    assert_eq!(search.total, Some(2));
}

#[test]
fn test_excluded_slugs_are_removed() {
    let fixture = Fixture::new();
    fixture.put(item(1, "post", "keep", 1));
    fixture.put(item(2, "post", "drop", 2));
    fixture.put(item(3, "post", "also-keep", 3));

    let response = fixture.controller.filter(&FilterRequest {
        exclude: vec!["drop".to_string()],
        ..request()
    });
    assert_eq!(ids(&response.results.unwrap()), vec![1, 3]);
}

#[test]
fn test_paging_uses_option_fallback() {
    let fixture = Fixture::new();
    for id in 1..=7 {
        fixture.put(item(id, "post", &format!("p{}", id), id as i64));
    }
    fixture
        .options
        .set_option(POSTS_PER_PAGE, json!(3))
        .unwrap();

    let first = fixture.controller.filter(&FilterRequest::default());
    assert_eq!(ids(&first.results.unwrap()), vec![1, 2, 3]);
    assert_eq!(first.total, Some(7));

    let third = fixture.controller.filter(&FilterRequest {
        current_page: Some(3),
        ..Default::default()
    });
    assert_eq!(ids(&third.results.unwrap()), vec![7]);

    let explicit = fixture.controller.filter(&FilterRequest {
        current_page: Some(2),
        posts_per_page: Some(2),
        ..Default::default()
    });
    assert_eq!(ids(&explicit.results.unwrap()), vec![3, 4]);
}

#[test]
fn test_page_far_beyond_the_end_is_empty() {
    let fixture = Fixture::new();
    fixture.put(item(1, "post", "only", 1));

    let response = fixture.controller.filter(&FilterRequest {
        current_page: Some(u64::MAX / 2),
        posts_per_page: Some(10),
        ..Default::default()
    });
    assert!(response.success);
    assert_eq!(response.count, Some(0));
    assert_eq!(response.results.map(|r| r.len()), Some(0));
    assert_eq!(response.total, Some(1));

    fixture
        .options
        .set_option(POSTS_PER_PAGE, json!(i64::MAX))
        .unwrap();
    let huge_stored = fixture.controller.filter(&FilterRequest {
        current_page: Some(2),
        ..Default::default()
    });
    assert_eq!(huge_stored.count, Some(0));
}

#[test]
fn test_override_page_size_wins_over_stored() {
    let overrides = Overrides::from_settings(&json!({"overrides": {"posts_per_page": 2}}));
    let fixture = Fixture::with(overrides, StaticPostTypeRegistry::default());
    for id in 1..=5 {
        fixture.put(item(id, "post", &format!("p{}", id), id as i64));
    }
    fixture
        .options
        .set_option(POSTS_PER_PAGE, json!(4))
        .unwrap();

    let response = fixture.controller.filter(&FilterRequest::default());
    assert_eq!(response.count, Some(2));
}

#[test]
fn test_order_and_orderby() {
    let fixture = Fixture::new();
    fixture.put(titled(item(1, "post", "a", 1), "Charlie"));
    fixture.put(titled(item(2, "post", "b", 2), "Alpha"));
    fixture.put(titled(item(3, "post", "c", 3), "Bravo"));

    let by_title = fixture.controller.filter(&FilterRequest {
        orderby: Some("title".to_string()),
        order: Some("ASC".to_string()),
        ..request()
    });
    assert_eq!(ids(&by_title.results.unwrap()), vec![2, 3, 1]);

    let oldest_first = fixture.controller.filter(&FilterRequest {
        order: Some("asc".to_string()),
        ..request()
    });
    assert_eq!(ids(&oldest_first.results.unwrap()), vec![3, 2, 1]);

    // weight is not forwarded, so date ordering applies
    let weight = fixture.controller.filter(&FilterRequest {
        orderby: Some("weight".to_string()),
        ..request()
    });
    assert_eq!(ids(&weight.results.unwrap()), vec![1, 2, 3]);
}

#[test]
fn test_name_tax_and_meta_predicates() {
    let fixture = Fixture::new();
    let mut rust = item(1, "post", "rust-news", 1);
    rust.terms.insert("category".to_string(), vec!["rust".to_string()]);
    rust.meta.insert("rating".to_string(), "9".to_string());
    let mut go = item(2, "post", "go-news", 2);
    go.terms.insert("category".to_string(), vec!["go".to_string()]);
    go.meta.insert("rating".to_string(), "4".to_string());
    fixture.put(rust);
    fixture.put(go);

    let by_name = fixture.controller.filter(&FilterRequest {
        name: Some("go-news".to_string()),
        ..request()
    });
    assert_eq!(ids(&by_name.results.unwrap()), vec![2]);

    let by_term = fixture.controller.filter(&FilterRequest {
        tax_query: Some(TaxQuery {
            clauses: vec![TaxClause {
                taxonomy: "category".to_string(),
                terms: vec!["rust".to_string()],
                operator: TaxOperator::In,
            }],
            ..Default::default()
        }),
        ..request()
    });
    assert_eq!(ids(&by_term.results.unwrap()), vec![1]);

    let by_meta = fixture.controller.filter(&FilterRequest {
        meta_query: Some(MetaQuery {
            clauses: vec![MetaClause {
                key: "rating".to_string(),
                value: Some("5".to_string()),
                values: Vec::new(),
                compare: MetaCompare::Lt,
            }],
            ..Default::default()
        }),
        ..request()
    });
    assert_eq!(ids(&by_meta.results.unwrap()), vec![2]);
}

#[test]
fn test_filter_request_from_json() {
    let fixture = Fixture::with(Overrides::empty(), article_registry());
    fixture.put(item(1, "article", "intro", 9));
    fixture.put(item(2, "article", "a", 1));

    let request: FilterRequest = serde_json::from_value(json!({
        "postType": "article",
        "include": "intro",
        "postsPerPage": 10,
        "currentPage": 1
    }))
    .unwrap();
    let response = fixture.controller.filter(&request);
    assert_eq!(ids(&response.results.unwrap()), vec![1, 2]);
}

fn corpus() -> impl Strategy<Value = Vec<(String, bool)>> {
    let words = prop::sample::select(vec!["alpha", "beta", "gamma", "delta"]);
    prop::collection::vec((words.prop_map(str::to_string), any::<bool>()), 1..25)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_filter_pages_are_bounded_and_unique(
        docs in corpus(),
        search in prop::option::of(prop::sample::select(vec!["alpha", "beta gamma", "delta alpha"])),
        per_page in 1i64..8,
        page in 1u64..5,
    ) {
        let fixture = Fixture::new();
        for (idx, (title, published)) in docs.iter().enumerate() {
            let id = idx as u64 + 1;
            let mut post = titled(item(id, "post", &format!("p{}", id), idx as i64), title);
            if !published {
                post.status = PostStatus::Draft;
            }
            fixture.put(post);
        }

        let response = fixture.controller.filter(&FilterRequest {
            search: search.map(str::to_string),
            post_type: vec!["post".to_string()],
            current_page: Some(page),
            posts_per_page: Some(per_page),
            ..Default::default()
        });

        if response.success {
            let results = response.results.unwrap();
            let count = response.count.unwrap();
            let total = response.total.unwrap();
            prop_assert_eq!(count, results.len());
            prop_assert!(count as i64 <= per_page);
            prop_assert!(count as u64 <= total);
            prop_assert!(results.iter().all(|r| r.status == PostStatus::Publish));
            let unique: HashSet<_> = ids(&results).into_iter().collect();
            prop_assert_eq!(unique.len(), results.len());
        } else {
            prop_assert_eq!(response.error, Some(ErrorKind::NoMatches));
        }
    }
}
