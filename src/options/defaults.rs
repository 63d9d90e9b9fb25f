//! Compiled-in option defaults.

use serde_json::{json, Map, Value};

/// Host option: number of items per listing page
pub const POSTS_PER_PAGE: &str = "posts_per_page";
/// Host option: id of the page served at `/` (0 when unset)
pub const PAGE_ON_FRONT: &str = "page_on_front";

pub const DEFAULT_POSTS_PER_PAGE: i64 = 10;

pub const INDEX_SRC: &str = "xo_index_src";
pub const INDEX_DIST: &str = "xo_index_dist";
pub const TEMPLATES_PATH: &str = "xo_templates_path";

/// Default settings in display order.
pub fn default_settings() -> Map<String, Value> {
    let entries = [
        // Index
        (INDEX_SRC, json!("/src/index.html")),
        (INDEX_DIST, json!("/dist/index.html")),
        ("xo_index_redirect_mode", json!("default")),
        ("xo_index_live_header", json!(false)),
        ("xo_index_live_footer", json!(false)),
        ("xo_index_live_config", json!(true)),
        // Api
        ("xo_api_enabled", json!(true)),
        ("xo_api_endpoint", json!("/xo-api")),
        ("xo_api_access_control_mode", json!("default")),
        ("xo_access_control_allowed_hosts", json!("localhost:4200")),
        // Routing
        ("xo_routing_previews_enabled", json!(true)),
        // Templates
        ("xo_templates_reader_enabled", json!(true)),
        ("xo_templates_cache_enabled", json!(true)),
        ("xo_templates_cache", json!([])),
        (TEMPLATES_PATH, json!("/src/app")),
        // ACF
        ("xo_acf_allowed_groups", json!([])),
    ];
    entries
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}

/// Recursively overlay `overlay` onto `base`; non-object values replace.
pub fn deep_merge(base: &mut Map<String, Value>, overlay: Map<String, Value>) {
    for (key, value) in overlay {
        if let Value::Object(incoming) = value {
            if let Some(Value::Object(existing)) = base.get_mut(&key) {
                deep_merge(existing, incoming);
                continue;
            }
            base.insert(key, Value::Object(incoming));
        } else {
            base.insert(key, value);
        }
    }
}
