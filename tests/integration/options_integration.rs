//! Integration tests for the options facade

use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;
use xo::hooks::HookRegistry;
use xo::options::defaults::{INDEX_DIST, INDEX_SRC, TEMPLATES_PATH};
use xo::options::{Options, Overrides};
use xo::store::{SettingsStore, SledSettingsStore};
use xo::types::SettingSource;

fn options_with(temp_dir: &TempDir, overrides: Overrides) -> (Arc<SledSettingsStore>, Options) {
    let store = Arc::new(SledSettingsStore::new(temp_dir.path().join("options")).unwrap());
    let options = Options::new(
        store.clone(),
        Arc::new(overrides),
        Arc::new(HookRegistry::new()),
    );
    (store, options)
}

#[test]
fn test_override_beats_stored_and_default() {
    let temp_dir = TempDir::new().unwrap();
    let overrides = Overrides::from_settings_json(r#"{"overrides": {"items_per_page": 5}}"#);
    let (store, options) = options_with(&temp_dir, overrides);
    store.update_option("items_per_page", &json!(10)).unwrap();

    assert_eq!(options.get_option("items_per_page", json!(20)).unwrap(), json!(5));
    assert_eq!(options.get_states("items_per_page"), vec!["override"]);

    let setting = options.describe("items_per_page").unwrap();
    assert_eq!(setting.source, SettingSource::Override);
    assert_eq!(setting.value, json!(5));
}

#[test]
fn test_stored_then_default() {
    let temp_dir = TempDir::new().unwrap();
    let (_, options) = options_with(&temp_dir, Overrides::empty());

    assert_eq!(options.get_option("items_per_page", json!(20)).unwrap(), json!(20));
    assert!(options.set_option("items_per_page", json!(10)).unwrap());
    assert!(!options.set_option("items_per_page", json!(10)).unwrap());
    assert_eq!(options.get_option("items_per_page", json!(20)).unwrap(), json!(10));
    assert!(options.get_states("items_per_page").is_empty());
}

#[test]
fn test_set_defaults_never_overwrites_and_reset_always_does() {
    let temp_dir = TempDir::new().unwrap();
    let (store, options) = options_with(&temp_dir, Overrides::empty());
    store
        .update_option("xo_api_endpoint", &json!("/custom-api"))
        .unwrap();

    assert!(options.set_defaults().unwrap());
    assert_eq!(
        store.get_option("xo_api_endpoint").unwrap(),
        Some(json!("/custom-api"))
    );
    assert_eq!(store.get_option("xo_api_enabled").unwrap(), Some(json!(true)));
    assert!(!options.set_defaults().unwrap());

    assert!(options.reset_defaults().unwrap());
    assert_eq!(
        store.get_option("xo_api_endpoint").unwrap(),
        Some(json!("/xo-api"))
    );
}

#[test]
fn test_project_descriptor_feeds_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let descriptor = temp_dir.path().join("angular.json");
    std::fs::write(
        &descriptor,
        r#"{
            "projects": {
                "site": {
                    "sourceRoot": "web",
                    "prefix": "xo",
                    "architect": {
                        "build": { "options": { "index": "web/index.html", "outputPath": "build" } }
                    }
                }
            }
        }"#,
    )
    .unwrap();

    let (_, options) = options_with(&temp_dir, Overrides::empty());
    let options = options.with_project_descriptor(Some(descriptor));
    let defaults = options.get_defaults();

    assert_eq!(defaults.get(INDEX_SRC), Some(&json!("/web/index.html")));
    assert_eq!(defaults.get(INDEX_DIST), Some(&json!("/build/index.html")));
    assert_eq!(defaults.get(TEMPLATES_PATH), Some(&json!("/web/xo")));
    assert_eq!(defaults.get("xo_api_endpoint"), Some(&json!("/xo-api")));
}

#[test]
fn test_missing_descriptor_keeps_builtin_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let (_, options) = options_with(&temp_dir, Overrides::empty());
    let options = options.with_project_descriptor(Some(temp_dir.path().join("absent.json")));

    assert_eq!(
        options.get_defaults().get(INDEX_SRC),
        Some(&json!("/src/index.html"))
    );
}

#[test]
fn test_hooks_transform_reads_writes_and_states() {
    let temp_dir = TempDir::new().unwrap();
    let (store, options) = options_with(&temp_dir, Overrides::empty());
    let hooks = options.hooks();

    hooks.add_filter("xo/options/set/xo_api_endpoint", |value| match value {
        Value::String(s) => Value::String(format!("/{}", s.trim_matches('/'))),
        other => other,
    });
    hooks.add_filter("xo/options/get/xo_api_endpoint", |value| match value {
        Value::String(s) => Value::String(s.to_uppercase()),
        other => other,
    });
    hooks.add_filter("xo/options/states/xo_api_endpoint", |value| match value {
        Value::Array(mut states) => {
            states.push(json!("locked"));
            Value::Array(states)
        }
        other => other,
    });

    options.set_option("xo_api_endpoint", json!("api/")).unwrap();
    assert_eq!(store.get_option("xo_api_endpoint").unwrap(), Some(json!("/api")));
    assert_eq!(
        options.get_option("xo_api_endpoint", Value::Null).unwrap(),
        json!("/API")
    );
    assert_eq!(options.get_states("xo_api_endpoint"), vec!["locked"]);
}

#[test]
fn test_current_settings_resolve_every_default_key() {
    let temp_dir = TempDir::new().unwrap();
    let overrides = Overrides::from_settings(&json!({"overrides": {"xo_api_enabled": false}}));
    let (_, options) = options_with(&temp_dir, overrides);
    options
        .set_option("xo_routing_previews_enabled", json!(false))
        .unwrap();
    options.hooks().add_filter("xo/options/settings", |value| match value {
        Value::Object(mut map) => {
            map.insert("xo_version".to_string(), json!("1.1.0"));
            Value::Object(map)
        }
        other => other,
    });

    let settings = options.get_current_settings().unwrap();
    assert_eq!(settings.get("xo_api_enabled"), Some(&json!(false)));
    assert_eq!(settings.get("xo_routing_previews_enabled"), Some(&json!(false)));
    assert_eq!(settings.get("xo_templates_cache"), Some(&json!([])));
    assert_eq!(settings.get("xo_version"), Some(&json!("1.1.0")));
}
