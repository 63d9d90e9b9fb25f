//! Integration tests for CLI command routing

use super::test_utils::with_isolated_env;
use serde_json::{json, Value};
use tempfile::TempDir;
use xo::cli::{Commands, OptionCommands, RunContext};

const CONFIG: &str = r#"
[storage]
store_path = "store"

[settings.overrides]
posts_per_page = 2

[[post_types]]
name = "article"
label = "Articles"
public = true

[actor]
id = 7
capabilities = ["edit_others_pages"]
"#;

const ITEMS: &str = r#"[
    {"id": 1, "post_type": "article", "status": "publish", "slug": "intro", "title": "Intro", "date": "2024-01-01T00:00:00Z"},
    {"id": 2, "post_type": "article", "status": "publish", "slug": "second", "title": "Second", "date": "2024-02-01T00:00:00Z"},
    {"id": 3, "post_type": "article", "status": "publish", "slug": "third", "title": "Third", "date": "2024-03-01T00:00:00Z"},
    {"id": 4, "post_type": "article", "status": "draft", "slug": "next", "title": "Next"}
]"#;

fn setup(test_dir: &TempDir) -> RunContext {
    let config_file = test_dir.path().join("xo.toml");
    std::fs::write(&config_file, CONFIG).unwrap();
    let items = test_dir.path().join("items.json");
    std::fs::write(&items, ITEMS).unwrap();

    let context = RunContext::new(test_dir.path().to_path_buf(), Some(config_file)).unwrap();
    context
        .execute(&Commands::Import { file: items })
        .unwrap();
    context
}

fn run(context: &RunContext, command: Commands) -> Value {
    serde_json::from_str(&context.execute(&command).unwrap()).unwrap()
}

fn filter(include: Vec<String>) -> Commands {
    Commands::Filter {
        search: None,
        post_type: vec!["article".to_string()],
        current_page: None,
        posts_per_page: None,
        order: None,
        orderby: None,
        include,
        exclude: Vec::new(),
        name: None,
        tax_query: None,
        meta_query: None,
    }
}

#[test]
fn test_filter_uses_override_page_size() {
    let test_dir = TempDir::new().unwrap();
    with_isolated_env(&test_dir, || {
        let context = setup(&test_dir);
        let response = run(&context, filter(vec!["intro".to_string()]));
        assert_eq!(response["success"], json!(true));
        assert_eq!(response["count"], json!(2));
        assert_eq!(response["total"], json!(3));
        assert_eq!(response["results"][0]["slug"], json!("intro"));
        assert_eq!(response["results"][1]["slug"], json!("third"));
    });
}

#[test]
fn test_preview_uses_configured_actor() {
    let test_dir = TempDir::new().unwrap();
    with_isolated_env(&test_dir, || {
        let context = setup(&test_dir);
        let response = run(&context, Commands::Preview { id: Some(4) });
        assert_eq!(response["success"], json!(true));
        assert_eq!(response["post"]["slug"], json!("next"));

        let get = run(&context, Commands::Get { id: Some(4), url: None });
        assert_eq!(get["success"], json!(false));
        assert_eq!(get["error"], json!("not_published"));
    });
}

#[test]
fn test_type_and_settings_commands() {
    let test_dir = TempDir::new().unwrap();
    with_isolated_env(&test_dir, || {
        let context = setup(&test_dir);
        let article = run(&context, Commands::Type {
            name: Some("article".to_string()),
        });
        assert_eq!(article["config"]["label"], json!("Articles"));

        let hidden = run(&context, Commands::Type {
            name: Some("revision".to_string()),
        });
        assert_eq!(hidden["error"], json!("not_found"));

        let tab = run(&context, Commands::Settings {
            format: "json".to_string(),
        });
        let options: Vec<&str> = tab["sections"][0]["fields"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|f| f["option"].as_str())
            .collect();
        assert!(options.contains(&"xo_article_page_id"));
        assert!(!options.contains(&"xo_page_page_id"));

        let text = context
            .execute(&Commands::Settings {
                format: "text".to_string(),
            })
            .unwrap();
        assert!(text.contains("Post Templates"));
    });
}

#[test]
fn test_option_commands() {
    let test_dir = TempDir::new().unwrap();
    with_isolated_env(&test_dir, || {
        let context = setup(&test_dir);

        let states = run(&context, Commands::Option {
            command: OptionCommands::States {
                key: "posts_per_page".to_string(),
            },
        });
        assert_eq!(states, json!(["override"]));

        let changed = run(&context, Commands::Option {
            command: OptionCommands::SetDefaults,
        });
        assert_eq!(changed["changed"], json!(true));

        let listed = context
            .execute(&Commands::Option {
                command: OptionCommands::List {
                    format: "text".to_string(),
                },
            })
            .unwrap();
        assert!(listed.contains("xo_api_endpoint"));
        assert!(listed.contains("stored"));
    });
}
