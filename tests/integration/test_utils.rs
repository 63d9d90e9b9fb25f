//! Shared test utilities for integration tests
//!
//! Builds a controller over a throwaway sled database and serializes access to
//! process environment variables.

use chrono::{Duration, TimeZone, Utc};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use xo::hooks::HookRegistry;
use xo::options::{Options, Overrides};
use xo::post_types::StaticPostTypeRegistry;
use xo::posts::PostsController;
use xo::store::{PostRepository, SledPostRepository, SledSettingsStore};
use xo::types::{ContentItem, PostId};

/// Global mutex to serialize environment variable access across all tests
static ENV_MUTEX: Mutex<()> = Mutex::new(());

const ENV_KEYS: &[&str] = &[
    "HOME",
    "XDG_CONFIG_HOME",
    "XDG_DATA_HOME",
    "XO_ENV",
    "XO_SETTINGS",
    "XO__STORAGE__STORE_PATH",
];

/// Environment variable state to restore after test
struct EnvState {
    values: Vec<(&'static str, Option<String>)>,
}

impl EnvState {
    fn capture() -> Self {
        Self {
            values: ENV_KEYS
                .iter()
                .map(|key| (*key, std::env::var(key).ok()))
                .collect(),
        }
    }

    fn restore(self) {
        for (key, value) in self.values {
            match value {
                Some(orig) => std::env::set_var(key, orig),
                None => std::env::remove_var(key),
            }
        }
    }
}

/// Run `f` with HOME and XDG directories pointed into `test_dir` and the
/// xo variables cleared; the original environment is restored afterwards.
pub fn with_isolated_env<F, R>(test_dir: &TempDir, f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let env_state = EnvState::capture();

    let config_home = test_dir.path().join("xdg-config");
    let data_home = test_dir.path().join("xdg-data");
    let home = test_dir.path().join("home");
    for dir in [&config_home, &data_home, &home] {
        std::fs::create_dir_all(dir).unwrap();
    }

    std::env::set_var("HOME", &home);
    std::env::set_var("XDG_CONFIG_HOME", &config_home);
    std::env::set_var("XDG_DATA_HOME", &data_home);
    std::env::remove_var("XO_ENV");
    std::env::remove_var("XO_SETTINGS");
    std::env::remove_var("XO__STORAGE__STORE_PATH");

    let result = f();

    env_state.restore();

    result
}

/// Controller wired to sled-backed stores in a temp directory
pub struct Fixture {
    _dir: TempDir,
    pub repo: Arc<SledPostRepository>,
    pub options: Arc<Options>,
    pub controller: PostsController,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with(Overrides::empty(), StaticPostTypeRegistry::default())
    }

    pub fn with(overrides: Overrides, types: StaticPostTypeRegistry) -> Self {
        let dir = TempDir::new().unwrap();
        let db = sled::open(dir.path().join("store")).unwrap();
        let repo = Arc::new(SledPostRepository::from_db(db.clone()));
        let settings = Arc::new(SledSettingsStore::from_db(&db).unwrap());
        let options = Arc::new(Options::new(
            settings,
            Arc::new(overrides),
            Arc::new(HookRegistry::new()),
        ));
        let controller = PostsController::new(repo.clone(), Arc::new(types), options.clone());
        Self {
            _dir: dir,
            repo,
            options,
            controller,
        }
    }

    pub fn put(&self, item: ContentItem) {
        self.repo.put(&item).unwrap();
    }
}

/// Published item whose date is `age_days` before a fixed instant
pub fn item(id: PostId, post_type: &str, slug: &str, age_days: i64) -> ContentItem {
    let mut item = ContentItem::new(id, post_type, slug);
    let base = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
    item.date = base - Duration::days(age_days);
    item.modified = item.date;
    item
}

pub fn titled(mut item: ContentItem, title: &str) -> ContentItem {
    item.title = title.to_string();
    item
}

pub fn ids(items: &[ContentItem]) -> Vec<PostId> {
    items.iter().map(|i| i.id).collect()
}
