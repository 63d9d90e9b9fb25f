//! CLI presentation: text formatters for table output.

mod options;
mod settings;

pub use options::format_settings_table;
pub use settings::format_posts_tab_text;
