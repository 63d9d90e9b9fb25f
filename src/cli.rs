//! CLI domain: parse, route, help, output, and presentation only.
//! No domain orchestration; single route table dispatches to the controller and options facade.

mod help;
mod output;
mod parse;
mod presentation;
mod route;

pub use help::command_name;
pub use output::{map_error, to_json};
pub use parse::{Cli, Commands, OptionCommands};
pub use presentation::{format_posts_tab_text, format_settings_table};
pub use route::RunContext;
