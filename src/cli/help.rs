//! CLI command-name contract used for log fields.

use crate::cli::parse::{Commands, OptionCommands};

/// Command name string for logs (e.g. "filter", "option.set").
pub fn command_name(command: &Commands) -> String {
    match command {
        Commands::Get { .. } => "get".to_string(),
        Commands::Preview { .. } => "preview".to_string(),
        Commands::Filter { .. } => "filter".to_string(),
        Commands::Type { .. } => "type".to_string(),
        Commands::Option { command } => format!("option.{}", option_command_name(command)),
        Commands::Import { .. } => "import".to_string(),
        Commands::Settings { .. } => "settings".to_string(),
    }
}

pub fn option_command_name(command: &OptionCommands) -> &'static str {
    match command {
        OptionCommands::Get { .. } => "get",
        OptionCommands::Set { .. } => "set",
        OptionCommands::States { .. } => "states",
        OptionCommands::Defaults => "defaults",
        OptionCommands::SetDefaults => "set_defaults",
        OptionCommands::Reset => "reset",
        OptionCommands::List { .. } => "list",
    }
}
