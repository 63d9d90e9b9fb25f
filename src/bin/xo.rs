//! xo CLI Binary
//!
//! Command-line interface for the xo headless content API.

use clap::Parser;
use std::process;
use tracing::{error, info};
use xo::cli::{map_error, Cli, RunContext};
use xo::config::ConfigLoader;
use xo::error::ApiError;
use xo::logging::{init_logging, LoggingConfig};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(Some(&build_logging_config(&cli))) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }
    info!(workspace = %cli.workspace.display(), "xo CLI starting");

    match run(&cli) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            error!(error = %e, "Command failed");
            eprintln!("{}", map_error(&e));
            process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> Result<String, ApiError> {
    let context = RunContext::new(cli.workspace.clone(), cli.config.clone())?;
    context.execute(&cli.command)
}

/// Build logging configuration from CLI args, environment, and config file.
/// Precedence: CLI flags override config file override defaults.
fn build_logging_config(cli: &Cli) -> LoggingConfig {
    let loaded = match cli.config {
        Some(ref config_path) => ConfigLoader::load_from_file(config_path),
        None => ConfigLoader::load(&cli.workspace),
    };
    let mut config = loaded.map(|c| c.logging).unwrap_or_default();

    if cli.quiet {
        config.enabled = false;
    }
    if cli.verbose {
        config.level = "debug".to_string();
        if config.output == "file" {
            config.output = "file+stderr".to_string();
        }
    }
    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        config.output = output.clone();
    }
    if let Some(ref file) = cli.log_file {
        config.file = Some(file.clone());
    }

    config
}
