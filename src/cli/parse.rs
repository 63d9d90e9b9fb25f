//! CLI parse: clap types for xo. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// xo CLI - headless content API over a local content store
#[derive(Parser)]
#[command(name = "xo")]
#[command(about = "Headless content API: post lookup, filtering and site options")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, default_value = "false")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Get a published post by id or relative URL
    Get {
        /// Post id
        #[arg(long)]
        id: Option<u64>,
        /// Relative URL, e.g. /blog/hello-world
        #[arg(long)]
        url: Option<String>,
    },
    /// Get a draft, or the latest autosave of a published post
    Preview {
        /// Post id
        #[arg(long)]
        id: Option<u64>,
    },
    /// Filter, search or list published posts
    Filter {
        /// Space-separated keywords
        #[arg(long)]
        search: Option<String>,
        /// Post type(s); repeat or comma-separate
        #[arg(long = "post-type", value_delimiter = ',')]
        post_type: Vec<String>,
        /// 1-based page number
        #[arg(long = "page")]
        current_page: Option<u64>,
        /// Page size; zero or negative returns every match
        #[arg(long = "per-page", allow_negative_numbers = true)]
        posts_per_page: Option<i64>,
        /// asc or desc
        #[arg(long)]
        order: Option<String>,
        /// date, modified, title, name, id, menu_order
        #[arg(long)]
        orderby: Option<String>,
        /// Slugs placed first in the results
        #[arg(long, value_delimiter = ',')]
        include: Vec<String>,
        /// Slugs removed from the results
        #[arg(long, value_delimiter = ',')]
        exclude: Vec<String>,
        /// Exact slug
        #[arg(long)]
        name: Option<String>,
        /// Taxonomy query as JSON
        #[arg(long = "tax-query")]
        tax_query: Option<String>,
        /// Meta query as JSON
        #[arg(long = "meta-query")]
        meta_query: Option<String>,
    },
    /// Show the public configuration of a post type
    Type {
        /// Post type name
        name: Option<String>,
    },
    /// Site options
    Option {
        #[command(subcommand)]
        command: OptionCommands,
    },
    /// Import content items from a JSON file (one item or an array)
    Import {
        /// Path to the JSON file
        file: PathBuf,
    },
    /// Show the posts settings tab
    Settings {
        /// Output format (json or text)
        #[arg(long, default_value = "json")]
        format: String,
    },
}

#[derive(Subcommand)]
pub enum OptionCommands {
    /// Resolved value of an option with its source and states
    Get {
        /// Option key
        key: String,
    },
    /// Persist an option value (parsed as JSON, else taken as a string)
    Set {
        /// Option key
        key: String,
        /// New value
        value: String,
    },
    /// State tags of an option
    States {
        /// Option key
        key: String,
    },
    /// Default option values, including project-derived ones
    Defaults,
    /// Store defaults that are not yet present
    SetDefaults,
    /// Overwrite every default key with its default value
    Reset,
    /// Current value of every default key
    List {
        /// Output format (json or text)
        #[arg(long, default_value = "json")]
        format: String,
    },
}
