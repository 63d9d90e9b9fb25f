//! Integration tests for the xo content API

mod cli_commands;
mod options_integration;
mod posts_filter;
pub mod test_utils;
