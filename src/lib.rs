//! xo: Headless Content API
//!
//! Post lookup, search and filtering over a content store, post type
//! configuration, and a layered site options facade with project-derived
//! defaults.

pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod hooks;
pub mod logging;
pub mod options;
pub mod post_types;
pub mod posts;
pub mod query;
pub mod settings;
pub mod store;
pub mod types;
