//! CLI command handlers.

pub mod articles;
pub mod auth;
pub mod config;
pub mod interactive;
