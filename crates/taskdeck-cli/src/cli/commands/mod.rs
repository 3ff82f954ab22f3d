//! CLI command handlers.

pub mod app;
pub mod config;
