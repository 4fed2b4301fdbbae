//! I/O adapters for the CLI and hosts.

pub mod config;
pub mod document;
pub mod render;
pub mod store;
pub mod template;
