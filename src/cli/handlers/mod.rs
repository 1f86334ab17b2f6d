//! Command handlers for CLI operations
//!
//! This module contains handlers for different CLI commands,
//! separating command execution logic from parsing and validation.

pub mod projects;
pub mod serve;

pub use projects::ProjectsCommandHandler;
pub use serve::ServeCommandHandler;
