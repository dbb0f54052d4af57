//! Command-line and environment configuration
//!
//! Priority (highest first): CLI arguments, environment variables, defaults.

use clap::Parser;
use std::path::PathBuf;

/// Data file used when none is given, relative to the working directory
pub const DEFAULT_FILE: &str = "tasks.toml";

/// To-do list MCP server - add, complete, reorder and sort tasks via Model Context Protocol
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Path to the task data file
    #[arg(env = "TODO_MCP_FILE", default_value = DEFAULT_FILE)]
    pub file: PathBuf,

    /// Commit every save when the data file is inside a git repository
    #[arg(long, env = "TODO_MCP_GIT_COMMIT")]
    pub git_commit: bool,

    /// Log filter for stderr output (RUST_LOG takes precedence)
    #[arg(long, env = "TODO_MCP_LOG", default_value = "info")]
    pub log_level: String,
}
