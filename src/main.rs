//! To-do List MCP Server - Main Entry Point
//!
//! This is the main entry point for the to-do MCP server application.
//! The actual implementation is in the `todo_mcp` library.

use anyhow::Result;
use clap::Parser;
use mcp_attr::server::serve_stdio;
use todo_mcp::{Config, TodoServerHandler};
use tracing_subscriber::EnvFilter;

/// Initialize logging to stderr
///
/// stdout carries the MCP protocol, so nothing else may be written there.
fn init_logging(level: &str) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(env_filter)
        .with_ansi(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();
    init_logging(&config.log_level);

    let handler = TodoServerHandler::from_config(&config);
    serve_stdio(handler).await?;

    tracing::info!("todo-mcp exiting");
    Ok(())
}
