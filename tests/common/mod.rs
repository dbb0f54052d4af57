//! Common test utilities for integration tests
#![allow(dead_code)]

use tempfile::{NamedTempFile, TempDir};
use todo_mcp::{TaskId, TodoServerHandler};

/// Create a test handler with temporary storage
pub fn get_test_handler() -> (TodoServerHandler, NamedTempFile) {
    let temp_file = NamedTempFile::new().unwrap();
    let handler = TodoServerHandler::new(temp_file.path(), false);
    (handler, temp_file)
}

/// Create a test handler whose data file does not exist yet
pub fn get_fresh_handler() -> (TodoServerHandler, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let handler = TodoServerHandler::new(temp_dir.path().join("tasks.toml"), false);
    (handler, temp_dir)
}

/// Extract the task ID from an add() response
/// Response format: "Task #<n> added: <description>"
pub fn extract_id_from_response(response: &str) -> TaskId {
    response
        .split_whitespace()
        .nth(1)
        .unwrap()
        .parse()
        .unwrap()
}

/// Titles of the handler's current list, in order
pub fn titles(handler: &TodoServerHandler) -> Vec<String> {
    handler
        .snapshot()
        .iter()
        .map(|(_, t)| t.title().to_string())
        .collect()
}
