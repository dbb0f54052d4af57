//! Validation helper functions for the to-do MCP server
//!
//! Turns user-supplied tool arguments into typed values and core errors
//! into MCP errors with actionable messages.

use crate::error::TodoError;
use crate::todo::{TaskId, TaskList};
use mcp_attr::Result as McpResult;

fn invalid_params(message: String) -> mcp_attr::Error {
    mcp_attr::Error::new(mcp_attr::ErrorCode::INVALID_PARAMS).with_message(message, true)
}

/// Parse and validate a task ID parameter (`#3` or `3`)
pub fn parse_task_id(id: &str) -> McpResult<TaskId> {
    id.parse::<TaskId>().map_err(invalid_params)
}

/// Format an error message for a missing task, listing the ids that do exist
///
/// # Arguments
/// * `id` - The id that was not found
/// * `data` - The current list, used to suggest available ids
pub fn format_task_not_found(id: TaskId, data: &TaskList) -> String {
    if data.is_empty() {
        format!(
            "Task {} does not exist. No tasks have been added yet. Add one first using add().",
            id
        )
    } else {
        let ids: Vec<String> = data.ids().iter().map(ToString::to_string).collect();
        format!(
            "Task {} does not exist.\nAvailable tasks: {}",
            id,
            ids.join(", ")
        )
    }
}

/// Convert a core error into an MCP error for the client
///
/// Persistence errors are not expected here; handlers report those as save
/// failures themselves.
pub fn to_mcp_error(err: TodoError, data: &TaskList) -> mcp_attr::Error {
    match err {
        TodoError::Validation(message) => invalid_params(message),
        TodoError::NotFound(id) => invalid_params(format_task_not_found(id, data)),
        other => invalid_params(other.to_string()),
    }
}
