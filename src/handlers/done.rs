//! Done handler for the to-do MCP server

use crate::TodoServerHandler;
use crate::validation;
use mcp_attr::{Result as McpResult, bail_public};

impl TodoServerHandler {
    /// Marks a task as completed in place and saves the list.
    pub async fn handle_done(&self, id: String) -> McpResult<String> {
        let task_id = validation::parse_task_id(&id)?;
        let mut data = self.lock_data();

        let already_done = data.get(task_id).is_some_and(|t| t.is_completed());
        let description = match data.mark_done(task_id) {
            Ok(task) => task.describe(),
            Err(e) => return Err(validation::to_mcp_error(e, &data)),
        };

        if let Err(e) = self.save_data_with_message(&data, &format!("Complete task {}", task_id)) {
            bail_public!(_, "Failed to save: {}", e);
        }

        if already_done {
            Ok(format!("Task {} was already done: {}", task_id, description))
        } else {
            Ok(format!("Task {} marked as done: {}", task_id, description))
        }
    }
}
