//! Add handler for the to-do MCP server

use crate::TodoServerHandler;
use crate::todo::Task;
use crate::validation;
use mcp_attr::{Result as McpResult, bail_public};

impl TodoServerHandler {
    /// Validates the input, appends the task and saves the list.
    pub async fn handle_add(
        &self,
        title: String,
        priority: String,
        due_date: Option<String>,
    ) -> McpResult<String> {
        let mut data = self.lock_data();

        let task = match Task::create(&title, due_date.as_deref().unwrap_or(""), &priority) {
            Ok(t) => t,
            Err(e) => return Err(validation::to_mcp_error(e, &data)),
        };

        let description = task.describe();
        let id = data.add(task);

        if let Err(e) = self.save_data_with_message(&data, &format!("Add task {}", id)) {
            bail_public!(
                _,
                "Failed to save: {}. Task {} was added in memory only.",
                e,
                id
            );
        }

        Ok(format!("Task {} added: {}", id, description))
    }
}
