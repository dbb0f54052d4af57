//! Delete handler for the to-do MCP server

use crate::TodoServerHandler;
use crate::validation;
use mcp_attr::{Result as McpResult, bail_public};

impl TodoServerHandler {
    /// Removes one task by id and saves the list.
    pub async fn handle_delete(&self, id: String) -> McpResult<String> {
        let task_id = validation::parse_task_id(&id)?;
        let mut data = self.lock_data();

        let removed = match data.remove(task_id) {
            Ok(task) => task,
            Err(e) => return Err(validation::to_mcp_error(e, &data)),
        };

        if let Err(e) = self.save_data_with_message(&data, &format!("Delete task {}", task_id)) {
            bail_public!(_, "Failed to save: {}", e);
        }

        Ok(format!("Deleted task {}: {}", task_id, removed.describe()))
    }
}
