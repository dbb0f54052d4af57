//! Move handler for the to-do MCP server

use crate::TodoServerHandler;
use crate::validation;
use mcp_attr::{Result as McpResult, bail_public};

impl TodoServerHandler {
    /// Reorders one task to a 0-based position and saves the list.
    pub async fn handle_move_task(&self, id: String, position: u32) -> McpResult<String> {
        let task_id = validation::parse_task_id(&id)?;
        let mut data = self.lock_data();

        let target = usize::try_from(position).unwrap_or(usize::MAX);
        let final_position = match data.move_to(task_id, target) {
            Ok(p) => p,
            Err(e) => return Err(validation::to_mcp_error(e, &data)),
        };

        if let Err(e) = self.save_data_with_message(
            &data,
            &format!("Move task {} to position {}", task_id, final_position),
        ) {
            bail_public!(_, "Failed to save: {}", e);
        }

        Ok(format!(
            "Moved task {} to position {}",
            task_id, final_position
        ))
    }
}
