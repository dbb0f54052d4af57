//! Sort handler for the to-do MCP server

use crate::TodoServerHandler;
use mcp_attr::{Result as McpResult, bail_public};

impl TodoServerHandler {
    /// Stable-sorts the list by priority and saves it.
    pub async fn handle_sort_by_priority(&self) -> McpResult<String> {
        let mut data = self.lock_data();
        data.sort_by_priority();

        if let Err(e) = self.save_data_with_message(&data, "Sort tasks by priority") {
            bail_public!(_, "Failed to save: {}", e);
        }

        Ok(format!("Sorted {} task(s) by priority", data.len()))
    }
}
