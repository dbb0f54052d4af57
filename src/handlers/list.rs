//! List handler for the to-do MCP server

use crate::TodoServerHandler;
use crate::formatting;
use crate::todo::local_date_today;
use mcp_attr::Result as McpResult;

impl TodoServerHandler {
    /// Renders the list in display order, prefixed by any startup load warning.
    pub async fn handle_list(&self) -> McpResult<String> {
        let listing = {
            let data = self.lock_data();
            formatting::format_tasks(&data, local_date_today())
        };

        match self.load_warning() {
            Some(warning) => Ok(format!("{}\n\n{}", warning, listing)),
            None => Ok(listing),
        }
    }
}
