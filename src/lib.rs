//! To-do List MCP Server Library
//!
//! This library provides a Model Context Protocol (MCP) server for a simple
//! to-do list: tasks with a title, due date, priority and completion flag,
//! kept in a user-controlled order that can be rearranged or collapsed into
//! priority order.
//!
//! # Architecture
//!
//! The library follows a 3-layer architecture:
//! - **MCP Layer**: `TodoServerHandler` - Exposes each list operation as an MCP tool
//! - **Domain Layer**: `todo` module - Task record and ordered task list
//! - **Persistence Layer**: `storage` module - Whole-file TOML storage with optional git commits
//!
//! Every mutating tool saves the entire list before returning.
//!
//! # Example
//!
//! ```no_run
//! use todo_mcp::TodoServerHandler;
//!
//! let handler = TodoServerHandler::new("tasks.toml", false);
//! // Use handler with MCP server...
//! ```

pub mod config;
pub mod error;
pub mod formatting;
mod git_ops;
pub mod handlers;
pub mod storage;
pub mod todo;
pub mod validation;

use mcp_attr::Result as McpResult;
use mcp_attr::server::{McpServer, mcp_server};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use tracing::info;

// Re-export commonly used types
pub use config::Config;
pub use error::TodoError;
pub use storage::Storage;
pub use todo::{DueDate, Priority, Task, TaskId, TaskList};

/// MCP Server handler for to-do list management
///
/// Holds the in-memory list and the storage it is persisted to. All changes
/// are written to the TOML file immediately.
pub struct TodoServerHandler {
    pub(crate) data: Mutex<TaskList>,
    pub(crate) storage: Storage,
    /// Set when the data file could not be loaded at startup; cleared by the next successful save
    pub(crate) load_warning: Mutex<Option<String>>,
}

impl TodoServerHandler {
    /// Create a new handler, loading the list from `storage_path`
    ///
    /// # Arguments
    /// * `storage_path` - Path to the task data file (TOML format)
    /// * `git_commit` - Commit every save when the file is inside a git repository
    ///
    /// A data file that cannot be decoded does not prevent startup: it is
    /// moved aside, the list starts empty and `list` reports what happened.
    pub fn new(storage_path: impl AsRef<Path>, git_commit: bool) -> Self {
        let storage = Storage::new(storage_path, git_commit);
        let (data, load_failure) = storage.load_or_quarantine();
        let load_warning = load_failure.map(|failure| match failure.moved_to {
            Some(moved_to) => format!(
                "Warning: the saved task list could not be loaded ({}). It was moved to {} and the list started empty.",
                failure.error,
                moved_to.display()
            ),
            None => format!(
                "Warning: the saved task list could not be loaded ({}). It could not be moved aside, so the next change will overwrite it.",
                failure.error
            ),
        });

        info!(
            path = %storage.file_path().display(),
            tasks = data.len(),
            git_commit,
            "task list ready"
        );

        Self {
            data: Mutex::new(data),
            storage,
            load_warning: Mutex::new(load_warning),
        }
    }

    /// Create a handler from command-line configuration
    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.file, config.git_commit)
    }

    /// Problem encountered while loading the data file at startup, if any
    pub fn load_warning(&self) -> Option<String> {
        self.load_warning
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Snapshot of the current list
    pub fn snapshot(&self) -> TaskList {
        self.lock_data().clone()
    }

    /// Lock the task list
    ///
    /// A panic while holding the lock leaves a list that is still
    /// structurally valid, so poisoning is ignored.
    pub(crate) fn lock_data(&self) -> MutexGuard<'_, TaskList> {
        self.data
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Save the list with a commit message
    ///
    /// Called with the data lock held so the saved file always matches the
    /// mutation that triggered it.
    pub(crate) fn save_data_with_message(&self, data: &TaskList, message: &str) -> Result<(), TodoError> {
        self.storage.save_with_message(data, message)?;
        self.load_warning
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take();
        Ok(())
    }
}

/// To-do list server.
///
/// Tasks have a title, a due date (DD-MM-YYYY, optional), a priority (High, Medium, Low)
/// and a done flag. The list keeps the order you give it: new tasks go to the end,
/// move_task rearranges them, and sort_by_priority groups High before Medium before Low
/// while keeping the existing order within each priority.
///
/// Task IDs use format: #1, #2, #3. Positions are 0-based, as shown by list.
#[mcp_server]
impl McpServer for TodoServerHandler {
    /// **Add**: Append a new task to the end of the list.
    /// **Priority**: exactly one of High, Medium, Low.
    /// **Due date**: DD-MM-YYYY (e.g., "01-03-2030"); omit for no due date.
    #[tool]
    async fn add(
        &self,
        /// Title: what needs doing (must not be empty)
        title: String,
        /// Priority: High/Medium/Low
        priority: String,
        /// Due date: DD-MM-YYYY (optional)
        due_date: Option<String>,
    ) -> McpResult<String> {
        self.handle_add(title, priority, due_date).await
    }

    /// **Review**: Show all tasks in their current order with ids, positions and due-date countdowns.
    #[tool]
    async fn list(&self) -> McpResult<String> {
        self.handle_list().await
    }

    /// **Complete**: Mark a task as done. Its position does not change; completing twice is harmless.
    #[tool]
    async fn done(
        &self,
        /// Task ID (e.g., "#3")
        id: String,
    ) -> McpResult<String> {
        self.handle_done(id).await
    }

    /// **Delete**: Remove a task from the list permanently.
    #[tool]
    async fn delete(
        &self,
        /// Task ID (e.g., "#3")
        id: String,
    ) -> McpResult<String> {
        self.handle_delete(id).await
    }

    /// **Reorder**: Move a task to a new 0-based position; tasks in between shift by one.
    /// A position past the end moves the task to the end.
    #[tool]
    async fn move_task(
        &self,
        /// Task ID (e.g., "#3")
        id: String,
        /// Target position, 0 = top of the list
        position: u32,
    ) -> McpResult<String> {
        self.handle_move_task(id, position).await
    }

    /// **Sort**: Order the list High → Medium → Low. Tasks with equal priority keep their current order.
    #[tool]
    async fn sort_by_priority(&self) -> McpResult<String> {
        self.handle_sort_by_priority().await
    }
}
