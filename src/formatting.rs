//! Formatting helper functions for the to-do MCP server

use crate::todo::TaskList;
use chrono::NaiveDate;

/// Format the list into a display string
///
/// Each line carries the 0-based position used by `move_task`, the task id,
/// and the task description. Pending tasks with a due date get a countdown
/// line relative to `today`.
pub fn format_tasks(data: &TaskList, today: NaiveDate) -> String {
    if data.is_empty() {
        return "No tasks".to_string();
    }

    let mut result = format!("Found {} task(s):\n\n", data.len());
    for (pos, (id, task)) in data.iter().enumerate() {
        result.push_str(&format!("{}. {} {}\n", pos, id, task));

        if !task.is_completed()
            && let Some(countdown) = task.due_date().countdown(today)
        {
            result.push_str(&format!("   {}\n", countdown));
        }
    }

    result
}
