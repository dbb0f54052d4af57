//! To-do domain model
//!
//! - `task`: a single task record with its priority and due date types
//! - `task_list`: the ordered list and its operations
//! - `serde_impl`: the on-disk representation of the list

mod serde_impl;
mod task;
mod task_list;

pub use task::{
    DUE_DATE_FORMAT, DueDate, NO_DATE, Priority, Task, TaskId, local_date_today,
};
pub use task_list::{Entry, FORMAT_VERSION, TaskList};
