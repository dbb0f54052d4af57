//! MCP tool handlers for the to-do server
//!
//! This module contains the implementation of all MCP tool handlers.
//! Each handler is in a separate file for better organization.

pub mod add;
pub mod delete;
pub mod done;
pub mod list;
pub mod move_task;
pub mod sort;
