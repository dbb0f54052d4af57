//! Serialization and deserialization implementations for TaskList
//!
//! The on-disk layout is a flat TOML document:
//!
//! ```toml
//! format_version = 1
//! next_id = 3
//!
//! [[task]]
//! id = 1
//! title = "Pay rent"
//! due_date = "01-03-2030"
//! priority = "High"
//! completed = false
//! ```
//!
//! Hand-edited files may omit `id`, `next_id`, `due_date` and `completed`;
//! missing ids are assigned on load in file order.

use super::task::{DueDate, Priority, Task, TaskId};
use super::task_list::{Entry, FORMAT_VERSION, TaskList};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashSet;

/// Largest id that still leaves room for `next_id` in a TOML integer
const MAX_TASK_ID: u64 = i64::MAX as u64 - 1;

fn default_format_version() -> u32 {
    FORMAT_VERSION
}

#[derive(Deserialize)]
struct TaskListHelper {
    #[serde(default = "default_format_version")]
    format_version: u32,
    #[serde(default)]
    next_id: u64,
    #[serde(default, rename = "task")]
    tasks: Vec<StoredTask>,
}

#[derive(Deserialize)]
struct StoredTask {
    #[serde(default)]
    id: Option<TaskId>,
    title: String,
    #[serde(default)]
    due_date: DueDate,
    priority: Priority,
    #[serde(default)]
    completed: bool,
}

#[derive(Serialize)]
struct StoredTaskRef<'a> {
    id: TaskId,
    title: &'a str,
    due_date: DueDate,
    priority: Priority,
    completed: bool,
}

impl<'a> From<&'a Entry> for StoredTaskRef<'a> {
    fn from(entry: &'a Entry) -> Self {
        Self {
            id: entry.id,
            title: &entry.task.title,
            due_date: entry.task.due_date,
            priority: entry.task.priority,
            completed: entry.task.completed,
        }
    }
}

impl<'de> Deserialize<'de> for TaskList {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error;

        let helper = TaskListHelper::deserialize(deserializer)?;

        if helper.format_version > FORMAT_VERSION {
            return Err(D::Error::custom(format!(
                "unsupported format_version {} (newest supported: {})",
                helper.format_version, FORMAT_VERSION
            )));
        }

        // Ids present in the file must be unique
        let mut seen = HashSet::new();
        for id in helper.tasks.iter().filter_map(|t| t.id) {
            if !seen.insert(id) {
                return Err(D::Error::custom(format!("duplicate task id {}", id)));
            }
        }

        let max_id = seen.iter().map(|id| id.get()).max().unwrap_or(0);
        if max_id > MAX_TASK_ID {
            return Err(D::Error::custom(format!(
                "task id #{} is too large (maximum #{})",
                max_id, MAX_TASK_ID
            )));
        }
        let mut next_id = helper.next_id.max(max_id + 1).max(1);

        let mut entries = Vec::with_capacity(helper.tasks.len());
        for stored in helper.tasks {
            let task = Task::new(&stored.title, stored.due_date, stored.priority)
                .map_err(D::Error::custom)?;
            let id = match stored.id {
                Some(id) => id,
                None if next_id > MAX_TASK_ID => {
                    return Err(D::Error::custom(format!(
                        "next_id {} leaves no room for new task ids",
                        next_id
                    )));
                }
                None => {
                    let id = TaskId::new(next_id);
                    next_id += 1;
                    id
                }
            };
            entries.push(Entry {
                id,
                task: Task {
                    completed: stored.completed,
                    ..task
                },
            });
        }

        Ok(TaskList { entries, next_id })
    }
}

impl Serialize for TaskList {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("TaskList", 3)?;
        state.serialize_field("format_version", &FORMAT_VERSION)?;
        state.serialize_field("next_id", &self.next_id)?;

        // Only written when non-empty, matching the `default` on load
        if !self.entries.is_empty() {
            let tasks: Vec<StoredTaskRef<'_>> = self.entries.iter().map(Into::into).collect();
            state.serialize_field("task", &tasks)?;
        } else {
            state.skip_field("task")?;
        }

        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_serialize_layout() {
        let mut list = TaskList::new();
        list.add(Task::create("Pay rent", "01-03-2030", "High").unwrap());
        let id = list.add(Task::create("Read book", "", "Low").unwrap());
        list.mark_done(id).unwrap();

        let toml_str = toml::to_string_pretty(&list).unwrap();
        assert!(toml_str.contains("format_version = 1"));
        assert!(toml_str.contains("next_id = 3"));
        assert!(toml_str.contains("[[task]]"));
        assert!(toml_str.contains("due_date = \"01-03-2030\""));
        assert!(toml_str.contains("due_date = \"No Date\""));
        assert!(toml_str.contains("priority = \"High\""));
        assert!(toml_str.contains("completed = true"));
    }

    #[test]
    fn test_empty_list_round_trip() {
        let list = TaskList::new();
        let toml_str = toml::to_string_pretty(&list).unwrap();
        assert!(!toml_str.contains("[[task]]"));

        let loaded: TaskList = toml::from_str(&toml_str).unwrap();
        assert_eq!(loaded, list);
    }

    #[test]
    fn test_round_trip_preserves_everything() {
        let mut list = TaskList::new();
        let a = list.add(Task::create("A", "15-08-2031", "Low").unwrap());
        list.add(Task::create("B", "", "High").unwrap());
        list.add(Task::create("B", "", "High").unwrap());
        list.remove(a).unwrap();
        let c = list.add(Task::create("C", "No Date", "Medium").unwrap());
        list.mark_done(c).unwrap();
        list.move_to(c, 0).unwrap();

        let toml_str = toml::to_string_pretty(&list).unwrap();
        let loaded: TaskList = toml::from_str(&toml_str).unwrap();
        assert_eq!(loaded, list);
        assert_eq!(loaded.next_id, 5);
    }

    #[test]
    fn test_hand_written_file_without_ids() {
        let toml_str = r#"
    [[task]]
    title = "Call mom"
    priority = "Medium"

    [[task]]
    id = 7
    title = "Buy stamps"
    due_date = "02-01-2030"
    priority = "Low"
    completed = true

    [[task]]
    title = "File taxes"
    priority = "High"
    "#;

        let list: TaskList = toml::from_str(toml_str).unwrap();
        assert_eq!(list.len(), 3);
        assert_eq!(
            list.ids(),
            vec![TaskId::new(8), TaskId::new(7), TaskId::new(9)]
        );
        assert_eq!(list.next_id, 10);

        let stamps = list.get(TaskId::new(7)).unwrap();
        assert!(stamps.completed);
        assert_eq!(
            stamps.due_date,
            DueDate::On(NaiveDate::from_ymd_opt(2030, 1, 2).unwrap())
        );
        assert_eq!(list.get(TaskId::new(8)).unwrap().due_date, DueDate::NoDate);
    }

    #[test]
    fn test_next_id_never_below_existing_ids() {
        let toml_str = r#"
    next_id = 2

    [[task]]
    id = 5
    title = "Stale counter"
    priority = "High"
    "#;
        let list: TaskList = toml::from_str(toml_str).unwrap();
        assert_eq!(list.next_id, 6);
    }

    #[test]
    fn test_rejects_unknown_priority() {
        let toml_str = r#"
    [[task]]
    title = "Something"
    priority = "Urgent"
    "#;
        assert!(toml::from_str::<TaskList>(toml_str).is_err());
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let toml_str = r#"
    [[task]]
    id = 1
    title = "One"
    priority = "High"

    [[task]]
    id = 1
    title = "Also one"
    priority = "Low"
    "#;
        let err = toml::from_str::<TaskList>(toml_str).unwrap_err();
        assert!(err.to_string().contains("duplicate task id #1"));
    }

    #[test]
    fn test_rejects_empty_title_and_bad_date() {
        let empty_title = r#"
    [[task]]
    title = ""
    priority = "High"
    "#;
        assert!(toml::from_str::<TaskList>(empty_title).is_err());

        let bad_date = r#"
    [[task]]
    title = "Dentist"
    due_date = "2030-01-01"
    priority = "High"
    "#;
        assert!(toml::from_str::<TaskList>(bad_date).is_err());
    }

    #[test]
    fn test_rejects_newer_format_version() {
        let toml_str = "format_version = 99\n";
        let err = toml::from_str::<TaskList>(toml_str).unwrap_err();
        assert!(err.to_string().contains("unsupported format_version 99"));
    }

    #[test]
    fn test_rejects_ids_that_cannot_be_written_back() {
        let max_id = format!(
            "[[task]]\nid = {}\ntitle = \"Huge\"\npriority = \"Low\"\n",
            i64::MAX
        );
        let err = toml::from_str::<TaskList>(&max_id).unwrap_err();
        assert!(err.to_string().contains("too large"));

        let max_counter = format!(
            "next_id = {}\n[[task]]\ntitle = \"No id\"\npriority = \"Low\"\n",
            i64::MAX
        );
        let err = toml::from_str::<TaskList>(&max_counter).unwrap_err();
        assert!(err.to_string().contains("no room"));

        // The largest accepted id still saves and reloads
        let edge = format!(
            "[[task]]\nid = {}\ntitle = \"Edge\"\npriority = \"Low\"\n",
            MAX_TASK_ID
        );
        let list: TaskList = toml::from_str(&edge).unwrap();
        let written = toml::to_string_pretty(&list).unwrap();
        assert_eq!(toml::from_str::<TaskList>(&written).unwrap(), list);
    }
}
