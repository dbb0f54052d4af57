use crate::error::{Result, TodoError};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Format used for due dates, both for input and display (e.g. `01-03-2030`)
pub const DUE_DATE_FORMAT: &str = "%d-%m-%Y";

/// Literal stored and displayed for a task without a due date
pub const NO_DATE: &str = "No Date";

/// Get the current date in local timezone
pub fn local_date_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Stable identifier of a task inside a [`TaskList`](super::TaskList)
///
/// Assigned by the list on insertion and never reused within one file, so
/// two tasks with identical fields can still be told apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(u64);

impl TaskId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl FromStr for TaskId {
    type Err = String;

    /// Accepts both `#3` and `3`
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
        digits
            .parse::<u64>()
            .map(TaskId)
            .map_err(|_| format!("Invalid task ID '{}'. Use the form #3 or 3", s))
    }
}

/// Task priority
///
/// Variant names double as the persisted and displayed strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Sort key: High=1, Medium=2, Low=3
    pub fn rank(self) -> u8 {
        match self {
            Priority::High => 1,
            Priority::Medium => 2,
            Priority::Low => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "High" => Ok(Priority::High),
            "Medium" => Ok(Priority::Medium),
            "Low" => Ok(Priority::Low),
            _ => Err(format!(
                "Invalid priority '{}'. Valid options are: High, Medium, Low",
                s
            )),
        }
    }
}

/// Due date of a task: a calendar day, or no date at all
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DueDate {
    On(NaiveDate),
    #[default]
    NoDate,
}

impl DueDate {
    pub fn date(self) -> Option<NaiveDate> {
        match self {
            DueDate::On(date) => Some(date),
            DueDate::NoDate => None,
        }
    }

    /// Human-readable distance from `today` to the due date
    ///
    /// Returns `None` for tasks without a due date.
    pub fn countdown(self, today: NaiveDate) -> Option<String> {
        let due = self.date()?;
        let days_left = (due - today).num_days();
        let plural = |n: i64| if n == 1 { "" } else { "s" };

        Some(if days_left > 0 {
            format!("{} day{} left", days_left, plural(days_left))
        } else if days_left == 0 {
            "Due today!".to_string()
        } else {
            let overdue = days_left.abs();
            format!("Overdue by {} day{}", overdue, plural(overdue))
        })
    }
}

impl fmt::Display for DueDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DueDate::On(date) => write!(f, "{}", date.format(DUE_DATE_FORMAT)),
            DueDate::NoDate => f.write_str(NO_DATE),
        }
    }
}

impl FromStr for DueDate {
    type Err = String;

    /// Empty input and the `No Date` literal both mean "no due date"
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed == NO_DATE {
            return Ok(DueDate::NoDate);
        }
        NaiveDate::parse_from_str(trimmed, DUE_DATE_FORMAT)
            .map(DueDate::On)
            .map_err(|_| {
                format!(
                    "Invalid due date '{}'. Use DD-MM-YYYY (e.g., '01-03-2030') or leave it empty",
                    s
                )
            })
    }
}

impl Serialize for DueDate {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DueDate {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A single to-do item
///
/// Only constructible through [`Task::new`] or [`Task::create`], so every
/// task holds a trimmed, non-empty title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub(super) title: String,
    pub(super) due_date: DueDate,
    pub(super) priority: Priority,
    pub(super) completed: bool,
}

impl Task {
    /// Create a task from typed values
    ///
    /// The title is trimmed and must not be empty.
    pub fn new(title: impl AsRef<str>, due_date: DueDate, priority: Priority) -> Result<Self> {
        let title = title.as_ref().trim();
        if title.is_empty() {
            return Err(TodoError::validation("Task title must not be empty"));
        }
        Ok(Self {
            title: title.to_string(),
            due_date,
            priority,
            completed: false,
        })
    }

    /// Create a task from user-entered strings
    ///
    /// # Arguments
    /// * `title` - Task title, must not be empty after trimming
    /// * `due_date` - `DD-MM-YYYY`, `No Date`, or empty
    /// * `priority` - One of `High`, `Medium`, `Low`
    pub fn create(title: &str, due_date: &str, priority: &str) -> Result<Self> {
        let priority = priority.parse::<Priority>().map_err(TodoError::Validation)?;
        let due_date = due_date.parse::<DueDate>().map_err(TodoError::Validation)?;
        Self::new(title, due_date, priority)
    }

    /// Return the completed variant of this task
    pub fn mark_completed(self) -> Self {
        Self {
            completed: true,
            ..self
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn due_date(&self) -> DueDate {
        self.due_date
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// `[High] Pay rent (Due: 01-03-2030) - [Not Done]`
    pub fn describe(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.completed { "[Done]" } else { "[Not Done]" };
        write!(
            f,
            "[{}] {} (Due: {}) - {}",
            self.priority, self.title, self.due_date, status
        )
    }
}
