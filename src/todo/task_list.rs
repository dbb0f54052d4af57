use crate::error::{Result, TodoError};
use crate::todo::task::{Task, TaskId};

/// Format version written to the data file (current: 1)
pub const FORMAT_VERSION: u32 = 1;

/// A task together with its stable identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub id: TaskId,
    pub task: Task,
}

/// Ordered, in-memory to-do list
///
/// Order is meaningful: it is the display order, changed by manual moves and
/// collapsed into priority order by [`TaskList::sort_by_priority`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskList {
    /// Tasks in display order
    ///
    /// Lookups by id are linear scans; lists are small enough that keeping a
    /// single Vec is simpler than maintaining a separate index.
    pub(crate) entries: Vec<Entry>,

    /// Next identifier to hand out, always greater than every id in `entries`
    pub(crate) next_id: u64,
}

impl Default for TaskList {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
        }
    }
}

// Serialize/Deserialize implementations are in serde_impl.rs

impl TaskList {
    /// Create a new empty list
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(id, task)` pairs in display order
    pub fn iter(&self) -> impl Iterator<Item = (TaskId, &Task)> {
        self.entries.iter().map(|e| (e.id, &e.task))
    }

    /// Ids in display order
    pub fn ids(&self) -> Vec<TaskId> {
        self.entries.iter().map(|e| e.id).collect()
    }

    /// Clones of all tasks in display order
    pub fn tasks(&self) -> Vec<Task> {
        self.entries.iter().map(|e| e.task.clone()).collect()
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.entries.iter().find(|e| e.id == id).map(|e| &e.task)
    }

    /// Current index of a task in display order
    pub fn position(&self, id: TaskId) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    fn require_position(&self, id: TaskId) -> Result<usize> {
        self.position(id).ok_or(TodoError::NotFound(id))
    }

    /// Append a task to the end of the list
    ///
    /// # Returns
    /// The identifier assigned to the task
    pub fn add(&mut self, task: Task) -> TaskId {
        let id = TaskId::new(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry { id, task });
        id
    }

    /// Remove a specific task from the list
    ///
    /// # Returns
    /// The removed task, or `NotFound` if no task has this id
    pub fn remove(&mut self, id: TaskId) -> Result<Task> {
        let pos = self.require_position(id)?;
        Ok(self.entries.remove(pos).task)
    }

    /// Move a task to `target_index` in the list without it
    ///
    /// Elements between the old and new position shift by one. An index past
    /// the end places the task last.
    ///
    /// # Returns
    /// The index the task ended up at
    pub fn move_to(&mut self, id: TaskId, target_index: usize) -> Result<usize> {
        let pos = self.require_position(id)?;
        let entry = self.entries.remove(pos);
        let target = target_index.min(self.entries.len());
        self.entries.insert(target, entry);
        Ok(target)
    }

    /// Stable sort by priority rank; equal priorities keep their manual order
    pub fn sort_by_priority(&mut self) {
        // Vec::sort_by_key is a stable sort
        self.entries.sort_by_key(|e| e.task.priority.rank());
    }

    /// Mark a task as completed in place
    ///
    /// Completing an already completed task changes nothing.
    pub fn mark_done(&mut self, id: TaskId) -> Result<&Task> {
        let pos = self.require_position(id)?;
        let entry = &mut self.entries[pos];
        entry.task = entry.task.clone().mark_completed();
        Ok(&entry.task)
    }
}
