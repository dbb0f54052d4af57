//! Error taxonomy for the to-do core.

use crate::todo::TaskId;
use std::path::PathBuf;
use thiserror::Error;

/// Errors returned by task creation, list operations and persistence.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TodoError {
    /// User-supplied input was rejected before reaching the list.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The targeted task is not in the list.
    #[error("task {0} not found")]
    NotFound(TaskId),

    /// The data file could not be read, decoded or written.
    #[error("persistence error for {}: {reason}", path.display())]
    Persistence {
        /// Data file involved.
        path: PathBuf,
        /// Underlying cause, rendered.
        reason: String,
    },
}

impl TodoError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub(crate) fn persistence(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::Persistence {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// True for errors a caller may treat as a harmless no-op.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

pub type Result<T, E = TodoError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = TodoError::validation("title must not be empty");
        assert_eq!(err.to_string(), "validation failed: title must not be empty");

        let err = TodoError::NotFound(TaskId::new(7));
        assert_eq!(err.to_string(), "task #7 not found");
        assert!(err.is_not_found());

        let err = TodoError::persistence("tasks.toml", "expected `=`");
        assert_eq!(
            err.to_string(),
            "persistence error for tasks.toml: expected `=`"
        );
        assert!(!err.is_not_found());
    }
}
