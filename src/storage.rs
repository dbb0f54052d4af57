//! File-based TOML persistence for the task list
//!
//! Every save rewrites the whole file. The new content is written to a
//! sibling temp file first and renamed over the target, so a crash never
//! leaves a half-written data file behind.

use crate::error::{Result, TodoError};
use crate::git_ops::GitOps;
use crate::todo::TaskList;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, error, warn};

/// Why startup began with an empty list instead of the saved one
#[derive(Debug)]
pub struct LoadFailure {
    pub error: TodoError,
    /// Where the unreadable file was moved, if the rename succeeded
    pub moved_to: Option<PathBuf>,
}

pub struct Storage {
    file_path: PathBuf,
    git_ops: Option<GitOps>,
}

impl Storage {
    /// Create a storage backed by `file_path`
    ///
    /// # Arguments
    /// * `file_path` - Path to the TOML data file
    /// * `git_commit` - Record each save as a git commit when the file is in a repository
    pub fn new(file_path: impl AsRef<Path>, git_commit: bool) -> Self {
        let file_path = file_path.as_ref().to_path_buf();
        let git_ops = if git_commit {
            let ops = GitOps::new(&file_path);
            if !ops.is_git_managed() {
                warn!(
                    path = %file_path.display(),
                    "git commits requested but the data file is not inside a git repository"
                );
            }
            Some(ops)
        } else {
            None
        };
        Self { file_path, git_ops }
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Sibling path with `suffix` appended to the file name
    fn sibling(&self, suffix: &str) -> PathBuf {
        let mut name = self
            .file_path
            .file_name()
            .map(OsString::from)
            .unwrap_or_default();
        name.push(suffix);
        self.file_path.with_file_name(name)
    }

    /// First free `<file>.corrupt`, `<file>.corrupt.1`, `<file>.corrupt.2`, ... name
    fn quarantine_path(&self) -> PathBuf {
        let mut candidate = self.sibling(".corrupt");
        let mut n = 1u32;
        while candidate.try_exists().unwrap_or(false) {
            candidate = self.sibling(&format!(".corrupt.{}", n));
            n += 1;
        }
        candidate
    }

    /// Load the task list
    ///
    /// A missing file is an empty list. A file that exists but cannot be read
    /// or decoded is a `Persistence` error.
    pub fn load(&self) -> Result<TaskList> {
        let content = match fs::read_to_string(&self.file_path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.file_path.display(), "data file not found, starting empty");
                return Ok(TaskList::new());
            }
            Err(e) => return Err(TodoError::persistence(&self.file_path, e)),
        };
        let list: TaskList =
            toml::from_str(&content).map_err(|e| TodoError::persistence(&self.file_path, e))?;
        debug!(path = %self.file_path.display(), tasks = list.len(), "loaded task list");
        Ok(list)
    }

    /// Load the task list, moving an undecodable file out of the way
    ///
    /// Startup never fails because of a bad data file: the file is renamed to
    /// the first unused `.corrupt` sibling so neither the next save nor a
    /// later quarantine can overwrite it, and the failure is returned
    /// alongside an empty list.
    pub fn load_or_quarantine(&self) -> (TaskList, Option<LoadFailure>) {
        match self.load() {
            Ok(list) => (list, None),
            Err(error) => {
                let quarantine = self.quarantine_path();
                let moved_to = match fs::rename(&self.file_path, &quarantine) {
                    Ok(()) => {
                        error!(
                            error = %error,
                            moved_to = %quarantine.display(),
                            "could not load task list, starting empty"
                        );
                        Some(quarantine)
                    }
                    Err(rename_err) => {
                        error!(
                            error = %error,
                            rename_error = %rename_err,
                            "could not load task list and could not move it aside, starting empty"
                        );
                        None
                    }
                };
                (TaskList::new(), Some(LoadFailure { error, moved_to }))
            }
        }
    }

    /// Save the whole task list
    pub fn save(&self, list: &TaskList) -> Result<()> {
        self.save_with_message(list, "Update tasks")
    }

    /// Save the whole task list; `message` is used as the git commit message
    pub fn save_with_message(&self, list: &TaskList, message: &str) -> Result<()> {
        let content =
            toml::to_string_pretty(list).map_err(|e| TodoError::persistence(&self.file_path, e))?;

        if let Some(parent) = self.file_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| TodoError::persistence(&self.file_path, e))?;
        }

        let tmp = self.sibling(".tmp");
        fs::write(&tmp, content).map_err(|e| TodoError::persistence(&tmp, e))?;
        if let Err(e) = fs::rename(&tmp, &self.file_path) {
            // Best effort; the rename failure is what gets reported
            let _ = fs::remove_file(&tmp);
            return Err(TodoError::persistence(&self.file_path, e));
        }
        debug!(path = %self.file_path.display(), tasks = list.len(), "saved task list");

        if let Some(ref git_ops) = self.git_ops {
            match git_ops.commit(&self.file_path, message) {
                Ok(true) => debug!(commit_message = message, "committed task list"),
                Ok(false) => {}
                Err(e) => warn!(error = %e, "git commit failed, file was saved"),
            }
        }

        Ok(())
    }
}
