use anyhow::{Context, Result};
use git2::{Repository, Signature, Time};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Records saves of the data file as local git commits
pub struct GitOps {
    repo: Option<Mutex<Repository>>,
}

impl GitOps {
    /// Create a new GitOps instance by detecting if the path is in a git repository
    ///
    /// The data file itself does not need to exist yet, only its directory.
    pub fn new(file_path: &Path) -> Self {
        let repo = Self::containing_dir(file_path)
            .and_then(|dir| Repository::discover(dir).ok())
            .map(Mutex::new);
        Self { repo }
    }

    /// Check if the file is under git version control
    pub fn is_git_managed(&self) -> bool {
        self.repo.is_some()
    }

    fn containing_dir(file_path: &Path) -> Option<PathBuf> {
        let dir = match file_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::canonicalize(dir).ok()
    }

    /// Stage the file and commit it
    ///
    /// # Returns
    /// `true` if a commit was created, `false` if the repository is absent or
    /// the file content matches HEAD
    pub fn commit(&self, file_path: &Path, message: &str) -> Result<bool> {
        let repo = match &self.repo {
            Some(r) => r.lock().unwrap_or_else(|poisoned| poisoned.into_inner()),
            None => return Ok(false),
        };

        // Get the file path relative to the repository
        let repo_workdir = repo
            .workdir()
            .context("Repository has no working directory")?;
        let repo_workdir =
            fs::canonicalize(repo_workdir).context("Failed to resolve repository directory")?;
        let absolute_path =
            fs::canonicalize(file_path).context("Failed to resolve data file path")?;
        let relative_path = absolute_path
            .strip_prefix(&repo_workdir)
            .context("File is not in repository")?;

        // Add the file to the index
        let mut index = repo.index()?;
        index.add_path(relative_path)?;
        index.write()?;

        let tree_id = index.write_tree()?;
        let tree = repo.find_tree(tree_id)?;

        // Get the current HEAD commit
        let parent_commit = match repo.head() {
            Ok(head) => {
                let oid = head.target().context("HEAD has no target")?;
                Some(repo.find_commit(oid)?)
            }
            Err(_) => None, // Initial commit
        };

        if let Some(ref parent) = parent_commit
            && parent.tree_id() == tree_id
        {
            return Ok(false);
        }

        let signature = Self::get_signature(&repo)?;
        let parents: Vec<_> = parent_commit.iter().collect();

        repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            message,
            &tree,
            &parents,
        )?;

        Ok(true)
    }

    /// Get or create a git signature for commits
    fn get_signature(repo: &Repository) -> Result<Signature<'_>> {
        let config = repo.config()?;

        let name = config
            .get_string("user.name")
            .unwrap_or_else(|_| "todo-mcp".to_string());

        let email = config
            .get_string("user.email")
            .unwrap_or_else(|_| "todo-mcp@localhost".to_string());

        match Signature::now(&name, &email) {
            Ok(sig) => Ok(sig),
            Err(_) => {
                // Some CI systems cannot read the clock through libgit2
                let time = Time::new(1_700_000_000, 0);
                Signature::new(&name, &email, &time)
                    .context("Failed to create signature with fixed time")
            }
        }
    }
}
