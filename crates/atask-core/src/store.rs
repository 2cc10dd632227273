//! Task file storage with XDG path support.
//!
//! Tasks are stored as a JSON array at `~/.local/share/atask/tasks.json` on
//! Unix systems. The store only reads and writes the whole file; queries and
//! recurrence work on the loaded `Vec<Task>`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use thiserror::Error;
use tracing::debug;

use crate::task::Task;

/// Default task filename.
const TASKS_FILENAME: &str = "tasks.json";

/// Application qualifier (for XDG paths).
const QUALIFIER: &str = "";

/// Application organization (for XDG paths).
const ORGANIZATION: &str = "";

/// Application name (for XDG paths).
const APPLICATION: &str = "atask";

/// Errors that can occur while reading or writing the task file.
#[derive(Debug, Error)]
pub enum TaskStoreError {
    /// Failed to determine the XDG data directory.
    #[error("failed to determine data directory: no valid home directory found")]
    NoDataDir,

    /// I/O error during file read.
    #[error("failed to read task file '{path}': {source}")]
    ReadError {
        /// The path that failed to read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// I/O error during file write.
    #[error("failed to write task file '{path}': {source}")]
    WriteError {
        /// The path that failed to write.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// I/O error during directory creation.
    #[error("failed to create data directory '{path}': {source}")]
    CreateDirError {
        /// The directory path that failed to create.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The file is not a JSON array of tasks.
    #[error("invalid task file '{path}': {source}")]
    Parse {
        /// The file that failed to parse.
        path: PathBuf,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for task store operations.
pub type Result<T> = std::result::Result<T, TaskStoreError>;

/// Persistent storage for the task list.
///
/// # Example
///
/// ```no_run
/// use atask_core_rs::TaskStore;
///
/// let store = TaskStore::new()?;
/// let tasks = store.load_or_default()?;
/// store.save(&tasks)?;
/// # Ok::<(), atask_core_rs::TaskStoreError>(())
/// ```
#[derive(Debug, Clone)]
pub struct TaskStore {
    path: PathBuf,
}

impl TaskStore {
    /// Creates a store at the default XDG data path.
    ///
    /// # Errors
    ///
    /// Returns `TaskStoreError::NoDataDir` if the home directory cannot be determined.
    pub fn new() -> Result<Self> {
        let path = Self::default_path()?;
        Ok(Self { path })
    }

    /// Creates a store at a custom path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the default task file path.
    ///
    /// On Unix: `~/.local/share/atask/tasks.json`
    /// On macOS: `~/Library/Application Support/atask/tasks.json`
    pub fn default_path() -> Result<PathBuf> {
        let project_dirs = ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
            .ok_or(TaskStoreError::NoDataDir)?;
        Ok(project_dirs.data_dir().join(TASKS_FILENAME))
    }

    /// Returns the path to the task file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads all tasks from disk.
    ///
    /// # Errors
    ///
    /// - `TaskStoreError::ReadError` if the file cannot be read (including
    ///   when it does not exist; see [`load_or_default`](Self::load_or_default)).
    /// - `TaskStoreError::Parse` if the file is not a JSON task array.
    pub fn load(&self) -> Result<Vec<Task>> {
        let contents = fs::read_to_string(&self.path).map_err(|e| TaskStoreError::ReadError {
            path: self.path.clone(),
            source: e,
        })?;
        let tasks: Vec<Task> =
            serde_json::from_str(&contents).map_err(|e| TaskStoreError::Parse {
                path: self.path.clone(),
                source: e,
            })?;
        debug!(path = %self.path.display(), count = tasks.len(), "loaded tasks");
        Ok(tasks)
    }

    /// Loads all tasks, returning an empty list if the file doesn't exist.
    pub fn load_or_default(&self) -> Result<Vec<Task>> {
        match self.load() {
            Ok(tasks) => Ok(tasks),
            Err(TaskStoreError::ReadError { ref source, .. })
                if source.kind() == io::ErrorKind::NotFound =>
            {
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    /// Writes all tasks to disk as pretty-printed JSON.
    ///
    /// Creates the parent directory if needed. The file is written to a
    /// temporary sibling and renamed into place.
    pub fn save(&self, tasks: &[Task]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| TaskStoreError::CreateDirError {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        let json = serde_json::to_string_pretty(tasks)?;

        let temp_path = self.path.with_extension("tmp");
        fs::write(&temp_path, &json).map_err(|e| TaskStoreError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;
        fs::rename(&temp_path, &self.path).map_err(|e| TaskStoreError::WriteError {
            path: self.path.clone(),
            source: e,
        })?;

        debug!(path = %self.path.display(), count = tasks.len(), "saved tasks");
        Ok(())
    }
}
