use std::{
    fs, io,
    path::{Path, PathBuf},
};

use log::{debug, warn};
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum WorkspaceError {
    #[error("workspace directory already exists at {path}")]
    Conflict { path: PathBuf },
    #[error("could not create workspace directory at {path}: {source}")]
    Unwritable { path: PathBuf, source: io::Error },
}

/// Hands out fresh, collision-free directories under a base path, one per
/// clone attempt.
pub struct WorkspaceAllocator {
    base: PathBuf,
}

impl WorkspaceAllocator {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        WorkspaceAllocator { base: base.into() }
    }

    /// Creates a new empty directory with a random 32-character hex name,
    /// including any missing parents of the base path. A pre-existing path
    /// under a fresh random id means something is badly wrong, so it is
    /// treated as fatal rather than retried.
    pub fn allocate(&self) -> Result<Workspace, WorkspaceError> {
        let id = Uuid::new_v4().simple().to_string();
        let path = self.base.join(id);
        if path.exists() {
            return Err(WorkspaceError::Conflict { path });
        }
        fs::create_dir_all(&path).map_err(|source| WorkspaceError::Unwritable {
            path: path.clone(),
            source,
        })?;
        debug!("Allocated workspace {}", path.display());
        Ok(Workspace { path, kept: false })
    }
}

/// Directory exclusively owned by a single clone attempt. Dropping the guard
/// deletes the directory and everything in it, unless `keep` transferred
/// ownership to the caller first. Deletion failures are logged and ignored so
/// cleanup never masks the failure that triggered it.
#[derive(Debug)]
pub struct Workspace {
    path: PathBuf,
    kept: bool,
}

impl Workspace {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Transfers ownership of the directory to the caller; it will no longer
    /// be deleted on drop.
    pub fn keep(mut self) -> PathBuf {
        self.kept = true;
        std::mem::take(&mut self.path)
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        if self.kept {
            return;
        }
        if let Err(error) = fs::remove_dir_all(&self.path) {
            if error.kind() != io::ErrorKind::NotFound {
                warn!(
                    "Failed to remove workspace {}: {}",
                    self.path.display(),
                    error
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocates_fresh_directories() {
        let base = tempfile::tempdir().unwrap();
        let allocator = WorkspaceAllocator::new(base.path());

        let first = allocator.allocate().unwrap();
        let second = allocator.allocate().unwrap();

        assert!(first.path().is_dir());
        assert!(second.path().is_dir());
        assert_ne!(first.path(), second.path());
    }

    #[test]
    fn creates_missing_base_directories() {
        let base = tempfile::tempdir().unwrap();
        let allocator = WorkspaceAllocator::new(base.path().join("nested/deeper"));

        let workspace = allocator.allocate().unwrap();
        assert!(workspace.path().is_dir());
    }

    #[test]
    fn drop_removes_directory() {
        let base = tempfile::tempdir().unwrap();
        let allocator = WorkspaceAllocator::new(base.path());

        let workspace = allocator.allocate().unwrap();
        let path = workspace.path().to_path_buf();
        std::fs::write(path.join("partial.txt"), "half a clone").unwrap();

        drop(workspace);
        assert!(!path.exists());
    }

    #[test]
    fn keep_transfers_ownership() {
        let base = tempfile::tempdir().unwrap();
        let allocator = WorkspaceAllocator::new(base.path());

        let workspace = allocator.allocate().unwrap();
        let path = workspace.keep();
        assert!(path.is_dir());
    }
}
