use std::{path::PathBuf, sync::Arc};

use git2::RemoteCallbacks;
use log::{debug, error};
use thiserror::Error;

use crate::{
    auth::{self, Credentials},
    git::ClonedRepository,
    model::{Commit, RepoUrl, ResolvedCommit, Revision},
    progress::{ProgressDispatcher, ProgressRelay},
    resolver::{self, ResolveError},
    workspace::{Workspace, WorkspaceAllocator, WorkspaceError},
};

#[derive(Error, Debug)]
pub enum CloneError {
    /// Could not even allocate a directory for the clone; nothing was
    /// created, so there is nothing to clean up.
    #[error(transparent)]
    Workspace(#[from] WorkspaceError),
    /// Any failure after the workspace existed. The workspace has already
    /// been deleted by the time this is returned.
    #[error("git clone from {url} failed: {source}")]
    Failed { url: String, source: StageError },
}

#[derive(Error, Debug)]
pub enum StageError {
    #[error("git transport error: {0}")]
    Transport(#[from] git2::Error),
    #[error(transparent)]
    Resolution(#[from] ResolveError),
    #[error("commit {commit} not found for revision {revision}")]
    CommitNotFound { commit: String, revision: String },
    #[error("checkout of commit {commit} failed: {source}")]
    Checkout { commit: String, source: git2::Error },
}

/// Result of a successful clone. The workspace directory now belongs to the
/// caller and has `commit` checked out.
#[derive(Debug)]
pub struct CloneOutcome {
    pub commit: ResolvedCommit,
    pub workspace: PathBuf,
}

/// Clones one repository per call into a private workspace and checks out
/// the requested revision. Guarantees that no workspace survives a failed
/// attempt.
pub struct CloneService {
    allocator: WorkspaceAllocator,
    credentials: Option<Credentials>,
    progress: Option<ProgressRelay>,
}

impl CloneService {
    pub fn new(
        base_dir: impl Into<PathBuf>,
        credentials: Option<Credentials>,
        dispatcher: Option<Arc<dyn ProgressDispatcher>>,
    ) -> Self {
        CloneService {
            allocator: WorkspaceAllocator::new(base_dir),
            credentials,
            progress: dispatcher.map(ProgressRelay::new),
        }
    }

    /// Clones `url` and checks out the commit named by `revision`, or by
    /// `commit` directly when the caller already knows it. On success the
    /// returned workspace is the caller's to keep; on failure it has been
    /// removed and the underlying cause is wrapped with the source URL.
    pub fn clone_repository(
        &self,
        url: &RepoUrl,
        revision: &Revision,
        commit: Option<&Commit>,
    ) -> Result<CloneOutcome, CloneError> {
        let workspace = self.allocator.allocate()?;
        debug!("Cloning {} into {}", url, workspace.path().display());

        match self.clone_and_checkout(url, revision, commit, &workspace) {
            Ok(resolved) => Ok(CloneOutcome {
                commit: resolved,
                workspace: workspace.keep(),
            }),
            Err(source) => {
                error!("Clone of {} failed: {}", url, source);
                // Dropping the workspace removes the partial clone.
                Err(CloneError::Failed {
                    url: url.to_string(),
                    source,
                })
            }
        }
    }

    fn clone_and_checkout(
        &self,
        url: &RepoUrl,
        revision: &Revision,
        commit: Option<&Commit>,
        workspace: &Workspace,
    ) -> Result<ResolvedCommit, StageError> {
        let mut callbacks = RemoteCallbacks::new();
        auth::configure_credentials(self.credentials.as_ref(), &mut callbacks);
        if let Some(progress) = &self.progress {
            progress.attach(&mut callbacks);
        }

        let repository = ClonedRepository::clone(url.as_str(), workspace.path(), callbacks)?;

        match commit {
            Some(commit) => {
                let oid = repository.lookup_commit(commit.as_str())?.ok_or_else(|| {
                    StageError::CommitNotFound {
                        commit: commit.to_string(),
                        revision: revision.to_string(),
                    }
                })?;
                repository
                    .checkout(oid)
                    .map_err(|source| StageError::Checkout {
                        commit: commit.to_string(),
                        source,
                    })?;
                Ok(ResolvedCommit {
                    hash: commit.to_string(),
                    reference: None,
                })
            }
            None => {
                let refs = repository.references()?;
                let resolved = resolver::resolve(revision, &refs)?;
                repository
                    .checkout(resolved.commit)
                    .map_err(|source| StageError::Checkout {
                        commit: resolved.commit.to_string(),
                        source,
                    })?;
                Ok(ResolvedCommit {
                    hash: repository.abbreviate(resolved.commit),
                    reference: Some(resolved.name),
                })
            }
        }
    }
}
