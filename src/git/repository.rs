use std::path::Path;

use git2::{
    build::{CheckoutBuilder, RepoBuilder},
    ErrorCode, FetchOptions, Oid, RemoteCallbacks, Repository,
};
use log::trace;

use crate::resolver::RefEntry;

const SHORT_HASH_LEN: usize = 7;

/// A repository freshly cloned into a workspace, wrapping the git2 transport
/// for the few operations the clone service needs.
pub struct ClonedRepository {
    git_repo: Repository,
}

impl ClonedRepository {
    /// Clones `url` into `destination` with the given remote callbacks
    /// (credentials and progress reporting).
    pub fn clone(
        url: &str,
        destination: &Path,
        callbacks: RemoteCallbacks<'static>,
    ) -> Result<Self, git2::Error> {
        trace!("Cloning {} into {}", url, destination.display());
        let mut fetch_options = FetchOptions::new();
        fetch_options.remote_callbacks(callbacks);
        let git_repo = RepoBuilder::new()
            .fetch_options(fetch_options)
            .clone(url, destination)?;
        Ok(ClonedRepository { git_repo })
    }

    /// Snapshot of all references, sorted by name so heuristic matching is
    /// reproducible across clones of the same repository.
    pub fn references(&self) -> Result<Vec<RefEntry>, git2::Error> {
        let mut entries = Vec::new();
        for reference in self.git_repo.references()? {
            let reference = reference?;
            let Some(name) = reference.name() else {
                // Non-utf8 reference names cannot match a revision string.
                continue;
            };
            let target = reference.target();
            let peeled = reference.target_peel().or_else(|| {
                if reference.is_tag() {
                    reference
                        .peel_to_commit()
                        .ok()
                        .map(|commit| commit.id())
                        .filter(|id| Some(*id) != target)
                } else {
                    None
                }
            });
            entries.push(RefEntry {
                name: name.to_string(),
                target,
                peeled,
            });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    /// Looks up a possibly abbreviated commit hash. `Ok(None)` means the
    /// repository has no such commit; transport errors are passed through.
    pub fn lookup_commit(&self, hash: &str) -> Result<Option<Oid>, git2::Error> {
        match self.git_repo.revparse_single(hash) {
            Ok(object) => Ok(object.peel_to_commit().ok().map(|commit| commit.id())),
            Err(error) if error.code() == ErrorCode::NotFound => Ok(None),
            Err(error) => Err(error),
        }
    }

    /// Checks out the working tree at `commit` and detaches HEAD onto it.
    pub fn checkout(&self, commit: Oid) -> Result<(), git2::Error> {
        let object = self.git_repo.find_object(commit, None)?;
        let mut checkout = CheckoutBuilder::new();
        checkout.force();
        self.git_repo.checkout_tree(&object, Some(&mut checkout))?;
        self.git_repo.set_head_detached(commit)?;
        Ok(())
    }

    /// Short, human-readable form of a commit id.
    pub fn abbreviate(&self, commit: Oid) -> String {
        let mut hash = commit.to_string();
        hash.truncate(SHORT_HASH_LEN);
        hash
    }
}
