use crate::{
    model::{Commit, RepoUrl, Revision},
    service::{CloneError, CloneOutcome, CloneService},
};

mod builder;

pub use builder::GitsnapBuilder;

/// Public entry point: clones remote repositories and materializes a
/// requested revision into a fresh workspace directory.
pub struct Gitsnap {
    service: CloneService,
}

impl Gitsnap {
    pub fn builder() -> GitsnapBuilder {
        GitsnapBuilder::default()
    }

    /// Clones `url` and checks out `revision`, or `commit` directly when one
    /// is supplied. On success the returned workspace belongs to the caller;
    /// on failure no directory is left behind.
    pub fn clone_repository(
        &self,
        url: &RepoUrl,
        revision: &Revision,
        commit: Option<&Commit>,
    ) -> Result<CloneOutcome, CloneError> {
        self.service.clone_repository(url, revision, commit)
    }
}
