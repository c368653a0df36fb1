use std::path::PathBuf;

use log::info;

use crate::{
    auth::Credentials,
    model::{Commit, RepoUrl, Revision},
    Gitsnap,
};

/// Handler for the clone command. Prints the short commit hash and the
/// workspace path on success.
pub fn do_clone(
    url: String,
    revision: String,
    commit: Option<String>,
    workdir: Option<PathBuf>,
    credentials: Option<Credentials>,
) -> anyhow::Result<()> {
    let url = RepoUrl::new(url)?;
    let revision = Revision::new(revision);
    let commit = commit.map(Commit::new).transpose()?;

    let mut builder = Gitsnap::builder();
    if let Some(workdir) = workdir {
        builder = builder.base_dir(workdir);
    }
    if let Some(credentials) = credentials {
        builder = builder.credentials(credentials);
    }
    let gitsnap = builder.try_build()?;

    let outcome = gitsnap.clone_repository(&url, &revision, commit.as_ref())?;

    match &outcome.commit.reference {
        Some(reference) => info!(
            "Checked out {} ({}) from {}",
            outcome.commit.hash, reference, url
        ),
        None => info!("Checked out {} from {}", outcome.commit.hash, url),
    }
    println!("{} {}", outcome.commit.hash, outcome.workspace.display());

    Ok(())
}
