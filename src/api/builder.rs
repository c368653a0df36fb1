use std::{path::PathBuf, sync::Arc};

use home::home_dir;

use crate::{
    auth::Credentials, config::GitsnapConfig, progress::ProgressDispatcher,
    service::CloneService, Gitsnap,
};

#[derive(Default)]
pub struct GitsnapBuilder {
    base_dir: Option<PathBuf>,
    credentials: Option<Credentials>,
    progress: Option<Arc<dyn ProgressDispatcher>>,
}

impl GitsnapBuilder {
    /// Base directory under which clone workspaces are created.
    ///
    /// Defaults to the `GITSNAP_CLONE_DIR` environment variable, or
    /// `$HOME/.gitsnap/workspaces`.
    pub fn base_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(path.into());
        self
    }

    /// Credentials for the remote transport. Without them the clone is
    /// attempted unauthenticated.
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Sink for human-readable clone progress. Without one, no progress is
    /// reported.
    pub fn progress(mut self, dispatcher: Arc<dyn ProgressDispatcher>) -> Self {
        self.progress = Some(dispatcher);
        self
    }

    pub fn try_build(self) -> anyhow::Result<Gitsnap> {
        let Self {
            base_dir,
            credentials,
            progress,
        } = self;

        let config = GitsnapConfig::load()?;

        let base_dir = base_dir
            .or(config.clone_dir)
            .unwrap_or_else(default_clone_directory);

        Ok(Gitsnap {
            service: CloneService::new(base_dir, credentials, progress),
        })
    }
}

fn default_clone_directory() -> PathBuf {
    let mut clone_directory =
        home_dir().expect("Could not find home dir. Please define $HOME env variable.");
    clone_directory.push(".gitsnap/workspaces");
    clone_directory
}
