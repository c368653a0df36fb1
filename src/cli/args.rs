use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Clones remote git repositories and checks a requested revision out into a
/// fresh workspace directory.
#[derive(Debug, Parser)]
#[clap(version)]
pub struct CliArgs {
    #[clap(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Clones a repository and checks out the requested revision
    Clone {
        /// Remote repository URL
        url: String,
        /// Revision to check out: a tag, a version fragment or a branch name
        revision: String,
        /// Explicit commit hash; skips revision resolution
        #[clap(short, long)]
        commit: Option<String>,
        /// Base directory for clone workspaces
        #[clap(short, long)]
        workdir: Option<PathBuf>,
        /// Username for HTTPS basic auth; requires --password
        #[clap(long, env = "GITSNAP_USERNAME")]
        username: Option<String>,
        /// Password for HTTPS basic auth
        #[clap(long, env = "GITSNAP_PASSWORD", hide_env_values = true)]
        password: Option<String>,
        /// Personal access token, sent as the HTTPS username
        #[clap(long, env = "GITSNAP_TOKEN", hide_env_values = true)]
        token: Option<String>,
    },
}
