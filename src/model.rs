use std::{fmt, str::FromStr};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("repository URL cannot be empty")]
    EmptyUrl,
    #[error("commit `{0}` is not a hexadecimal object id")]
    InvalidCommit(String),
}

/// Remote repository location. Opaque to the rest of the crate beyond being
/// non-empty; the transport decides what URLs it understands.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RepoUrl(String);

impl RepoUrl {
    pub fn new(value: impl Into<String>) -> Result<Self, ParseError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ParseError::EmptyUrl);
        }
        Ok(RepoUrl(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RepoUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for RepoUrl {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RepoUrl::new(s)
    }
}

/// Requested point in history: a tag name, a version fragment like
/// `v2.14.1-final`, or a branch name. Not guaranteed to name any reference
/// verbatim; resolution is heuristic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Revision(String);

impl Revision {
    pub fn new(value: impl Into<String>) -> Self {
        Revision(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Explicit commit identifier supplied by the caller, full or abbreviated.
/// When present it short-circuits revision resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Commit(String);

impl Commit {
    pub fn new(value: impl Into<String>) -> Result<Self, ParseError> {
        let value = value.into();
        if value.is_empty() || !value.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ParseError::InvalidCommit(value));
        }
        Ok(Commit(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Commit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Commit {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Commit::new(s)
    }
}

/// The commit actually checked out in a workspace: an abbreviated hash plus
/// the reference it was resolved from, when heuristic resolution ran.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedCommit {
    pub hash: String,
    pub reference: Option<String>,
}
