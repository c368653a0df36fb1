use std::sync::OnceLock;

use git2::Oid;
use log::info;
use regex_lite::Regex;
use thiserror::Error;

use crate::model::Revision;

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("revision not found: {revision}")]
    RevisionNotFound { revision: String },
    #[error("commit not found for revision {revision}")]
    CommitNotFound { revision: String },
}

/// A reference visible in the cloned repository. `peeled` carries the target
/// commit of an annotated tag, when it differs from the tag object itself.
#[derive(Clone, Debug)]
pub struct RefEntry {
    pub name: String,
    pub target: Option<Oid>,
    pub peeled: Option<Oid>,
}

/// The reference a revision string resolved to, and the commit it points at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedRef {
    pub name: String,
    pub commit: Oid,
}

/// Resolves a revision string against the reference set, trying in order:
/// an exact reference-name match, a reference ending in the first embedded
/// version number (with `.` or `_` separators), and a local or
/// remote-tracking branch whose final path segment is the revision.
///
/// Stage two and three matching is deliberately loose (ends-with rather than
/// equals) to tolerate inconsistent upstream tag and branch naming. Ties go
/// to the first entry in slice order, so callers wanting reproducible picks
/// must hand in a deterministically ordered slice.
pub fn resolve(revision: &Revision, refs: &[RefEntry]) -> Result<ResolvedRef, ResolveError> {
    let entry = exact_match(revision, refs)
        .or_else(|| version_fragment_match(revision, refs))
        .or_else(|| branch_suffix_match(revision, refs))
        .ok_or_else(|| ResolveError::RevisionNotFound {
            revision: revision.to_string(),
        })?;

    info!("Found revision {}", entry.name);

    let commit = entry
        .peeled
        .or(entry.target)
        .ok_or_else(|| ResolveError::CommitNotFound {
            revision: revision.to_string(),
        })?;

    Ok(ResolvedRef {
        name: entry.name.clone(),
        commit,
    })
}

fn exact_match<'a>(revision: &Revision, refs: &'a [RefEntry]) -> Option<&'a RefEntry> {
    refs.iter().find(|r| r.name == revision.as_str())
}

fn version_fragment_match<'a>(revision: &Revision, refs: &'a [RefEntry]) -> Option<&'a RefEntry> {
    let version = extract_version(revision.as_str())?;
    let underscored = version.replace('.', "_");
    refs.iter()
        .find(|r| r.name.ends_with(&version) || r.name.ends_with(&underscored))
}

fn branch_suffix_match<'a>(revision: &Revision, refs: &'a [RefEntry]) -> Option<&'a RefEntry> {
    let suffix = format!("/{}", revision.as_str());
    refs.iter().find(|r| {
        r.name.ends_with(&suffix)
            && (r.name.starts_with("refs/heads/") || r.name.starts_with("refs/remotes/"))
    })
}

/// First run of dot-separated numeric groups in the revision string, e.g.
/// `2.14.1` out of `v2.14.1-release`. Later occurrences are ignored.
fn extract_version(revision: &str) -> Option<String> {
    fn pattern() -> &'static Regex {
        static PATTERN: OnceLock<Regex> = OnceLock::new();
        PATTERN.get_or_init(|| {
            Regex::new(r"\b\d+(?:\.\d+)+\b").expect("version pattern is valid")
        })
    }
    pattern()
        .find(revision)
        .map(|found| found.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    fn oid(byte: u8) -> Oid {
        let hex: String = std::iter::repeat(format!("{byte:02x}")).take(20).collect();
        Oid::from_str(&hex).unwrap()
    }

    fn direct(name: &str, byte: u8) -> RefEntry {
        RefEntry {
            name: name.to_string(),
            target: Some(oid(byte)),
            peeled: None,
        }
    }

    #[test]
    fn exact_name_wins_over_fuzzy_matches() {
        let refs = [direct("release/v1.2.0", 1), direct("v1.2.0", 2)];
        let resolved = resolve(&Revision::new("v1.2.0"), &refs).unwrap();
        assert_eq!(resolved.name, "v1.2.0");
        assert_eq!(resolved.commit, oid(2));
    }

    #[test]
    fn version_fragment_matches_dotted_suffix() {
        let refs = [direct("refs/heads/main", 1), direct("refs/tags/2.14.1", 2)];
        let resolved = resolve(&Revision::new("v2.14.1-final"), &refs).unwrap();
        assert_eq!(resolved.name, "refs/tags/2.14.1");
    }

    #[test]
    fn version_fragment_matches_underscored_suffix() {
        let refs = [direct("refs/heads/main", 1), direct("refs/tags/2_14_1", 2)];
        let resolved = resolve(&Revision::new("v2.14.1-final"), &refs).unwrap();
        assert_eq!(resolved.name, "refs/tags/2_14_1");
    }

    #[test]
    fn only_the_first_version_fragment_is_considered() {
        let refs = [direct("refs/tags/9.9.9", 1), direct("refs/tags/1.0.0", 2)];
        // `1.0.0` occurs first in the revision string; `9.9.9` is ignored.
        let resolved = resolve(&Revision::new("app-1.0.0-build-9.9.9"), &refs).unwrap();
        assert_eq!(resolved.name, "refs/tags/1.0.0");
    }

    #[test]
    fn branch_suffix_requires_branch_namespace() {
        let refs = [
            direct("refs/notes/main", 1),
            direct("refs/remotes/origin/main", 2),
        ];
        let resolved = resolve(&Revision::new("main"), &refs).unwrap();
        assert_eq!(resolved.name, "refs/remotes/origin/main");
    }

    #[test]
    fn local_branch_matches_by_final_segment() {
        let refs = [direct("refs/heads/main", 1)];
        let resolved = resolve(&Revision::new("main"), &refs).unwrap();
        assert_eq!(resolved.name, "refs/heads/main");
        assert_eq!(resolved.commit, oid(1));
    }

    #[test]
    fn wrong_namespace_alone_does_not_match() {
        let refs = [direct("refs/notes/main", 1)];
        let result = resolve(&Revision::new("main"), &refs);
        assert!(matches!(
            result,
            Err(ResolveError::RevisionNotFound { .. })
        ));
    }

    #[test]
    fn unmatched_revision_fails() {
        let refs = [direct("refs/heads/main", 1), direct("refs/tags/v1.0.0", 2)];
        let result = resolve(&Revision::new("nonexistent-xyz"), &refs);
        assert!(matches!(
            result,
            Err(ResolveError::RevisionNotFound { .. })
        ));
    }

    #[test]
    fn annotated_tag_resolves_to_peeled_target() {
        let refs = [RefEntry {
            name: "refs/tags/v1.0.0".to_string(),
            target: Some(oid(1)),
            peeled: Some(oid(2)),
        }];
        let resolved = resolve(&Revision::new("refs/tags/v1.0.0"), &refs).unwrap();
        assert_eq!(resolved.commit, oid(2));
    }

    #[test]
    fn reference_without_any_target_fails() {
        let refs = [RefEntry {
            name: "refs/tags/v1.0.0".to_string(),
            target: None,
            peeled: None,
        }];
        let result = resolve(&Revision::new("refs/tags/v1.0.0"), &refs);
        assert!(matches!(result, Err(ResolveError::CommitNotFound { .. })));
    }

    #[test]
    fn extracts_first_dotted_run_only() {
        assert_eq!(extract_version("v2.14.1-release"), Some("2.14.1".to_string()));
        assert_eq!(extract_version("1.2 then 3.4"), Some("1.2".to_string()));
        assert_eq!(extract_version("main"), None);
        assert_eq!(extract_version("42"), None);
    }
}
