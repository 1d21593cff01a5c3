//! git::refs
//!
//! HEAD resolution: which branch is checked out, and at which commit.

use std::fs;

use super::error::ResolveError;
use super::locate::GitLocation;
use super::odb::ObjectStore;
use crate::core::types::Oid;

/// The resolved state of HEAD.
///
/// `branch` is `None` when the checkout is detached (HEAD holds a raw id)
/// or when HEAD is missing; `oid` is `None` when the branch's target could
/// not be found in either the loose refs or the packed index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadRef {
    /// Branch name with the `refs/heads/` prefix stripped, internal slashes
    /// preserved (`feature/x/y`).
    pub branch: Option<String>,
    /// The commit HEAD points at.
    pub oid: Option<Oid>,
}

/// What a HEAD file's content denotes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeadTarget {
    /// A symbolic ref: the full ref path, e.g. `refs/heads/feature/x`.
    Symbolic(String),
    /// A detached checkout: the raw commit id.
    Detached(Oid),
}

/// Parse one line of HEAD content.
///
/// `ref: <path>` is a symbolic ref. Content without the prefix is a raw id
/// when it is slash-free 40-hex; slash-bearing content is still treated as
/// a symbolic ref path. Returns `None` for anything else.
///
/// # Example
///
/// ```
/// use revinfo::git::refs::{parse_head, HeadTarget};
///
/// let head = parse_head("ref: refs/heads/feature/branch/with/slashes").unwrap();
/// assert_eq!(
///     head,
///     HeadTarget::Symbolic("refs/heads/feature/branch/with/slashes".into())
/// );
///
/// assert!(matches!(
///     parse_head("9dac893d5a83c02344d91e79dad8904889aeacb1").unwrap(),
///     HeadTarget::Detached(_)
/// ));
/// ```
pub fn parse_head(line: &str) -> Option<HeadTarget> {
    let line = line.trim();
    if let Some(target) = line.strip_prefix("ref:") {
        return Some(HeadTarget::Symbolic(target.trim().to_string()));
    }
    if line.contains('/') {
        return Some(HeadTarget::Symbolic(line.to_string()));
    }
    Oid::new(line).ok().map(HeadTarget::Detached)
}

/// Resolve HEAD for a located repository.
///
/// Reads `HEAD` from the worktree metadata directory. A symbolic ref is
/// resolved to its commit by reading the loose ref file under the shared
/// directory first, then falling back to the packed-refs index.
///
/// # Errors
///
/// `MalformedRef` when HEAD content matches no known grammar; IO and
/// packed-index failures propagate from [`ObjectStore`] per its strictness.
pub fn resolve_head(
    location: &GitLocation,
    store: &ObjectStore,
) -> Result<HeadRef, ResolveError> {
    let path = location.worktree_git_dir.join("HEAD");
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(HeadRef::default()),
        Err(source) => return Err(ResolveError::Io { path, source }),
    };
    let line = content.trim();

    match parse_head(line) {
        Some(HeadTarget::Detached(oid)) => Ok(HeadRef {
            branch: None,
            oid: Some(oid),
        }),
        Some(HeadTarget::Symbolic(refname)) => {
            let branch = refname.strip_prefix("refs/heads/").map(str::to_string);
            let oid = match store.loose_ref(&refname)? {
                Some(oid) => Some(oid),
                None => {
                    tracing::debug!(%refname, "no loose ref, trying packed index");
                    store
                        .packed_refs()?
                        .into_iter()
                        .find(|entry| entry.name == refname)
                        .map(|entry| entry.oid)
                }
            };
            Ok(HeadRef { branch, oid })
        }
        None => Err(ResolveError::MalformedRef {
            path,
            content: line.to_string(),
        }),
    }
}
