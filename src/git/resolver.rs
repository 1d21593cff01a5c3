//! git::resolver
//!
//! Top-level assembly: locate the repository, resolve HEAD, name the
//! commit's tag, walk for the nearest tagged ancestor, and return one
//! structurally complete [`RepoInfo`].
//!
//! # Degradation model
//!
//! Every sub-resolution is caught at its own boundary. In default mode a
//! failure costs only the fields that stage was responsible for (a
//! malformed tag object cannot blank out branch or commit data that was
//! otherwise resolvable) and the call always returns a value. In strict
//! mode the first failure aborts the call, which is what test suites and
//! environment checks want.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ancestry::nearest_tagged_ancestor;
use super::error::ResolveError;
use super::locate::locate;
use super::object::CommitObject;
use super::odb::{ObjectKind, ObjectStore};
use super::refs::resolve_head;
use super::tags::TagIndex;
use crate::core::types::Oid;

/// Per-call configuration.
///
/// There is deliberately no process-wide state behind this: concurrent
/// resolutions with different options cannot interfere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Surface the first sub-resolution failure instead of degrading the
    /// affected fields. Default: off.
    pub strict: bool,

    /// Name of the metadata directory entry to search for. Default `.git`;
    /// test fixtures use names like `dot-git` so checkouts of this crate
    /// do not treat them as nested repositories.
    pub metadata_dir: String,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            strict: false,
            metadata_dir: ".git".to_string(),
        }
    }
}

impl ResolveOptions {
    /// Enable or disable strict failure propagation.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Use a different metadata directory name.
    pub fn metadata_dir(mut self, name: impl Into<String>) -> Self {
        self.metadata_dir = name.into();
        self
    }
}

/// Everything revinfo can say about a checkout.
///
/// Serialized field names are camelCase (`abbreviatedSha`, `lastTag`, ...) so
/// the `--json` output slots into build pipelines that consume this shape.
///
/// # Invariants
///
/// - `abbreviated_sha` is the first 10 characters of `sha`; both are `None`
///   together.
/// - `branch` is `None` iff HEAD holds a raw id (detached) or no repository
///   was found.
/// - `tag` is `Some` iff a tag directly names `sha`; `last_tag` and
///   `commits_since_last_tag` are the nearest tagged *ancestor* (distance 0
///   when `tag` itself is set).
/// - `commits_since_last_tag` is `None` iff no tagged commit is reachable
///   through the history available as loose objects: the unbounded
///   distance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoInfo {
    pub branch: Option<String>,
    pub sha: Option<Oid>,
    pub abbreviated_sha: Option<String>,
    pub tag: Option<String>,
    pub committer: Option<String>,
    pub committer_date: Option<DateTime<Utc>>,
    pub author: Option<String>,
    pub author_date: Option<DateTime<Utc>>,
    pub commit_message: Option<String>,
    /// Parent ids of the checked-out commit; empty when the commit is a
    /// root commit or could not be decoded.
    #[serde(default)]
    pub parents: Vec<Oid>,
    pub root: Option<PathBuf>,
    pub common_git_dir: Option<PathBuf>,
    pub worktree_git_dir: Option<PathBuf>,
    pub last_tag: Option<String>,
    pub commits_since_last_tag: Option<u64>,
}

/// Resolve repository metadata for the current working directory with
/// default options.
///
/// Never fails: with no repository in reach the result is structurally
/// complete with every field unset.
pub fn resolve() -> RepoInfo {
    resolve_with(None, &ResolveOptions::default()).unwrap_or_default()
}

/// Resolve repository metadata starting from `start` with default options.
///
/// `start` may be any directory inside the checkout, or a path (relative
/// paths are resolved against the current working directory) naming e.g. a
/// submodule.
pub fn resolve_from(start: impl AsRef<Path>) -> RepoInfo {
    resolve_with(Some(start.as_ref()), &ResolveOptions::default()).unwrap_or_default()
}

/// Resolve repository metadata with explicit options.
///
/// With `options.strict` unset this never returns `Err`. With it set, the
/// first failure is surfaced, including finding no repository at all.
pub fn resolve_with(
    start: Option<&Path>,
    options: &ResolveOptions,
) -> Result<RepoInfo, ResolveError> {
    let start: PathBuf = match start {
        Some(path) => path.to_path_buf(),
        None => match std::env::current_dir() {
            Ok(cwd) => cwd,
            Err(source) => {
                let err = ResolveError::Io {
                    path: PathBuf::from("."),
                    source,
                };
                if options.strict {
                    return Err(err);
                }
                tracing::debug!(error = %err, "cannot determine working directory");
                return Ok(RepoInfo::default());
            }
        },
    };

    let location = match locate(&start, &options.metadata_dir) {
        Ok(Some(location)) => location,
        Ok(None) => {
            if options.strict {
                return Err(ResolveError::NotFound { path: start });
            }
            return Ok(RepoInfo::default());
        }
        Err(err) => {
            if options.strict {
                return Err(err);
            }
            tracing::debug!(error = %err, "repository discovery failed");
            return Ok(RepoInfo::default());
        }
    };

    let store = ObjectStore::new(location.common_git_dir.clone(), options.strict);

    let head = soften(resolve_head(&location, &store), options.strict)?;
    let tags = soften(TagIndex::load(&store), options.strict)?;

    let mut info = RepoInfo {
        branch: head.branch,
        root: Some(location.root),
        common_git_dir: Some(location.common_git_dir),
        worktree_git_dir: Some(location.worktree_git_dir),
        ..RepoInfo::default()
    };

    if let Some(sha) = head.oid {
        info.abbreviated_sha = Some(sha.short(10).to_string());
        info.tag = tags.name_for(&sha).map(str::to_string);

        if let Some(object) = soften(store.read_loose(&sha), options.strict)? {
            if object.kind == ObjectKind::Commit {
                let commit = CommitObject::parse(sha.clone(), &object.body);
                info.parents = commit.parents;
                info.commit_message = Some(commit.message);
                if let Some(author) = commit.author {
                    info.author = Some(author.who);
                    info.author_date = author.when;
                }
                if let Some(committer) = commit.committer {
                    info.committer = Some(committer.who);
                    info.committer_date = committer.when;
                }
            }
        }

        if let Some(found) = soften(nearest_tagged_ancestor(&store, &tags, &sha), options.strict)?
        {
            info.last_tag = Some(found.tag);
            info.commits_since_last_tag = Some(found.distance);
        }

        info.sha = Some(sha);
    }

    Ok(info)
}

/// Apply the propagation policy to one sub-resolution: strict surfaces the
/// failure, default logs it and substitutes the stage's empty value.
fn soften<T: Default>(
    result: Result<T, ResolveError>,
    strict: bool,
) -> Result<T, ResolveError> {
    match result {
        Ok(value) => Ok(value),
        Err(err) if strict => Err(err),
        Err(err) => {
            tracing::debug!(error = %err, "degrading failed sub-resolution");
            Ok(T::default())
        }
    }
}
