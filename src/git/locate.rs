//! git::locate
//!
//! Repository discovery: find the metadata directory for a working
//! directory, resolving linked-worktree and submodule indirection.
//!
//! # Layouts
//!
//! Three on-disk layouts produce a [`GitLocation`]:
//!
//! - **Plain repository**: `.git` is a directory. It is both the worktree
//!   dir and the common dir.
//! - **Linked worktree**: `.git` is a file `gitdir: <path>` pointing at
//!   `<main>/.git/worktrees/<name>`, which contains a `commondir` file
//!   routing back to the shared `.git`.
//! - **Submodule**: `.git` is a file pointing into the superproject's
//!   `.git/modules/<name>`. There is no `commondir`; the pointed-at
//!   directory is also the common dir.
//!
//! The metadata directory name is a parameter (default `.git`), threaded
//! through every call rather than held in process-wide state, so concurrent
//! resolutions with different names cannot interfere.

use std::fs;
use std::path::{Path, PathBuf};

use super::error::ResolveError;

/// The resolved location of a repository's metadata store.
///
/// # Invariants
///
/// - `common_git_dir` holds `objects/`, `refs/`, and `packed-refs`
/// - `worktree_git_dir` holds `HEAD`
/// - For a plain repository the two are equal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitLocation {
    /// Per-checkout metadata directory (holds HEAD).
    pub worktree_git_dir: PathBuf,

    /// Shared metadata directory (holds objects, refs, packed-refs).
    /// Equals `worktree_git_dir` for plain repositories and submodules.
    pub common_git_dir: PathBuf,

    /// The checkout's own working directory: the directory in which the
    /// metadata entry was found. For a linked worktree this is the
    /// worktree's working directory, not the main repository's; for a
    /// submodule it is the submodule's working directory.
    pub root: PathBuf,
}

impl GitLocation {
    /// Check if this is a linked worktree (worktree dir differs from the
    /// shared dir).
    pub fn is_linked(&self) -> bool {
        self.worktree_git_dir != self.common_git_dir
    }
}

/// Find the repository metadata directory for `start`.
///
/// Checks for an entry named `metadata_dir` in `start`, then walks upward
/// one parent at a time until found or the filesystem root is reached.
/// Relative starting paths are resolved against the current working
/// directory, so a submodule can be located by its relative name.
///
/// Returns `Ok(None)` when no repository is found; that is an answer, not
/// an error.
///
/// # Errors
///
/// Returns an error only when a metadata entry was found but could not be
/// decoded: an unreadable or malformed pointer file, or an unreadable
/// `commondir` file.
pub fn locate(start: &Path, metadata_dir: &str) -> Result<Option<GitLocation>, ResolveError> {
    let mut current = absolutize(start)?;

    loop {
        let candidate = current.join(metadata_dir);
        match fs::metadata(&candidate) {
            Ok(meta) if meta.is_dir() => {
                tracing::debug!(path = %candidate.display(), "found metadata directory");
                return Ok(Some(GitLocation {
                    worktree_git_dir: candidate.clone(),
                    common_git_dir: candidate,
                    root: current,
                }));
            }
            Ok(_) => {
                tracing::debug!(path = %candidate.display(), "found metadata pointer file");
                return follow_pointer(&candidate, current).map(Some);
            }
            Err(_) => {}
        }

        match current.parent() {
            Some(parent) if parent != current => current = parent.to_path_buf(),
            _ => break, // filesystem root
        }
    }

    Ok(None)
}

/// Resolve a `gitdir: <path>` pointer file found at `pointer`.
///
/// The pointed-at directory is the worktree metadata directory. A
/// `commondir` file inside it, if present, holds a path (relative to that
/// directory) to the shared metadata directory; if absent the two coincide,
/// which is the submodule case.
fn follow_pointer(pointer: &Path, root: PathBuf) -> Result<GitLocation, ResolveError> {
    let content = read_trimmed(pointer)?;
    let target = content
        .strip_prefix("gitdir:")
        .ok_or_else(|| ResolveError::MalformedRef {
            path: pointer.to_path_buf(),
            content: content.clone(),
        })?
        .trim();

    let worktree_git_dir = normalize(&root, Path::new(target));

    let commondir_file = worktree_git_dir.join("commondir");
    let common_git_dir = if commondir_file.is_file() {
        let relative = read_trimmed(&commondir_file)?;
        normalize(&worktree_git_dir, Path::new(&relative))
    } else {
        worktree_git_dir.clone()
    };

    Ok(GitLocation {
        worktree_git_dir,
        common_git_dir,
        root,
    })
}

/// Read a single-line metadata file, trimming trailing whitespace.
fn read_trimmed(path: &Path) -> Result<String, ResolveError> {
    let content = fs::read_to_string(path).map_err(|source| ResolveError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(content.trim().to_string())
}

/// Resolve `path` against `base` and collapse `..` segments.
///
/// Canonicalization is preferred because worktree pointers routinely contain
/// relative hops; when the target does not exist yet the lexical join is
/// kept as-is.
fn normalize(base: &Path, path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    };
    match joined.canonicalize() {
        Ok(resolved) => resolved,
        Err(_) => joined,
    }
}

/// Make `start` absolute against the current working directory.
fn absolutize(start: &Path) -> Result<PathBuf, ResolveError> {
    if start.is_absolute() {
        return Ok(start.to_path_buf());
    }
    let cwd = std::env::current_dir().map_err(|source| ResolveError::Io {
        path: start.to_path_buf(),
        source,
    })?;
    Ok(cwd.join(start))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tempdir() -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().canonicalize().unwrap();
        (dir, path)
    }

    #[test]
    fn finds_plain_repo_in_current_directory() {
        let (_guard, base) = tempdir();
        fs::create_dir(base.join("dot-git")).unwrap();

        let location = locate(&base, "dot-git").unwrap().unwrap();
        assert_eq!(location.worktree_git_dir, base.join("dot-git"));
        assert_eq!(location.common_git_dir, base.join("dot-git"));
        assert_eq!(location.root, base);
        assert!(!location.is_linked());
    }

    #[test]
    fn finds_plain_repo_two_levels_up() {
        let (_guard, base) = tempdir();
        fs::create_dir(base.join("dot-git")).unwrap();
        fs::create_dir_all(base.join("foo/bar")).unwrap();

        let location = locate(&base.join("foo/bar"), "dot-git").unwrap().unwrap();
        assert_eq!(location.root, base);
    }

    #[test]
    fn missing_repo_is_none() {
        let (_guard, base) = tempdir();
        assert!(locate(&base, "dot-git").unwrap().is_none());
    }

    #[test]
    fn pointer_file_without_commondir_is_submodule_layout() {
        let (_guard, base) = tempdir();
        let module_git = base.join("dot-git/modules/my-submodule");
        fs::create_dir_all(&module_git).unwrap();
        let sub = base.join("my-submodule");
        fs::create_dir(&sub).unwrap();
        fs::write(
            sub.join("dot-git"),
            "gitdir: ../dot-git/modules/my-submodule\n",
        )
        .unwrap();

        let location = locate(&sub, "dot-git").unwrap().unwrap();
        assert_eq!(location.worktree_git_dir, module_git);
        assert_eq!(location.common_git_dir, module_git);
        assert_eq!(location.root, sub);
        assert!(!location.is_linked());
    }

    #[test]
    fn pointer_file_with_commondir_is_worktree_layout() {
        let (_guard, base) = tempdir();
        let worktree_git = base.join("dot-git/worktrees/linked");
        fs::create_dir_all(&worktree_git).unwrap();
        fs::write(worktree_git.join("commondir"), "../..\n").unwrap();
        let linked = base.join("linked");
        fs::create_dir(&linked).unwrap();
        fs::write(
            linked.join("dot-git"),
            format!("gitdir: {}\n", worktree_git.display()),
        )
        .unwrap();

        let location = locate(&linked, "dot-git").unwrap().unwrap();
        assert_eq!(location.worktree_git_dir, worktree_git);
        assert_eq!(location.common_git_dir, base.join("dot-git"));
        assert_eq!(location.root, linked);
        assert!(location.is_linked());
    }

    #[test]
    fn malformed_pointer_file_is_an_error() {
        let (_guard, base) = tempdir();
        fs::write(base.join("dot-git"), "this is not a pointer\n").unwrap();

        let err = locate(&base, "dot-git").unwrap_err();
        assert!(matches!(err, ResolveError::MalformedRef { .. }));
    }
}
