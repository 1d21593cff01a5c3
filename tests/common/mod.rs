//! Shared on-disk repository fixtures for integration tests.
//!
//! Fixtures are written by hand (HEAD, loose refs, packed-refs, pointer
//! files, and zlib-compressed loose objects) so the tests exercise the
//! exact raw formats the crate decodes, without ever invoking a git
//! binary. The metadata directory is named `dot-git` so checkouts of this
//! crate do not treat fixtures as nested repositories.
//!
//! Object ids in fixtures are arbitrary 40-hex strings: the resolver
//! treats ids as opaque content addresses and never recomputes them.

#![allow(dead_code)]

use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use flate2::write::ZlibEncoder;
use flate2::Compression;
use tempfile::TempDir;

/// Metadata directory name used by every fixture.
pub const GIT_DIR: &str = "dot-git";

/// A temporary working directory holding a handwritten repository.
pub struct FixtureRepo {
    _guard: TempDir,
    root: PathBuf,
    main: MetadataDir,
}

impl FixtureRepo {
    pub fn new() -> Self {
        let guard = TempDir::new().expect("failed to create temp dir");
        // Canonicalized so path assertions survive symlinked temp roots.
        let root = guard.path().canonicalize().expect("canonicalize temp dir");
        let main = MetadataDir::create(root.join(GIT_DIR));
        Self {
            _guard: guard,
            root,
            main,
        }
    }

    /// The working directory containing the metadata directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The main metadata directory.
    pub fn git(&self) -> &MetadataDir {
        &self.main
    }

    /// Create a nested working subdirectory, e.g. `foo/bar`.
    pub fn subdir(&self, rel: &str) -> PathBuf {
        let dir = self.root.join(rel);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    /// Create a linked worktree: a per-worktree metadata directory under
    /// `worktrees/<name>` (with `commondir` routing back to the shared
    /// directory) and a working directory with a `gitdir:` pointer file.
    ///
    /// Returns the worktree's working directory; `head` is written as the
    /// worktree's HEAD content verbatim.
    pub fn linked_worktree(&self, name: &str, head: &str) -> PathBuf {
        let worktree_git = self.main.dir().join("worktrees").join(name);
        fs::create_dir_all(&worktree_git).unwrap();
        fs::write(worktree_git.join("commondir"), "../..\n").unwrap();
        fs::write(worktree_git.join("HEAD"), head).unwrap();

        let linked = self.root.join(name);
        fs::create_dir_all(&linked).unwrap();
        fs::write(
            linked.join(GIT_DIR),
            format!("gitdir: {}\n", worktree_git.display()),
        )
        .unwrap();
        linked
    }

    /// Create a submodule checkout: a metadata directory under the
    /// superproject's `modules/<name>` and a working directory whose
    /// pointer file routes into it. There is no `commondir`; the module
    /// directory is also the shared directory.
    ///
    /// Returns the submodule's working directory and its metadata
    /// directory; `head` is written as the module's HEAD content verbatim.
    pub fn submodule(&self, name: &str, head: &str) -> (PathBuf, MetadataDir) {
        let module = MetadataDir::create(self.main.dir().join("modules").join(name));
        fs::write(module.dir().join("HEAD"), head).unwrap();

        let workdir = self.root.join(name);
        fs::create_dir_all(&workdir).unwrap();
        fs::write(
            workdir.join(GIT_DIR),
            format!("gitdir: ../{}/modules/{}\n", GIT_DIR, name),
        )
        .unwrap();
        (workdir, module)
    }
}

/// Write-side helpers for one metadata directory.
pub struct MetadataDir {
    dir: PathBuf,
}

impl MetadataDir {
    fn create(dir: PathBuf) -> Self {
        fs::create_dir_all(dir.join("objects")).unwrap();
        fs::create_dir_all(dir.join("refs").join("heads")).unwrap();
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// HEAD as a symbolic ref to a branch.
    pub fn head_branch(&self, name: &str) {
        fs::write(self.dir.join("HEAD"), format!("ref: refs/heads/{}\n", name)).unwrap();
    }

    /// HEAD as a raw commit id (detached checkout).
    pub fn head_detached(&self, sha: &str) {
        fs::write(self.dir.join("HEAD"), format!("{}\n", sha)).unwrap();
    }

    /// A loose branch ref file; slashes in `name` become directories.
    pub fn branch_ref(&self, name: &str, sha: &str) {
        let path = self.dir.join("refs").join("heads").join(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, format!("{}\n", sha)).unwrap();
    }

    /// A loose tag ref file.
    pub fn tag_ref(&self, name: &str, sha: &str) {
        let path = self.dir.join("refs").join("tags").join(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, format!("{}\n", sha)).unwrap();
    }

    /// The packed-refs text index, verbatim.
    pub fn packed_refs(&self, text: &str) {
        fs::write(self.dir.join("packed-refs"), text).unwrap();
    }

    /// A loose commit object.
    pub fn commit(&self, sha: &str, parents: &[&str], who: &str, epoch: i64, message: &str) {
        let mut body = String::from("tree 1111111111111111111111111111111111111111\n");
        for parent in parents {
            body.push_str(&format!("parent {}\n", parent));
        }
        body.push_str(&format!("author {} {} +0000\n", who, epoch));
        body.push_str(&format!("committer {} {} +0000\n", who, epoch));
        body.push('\n');
        body.push_str(message);
        body.push('\n');
        self.loose_object(sha, "commit", body.as_bytes());
    }

    /// A loose annotated tag object pointing at `target`.
    pub fn annotated_tag(&self, sha: &str, target: &str, name: &str, who: &str, epoch: i64) {
        let body = format!(
            "object {}\ntype commit\ntag {}\ntagger {} {} +0000\n\n{}\n",
            target, name, who, epoch, name
        );
        self.loose_object(sha, "tag", body.as_bytes());
    }

    /// A zlib-deflated loose object with the standard header.
    pub fn loose_object(&self, sha: &str, kind: &str, body: &[u8]) {
        let mut stream = Vec::new();
        stream.extend_from_slice(format!("{} {}\0", kind, body.len()).as_bytes());
        stream.extend_from_slice(body);

        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&stream).unwrap();
        let compressed = encoder.finish().unwrap();

        let path = self
            .dir
            .join("objects")
            .join(&sha[..2])
            .join(&sha[2..]);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, compressed).unwrap();
    }
}
