//! git
//!
//! Single doorway to on-disk repository metadata.
//!
//! # Architecture
//!
//! All repository reads flow through this module; nothing here writes, and
//! nothing shells out to a git binary or links a git library. The on-disk
//! formats (HEAD, loose refs, the packed-refs text index, zlib-compressed
//! loose objects, worktree pointer files) are decoded directly from raw
//! bytes. Binary pack files are never decoded: history that exists only
//! inside a pack degrades the affected fields instead of failing the call.
//!
//! # Pipeline
//!
//! - [`locate()`] finds the metadata directory (plain, linked-worktree, or
//!   submodule layout)
//! - [`refs`] resolves HEAD to a branch and commit
//! - [`odb`] reads loose objects and the packed-refs index
//! - [`tags`] names commits from packed and loose tags
//! - [`ancestry`] walks the parent graph for the nearest tagged ancestor
//! - [`resolve_with()`] assembles the public [`RepoInfo`]
//!
//! # Example
//!
//! ```no_run
//! use revinfo::git::resolve;
//!
//! let info = resolve();
//! if let Some(branch) = &info.branch {
//!     println!("on {branch}");
//! }
//! ```

pub mod ancestry;
pub mod error;
pub mod locate;
pub mod object;
pub mod odb;
pub mod refs;
pub mod tags;
mod resolver;

pub use ancestry::TaggedAncestor;
pub use error::ResolveError;
pub use locate::{locate, GitLocation};
pub use resolver::{resolve, resolve_from, resolve_with, RepoInfo, ResolveOptions};
