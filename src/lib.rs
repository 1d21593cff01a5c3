//! revinfo - Resolve version-control metadata without invoking git
//!
//! revinfo answers, from raw bytes on disk, the questions a build usually
//! shells out to git for: which branch is checked out (or that the checkout
//! is detached), which commit it points at, the commit's author, committer,
//! message, and parents, which tag names that commit, and how far away the
//! nearest tagged ancestor is.
//!
//! # Architecture
//!
//! The codebase follows a layered architecture:
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates)
//! - [`git`] - Single doorway to on-disk repository metadata
//! - [`core`] - Strong domain types
//!
//! # Correctness Invariants
//!
//! 1. Every operation is a pure read of current on-disk state; nothing is
//!    cached across calls and nothing on disk is ever mutated
//! 2. Configuration is threaded per call, never held in process-wide state
//! 3. In default mode a sub-resolution failure degrades only the fields it
//!    was responsible for; the result is always structurally complete
//!
//! # Example
//!
//! ```no_run
//! use revinfo::git::{resolve_with, ResolveOptions};
//!
//! let info = resolve_with(None, &ResolveOptions::default())?;
//! match (&info.branch, &info.abbreviated_sha) {
//!     (Some(branch), Some(sha)) => println!("{branch} @ {sha}"),
//!     (None, Some(sha)) => println!("detached @ {sha}"),
//!     _ => println!("not a repository"),
//! }
//! # Ok::<(), revinfo::git::ResolveError>(())
//! ```

pub mod cli;
pub mod core;
pub mod git;
