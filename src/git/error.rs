//! git::error
//!
//! Error taxonomy for metadata resolution.
//!
//! Failures are categorized so higher layers can decide how much of the
//! result a failure should cost. In default mode every variant is caught at
//! the boundary of the component that produced it and degrades only the
//! fields that component was responsible for; in strict mode the first
//! failure aborts the whole resolution.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from metadata resolution.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// No metadata directory reachable from the starting path.
    ///
    /// In default mode this is not an error at all: resolution yields a
    /// structurally complete, all-null result instead.
    #[error("no repository metadata directory found from {path}")]
    NotFound {
        /// The starting path of the upward search
        path: PathBuf,
    },

    /// An object's bytes could not be decoded.
    ///
    /// Covers malformed zlib streams, header/size mismatches, and object
    /// bodies that do not match their declared type. Degrades the fields
    /// derived from that object, never the whole call.
    #[error("cannot decode object {oid}: {reason}")]
    DecodeUnavailable {
        /// The id of the object that failed to decode
        oid: String,
        /// What went wrong
        reason: String,
    },

    /// A ref file, HEAD, or pointer file does not match its grammar.
    #[error("malformed ref content in {path}: {content:?}")]
    MalformedRef {
        /// The file that was being decoded
        path: PathBuf,
        /// The offending content (trimmed)
        content: String,
    },

    /// Filesystem error other than simple absence.
    ///
    /// Missing files are modeled as absence, not as this variant.
    #[error("error reading {path}")]
    Io {
        /// The path being read
        path: PathBuf,
        /// The underlying error
        #[source]
        source: std::io::Error,
    },
}
