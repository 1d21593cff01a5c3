//! git::odb
//!
//! Read-only access to the on-disk object and ref stores under the shared
//! metadata directory.
//!
//! # Representations
//!
//! The same logical tables exist on disk in two representations each:
//!
//! - refs live as loose single-line files under `refs/` and as lines in the
//!   `packed-refs` text index;
//! - objects live as zlib-deflated loose files under `objects/` and inside
//!   binary pack files.
//!
//! [`ObjectStore`] is the single doorway to both loose representations and
//! to the packed-refs *text* index. Binary pack files are deliberately not
//! decoded; an object that exists only in a pack is reported as absent, and
//! callers degrade the fields derived from it.
//!
//! # Absence vs failure
//!
//! A missing file is always an answer (`Ok(None)` / empty), never an error.
//! Malformed bytes are an error in strict mode; in default mode they are
//! logged and reported as absence so one bad object cannot blank out the
//! rest of the resolution.

use std::fs;
use std::io::Read;
use std::path::PathBuf;

use flate2::read::ZlibDecoder;

use super::error::ResolveError;
use crate::core::types::Oid;

/// The type of a decoded loose object, from its header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Commit,
    Tree,
    Blob,
    Tag,
}

impl ObjectKind {
    fn from_header(kind: &str) -> Option<Self> {
        match kind {
            "commit" => Some(ObjectKind::Commit),
            "tree" => Some(ObjectKind::Tree),
            "blob" => Some(ObjectKind::Blob),
            "tag" => Some(ObjectKind::Tag),
            _ => None,
        }
    }
}

/// A decoded loose object: its header type and raw body bytes.
#[derive(Debug, Clone)]
pub struct RawObject {
    pub kind: ObjectKind,
    pub body: Vec<u8>,
}

/// One entry of the `packed-refs` text index.
///
/// An annotated tag is packed under the *tag object's* id together with a
/// `^<sha>` peel line naming the commit it points at; [`PackedRef::target`]
/// returns the peeled id when one is present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedRef {
    /// Full ref name, e.g. `refs/heads/master` or `refs/tags/v1`.
    pub name: String,
    /// The id stored on the ref line itself.
    pub oid: Oid,
    /// The peeled commit id from a following `^<sha>` line, if any.
    pub peeled: Option<Oid>,
}

impl PackedRef {
    /// The commit this ref ultimately names.
    pub fn target(&self) -> &Oid {
        self.peeled.as_ref().unwrap_or(&self.oid)
    }
}

/// Read-only handle on a shared metadata directory.
///
/// Every method is a pure read of current on-disk state; nothing is cached
/// between calls and no file handle outlives the call that opened it.
#[derive(Debug)]
pub struct ObjectStore {
    common_git_dir: PathBuf,
    strict: bool,
}

impl ObjectStore {
    /// Create a store over `common_git_dir`.
    ///
    /// With `strict` set, malformed data is surfaced as an error instead of
    /// being reported as absent.
    pub fn new(common_git_dir: impl Into<PathBuf>, strict: bool) -> Self {
        Self {
            common_git_dir: common_git_dir.into(),
            strict,
        }
    }

    /// Read and decode a loose object by id.
    ///
    /// Loose objects live at `objects/<first-2-hex>/<remaining-38-hex>` as a
    /// zlib stream whose inflated form is `<type> <size>\0<body>`. Returns
    /// `Ok(None)` when no loose file exists for the id; pack-only objects
    /// land here.
    pub fn read_loose(&self, oid: &Oid) -> Result<Option<RawObject>, ResolveError> {
        let (dir, file) = oid.split_loose();
        let path = self.common_git_dir.join("objects").join(dir).join(file);

        let compressed = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return self.degrade(ResolveError::Io { path, source }),
        };

        let mut inflated = Vec::new();
        if let Err(err) = ZlibDecoder::new(compressed.as_slice()).read_to_end(&mut inflated) {
            return self.degrade(ResolveError::DecodeUnavailable {
                oid: oid.to_string(),
                reason: format!("zlib inflate failed: {}", err),
            });
        }

        match split_object(&inflated) {
            Some(object) => Ok(Some(object)),
            None => self.degrade(ResolveError::DecodeUnavailable {
                oid: oid.to_string(),
                reason: "malformed object header".into(),
            }),
        }
    }

    /// Read the `packed-refs` text index.
    ///
    /// Returns an empty list when the file is absent. Comment lines and
    /// lines that do not match the `<sha> <refname>` grammar are skipped;
    /// `^<sha>` peel lines attach to the preceding entry.
    pub fn packed_refs(&self) -> Result<Vec<PackedRef>, ResolveError> {
        let path = self.common_git_dir.join("packed-refs");
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return self
                    .degrade(ResolveError::Io { path, source })
                    .map(Option::unwrap_or_default)
            }
        };
        Ok(parse_packed_refs(&text))
    }

    /// Read a loose ref file (e.g. `refs/heads/feature/x`) to its id.
    ///
    /// Returns `Ok(None)` when no loose file exists for the ref; the caller
    /// falls back to the packed index.
    pub fn loose_ref(&self, refname: &str) -> Result<Option<Oid>, ResolveError> {
        let path = self.common_git_dir.join(refname);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return self.degrade(ResolveError::Io { path, source }),
        };
        match Oid::new(content.trim()) {
            Ok(oid) => Ok(Some(oid)),
            Err(_) => self.degrade(ResolveError::MalformedRef {
                path,
                content: content.trim().to_string(),
            }),
        }
    }

    /// Enumerate the loose tag ref files under `refs/tags/`.
    ///
    /// Returns `(tag name, stored id)` pairs. The stored id is either the
    /// tagged commit directly (lightweight) or a tag object's id
    /// (annotated); peeling is the caller's concern. An absent `refs/tags/`
    /// directory yields an empty list.
    pub fn loose_tag_refs(&self) -> Result<Vec<(String, Oid)>, ResolveError> {
        let dir = self.common_git_dir.join("refs").join("tags");
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return self
                    .degrade(ResolveError::Io { path: dir, source })
                    .map(Option::unwrap_or_default)
            }
        };

        let mut tags = Vec::new();
        for entry in entries.flatten() {
            if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
                continue;
            }
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            let path = entry.path();
            let content = match fs::read_to_string(&path) {
                Ok(content) => content,
                Err(source) => {
                    self.degrade::<()>(ResolveError::Io { path, source })?;
                    continue;
                }
            };
            match Oid::new(content.trim()) {
                Ok(oid) => tags.push((name, oid)),
                Err(_) => {
                    self.degrade::<()>(ResolveError::MalformedRef {
                        path,
                        content: content.trim().to_string(),
                    })?;
                }
            }
        }
        Ok(tags)
    }

    /// In strict mode surface `err`; otherwise log it and report absence.
    fn degrade<T>(&self, err: ResolveError) -> Result<Option<T>, ResolveError> {
        if self.strict {
            Err(err)
        } else {
            tracing::debug!(error = %err, "degrading undecodable data to absent");
            Ok(None)
        }
    }
}

/// Split an inflated loose object into its header type and body.
///
/// The header is `<type> <decimal-size>` followed by a NUL; the declared
/// size must match the body length.
fn split_object(inflated: &[u8]) -> Option<RawObject> {
    let nul = inflated.iter().position(|&b| b == 0)?;
    let header = std::str::from_utf8(&inflated[..nul]).ok()?;
    let (kind, size) = header.split_once(' ')?;
    let kind = ObjectKind::from_header(kind)?;
    let size: usize = size.parse().ok()?;
    let body = &inflated[nul + 1..];
    if body.len() != size {
        return None;
    }
    Some(RawObject {
        kind,
        body: body.to_vec(),
    })
}

/// Parse `packed-refs` text into entries.
fn parse_packed_refs(text: &str) -> Vec<PackedRef> {
    let mut refs: Vec<PackedRef> = Vec::new();
    for line in text.lines() {
        let line = line.trim_end();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some(peel) = line.strip_prefix('^') {
            if let (Some(last), Ok(oid)) = (refs.last_mut(), Oid::new(peel.trim())) {
                last.peeled = Some(oid);
            }
            continue;
        }
        let Some((sha, name)) = line.split_once(' ') else {
            continue;
        };
        let Ok(oid) = Oid::new(sha) else {
            continue;
        };
        refs.push(PackedRef {
            name: name.trim().to_string(),
            oid,
            peeled: None,
        });
    }
    refs
}
