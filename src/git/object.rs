//! git::object
//!
//! Line/field parsers for decoded object bodies.
//!
//! A commit body is a run of header lines (`tree`, `parent`, `author`,
//! `committer`, …), a blank line, then the free-text message. A tag body is
//! `object`, `type`, `tag`, `tagger`, blank line, message. Multi-line
//! headers (e.g. `gpgsig`) continue on lines starting with a space and are
//! skipped here.
//!
//! Parsing is total: unknown headers are ignored and missing fields come
//! back as `None`/empty, so a half-decodable commit still yields whatever
//! it carries.

use chrono::{DateTime, Utc};

use crate::core::types::Oid;

/// An author or committer identity line.
///
/// On disk: `Name <email> <unix-epoch-seconds> <±HHMM-offset>`. The offset
/// records where the identity was when the commit was made; the instant
/// itself is UTC, so the offset is dropped after parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    /// `Name <email>` exactly as written.
    pub who: String,
    /// The identity's timestamp, when the epoch field parses.
    pub when: Option<DateTime<Utc>>,
}

impl Ident {
    /// Parse an identity from the value part of an `author`/`committer`/
    /// `tagger` header line.
    pub fn parse(value: &str) -> Option<Self> {
        let mut fields = value.rsplitn(3, ' ');
        let _offset = fields.next()?;
        let epoch = fields.next()?;
        let who = fields.next()?.to_string();

        let when = epoch
            .parse::<i64>()
            .ok()
            .and_then(|secs| DateTime::from_timestamp(secs, 0));
        Some(Ident { who, when })
    }
}

/// A decoded commit object.
#[derive(Debug, Clone)]
pub struct CommitObject {
    /// The commit's own id.
    pub oid: Oid,
    /// Parent ids in header order: empty for a root commit, two or more
    /// for a merge.
    pub parents: Vec<Oid>,
    pub author: Option<Ident>,
    pub committer: Option<Ident>,
    /// The commit message with surrounding whitespace trimmed.
    pub message: String,
}

impl CommitObject {
    /// Parse a commit body.
    ///
    /// `body` is the inflated object body with the `commit <size>\0` header
    /// already stripped.
    pub fn parse(oid: Oid, body: &[u8]) -> Self {
        let text = String::from_utf8_lossy(body);
        let (headers, message) = split_body(&text);

        let mut parents = Vec::new();
        let mut author = None;
        let mut committer = None;

        for line in headers.lines() {
            if line.starts_with(' ') {
                continue; // continuation of a multi-line header
            }
            let Some((key, value)) = line.split_once(' ') else {
                continue;
            };
            match key {
                "parent" => {
                    if let Ok(parent) = Oid::new(value.trim()) {
                        parents.push(parent);
                    }
                }
                "author" => author = Ident::parse(value),
                "committer" => committer = Ident::parse(value),
                _ => {}
            }
        }

        CommitObject {
            oid,
            parents,
            author,
            committer,
            message: message.trim().to_string(),
        }
    }
}

/// A decoded annotated tag object.
#[derive(Debug, Clone)]
pub struct TagObject {
    /// The id the tag points at (`object` header); for the tags this crate
    /// cares about, a commit id.
    pub object: Oid,
    /// The pointed-at object's type (`type` header), e.g. `commit`.
    pub target_kind: Option<String>,
    /// The tag's own name (`tag` header).
    pub name: Option<String>,
}

impl TagObject {
    /// Parse a tag body. Returns `None` when no valid `object` header is
    /// present, since without a target the tag names nothing.
    pub fn parse(body: &[u8]) -> Option<Self> {
        let text = String::from_utf8_lossy(body);
        let (headers, _message) = split_body(&text);

        let mut object = None;
        let mut target_kind = None;
        let mut name = None;

        for line in headers.lines() {
            if line.starts_with(' ') {
                continue;
            }
            let Some((key, value)) = line.split_once(' ') else {
                continue;
            };
            match key {
                "object" => object = Oid::new(value.trim()).ok(),
                "type" => target_kind = Some(value.trim().to_string()),
                "tag" => name = Some(value.trim().to_string()),
                _ => {}
            }
        }

        Some(TagObject {
            object: object?,
            target_kind,
            name,
        })
    }
}

/// Split an object body into its header block and message.
fn split_body(text: &str) -> (&str, &str) {
    match text.split_once("\n\n") {
        Some((headers, message)) => (headers, message),
        None => (text, ""),
    }
}
