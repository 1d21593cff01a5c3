//! git::tags
//!
//! Tag naming: which tag, if any, names a given commit.
//!
//! Tags come from two independent sources that must be merged
//! deterministically:
//!
//! - the packed-refs index, where a lightweight tag's line carries the
//!   commit id directly and an annotated tag is keyed by the tag object's
//!   id with a `^<sha>` peel line for the commit;
//! - loose files under `refs/tags/`, each holding either the commit id
//!   (lightweight) or a tag object's id (annotated, peeled by decoding the
//!   object).
//!
//! When several names resolve to the same commit the lexicographically
//! smallest wins, consistently across calls.

use std::collections::{BTreeMap, BTreeSet};

use super::error::ResolveError;
use super::object::TagObject;
use super::odb::{ObjectKind, ObjectStore};
use crate::core::types::Oid;

/// All tag names in the repository, indexed by the commit they name.
///
/// Built once per resolution and consulted for every commit the ancestry
/// walk visits, so the packed index and the loose tag files are each read
/// exactly once.
#[derive(Debug, Default)]
pub struct TagIndex {
    by_target: BTreeMap<Oid, BTreeSet<String>>,
}

impl TagIndex {
    /// Load the merged tag table from both sources.
    ///
    /// Absent `refs/tags/` and absent packed-refs each contribute nothing;
    /// a repository without tags yields an empty index, not an error.
    pub fn load(store: &ObjectStore) -> Result<Self, ResolveError> {
        let mut index = TagIndex::default();

        for entry in store.packed_refs()? {
            if let Some(name) = entry.name.strip_prefix("refs/tags/") {
                index.insert(entry.target().clone(), name);
            }
        }

        for (name, stored) in store.loose_tag_refs()? {
            let target = match store.read_loose(&stored)? {
                Some(object) if object.kind == ObjectKind::Tag => {
                    match TagObject::parse(&object.body) {
                        Some(tag) => tag.object,
                        None => stored,
                    }
                }
                // No decodable tag object behind the stored id: treat it as
                // a lightweight pointer to the commit itself.
                _ => stored,
            };
            index.insert(target, &name);
        }

        Ok(index)
    }

    /// The tag name for a commit, or `None` if no tag names it.
    ///
    /// Ties resolve to the lexicographically smallest name.
    pub fn name_for(&self, oid: &Oid) -> Option<&str> {
        self.by_target
            .get(oid)
            .and_then(|names| names.iter().next())
            .map(String::as_str)
    }

    /// Whether the repository has no tags at all.
    pub fn is_empty(&self) -> bool {
        self.by_target.is_empty()
    }

    fn insert(&mut self, target: Oid, name: &str) {
        self.by_target
            .entry(target)
            .or_default()
            .insert(name.to_string());
    }
}
