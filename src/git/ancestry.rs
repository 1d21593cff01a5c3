//! git::ancestry
//!
//! Breadth-first search over the commit parent graph for the nearest
//! tagged ancestor.
//!
//! # Why breadth-first
//!
//! After a merge, a tagged commit can be reachable along several paths of
//! different lengths. Breadth-first order guarantees the reported distance
//! is the minimum over all decodable paths.
//!
//! # Termination
//!
//! Commits are fetched on demand and each id is visited at most once, so
//! the walk is bounded by the reachable-and-decodable history even when
//! merges share ancestors. A frontier commit that exists only inside a
//! binary pack cannot be decoded; its branch of history silently ends
//! there. When the whole frontier ends that way the walk reports no tag,
//! which callers surface as an unbounded distance.

use std::collections::{HashSet, VecDeque};

use super::error::ResolveError;
use super::object::CommitObject;
use super::odb::{ObjectKind, ObjectStore};
use super::tags::TagIndex;
use crate::core::types::Oid;

/// The nearest tagged ancestor of a commit, and how far away it is.
///
/// A distance of 0 means the starting commit itself is tagged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedAncestor {
    pub tag: String,
    pub distance: u64,
}

/// Walk the parent graph from `start` to the nearest commit named by a tag.
///
/// Returns `Ok(None)` when no tagged commit is reachable through the subset
/// of history available as loose objects.
///
/// # Errors
///
/// Object decoding failures propagate per the store's strictness; in
/// default mode the store reports undecodable objects as absent, and the
/// affected branch of the walk simply ends.
pub fn nearest_tagged_ancestor(
    store: &ObjectStore,
    tags: &TagIndex,
    start: &Oid,
) -> Result<Option<TaggedAncestor>, ResolveError> {
    if tags.is_empty() {
        return Ok(None);
    }

    let mut visited: HashSet<Oid> = HashSet::new();
    let mut queue: VecDeque<(Oid, u64)> = VecDeque::new();
    visited.insert(start.clone());
    queue.push_back((start.clone(), 0));

    while let Some((oid, distance)) = queue.pop_front() {
        if let Some(tag) = tags.name_for(&oid) {
            return Ok(Some(TaggedAncestor {
                tag: tag.to_string(),
                distance,
            }));
        }

        let Some(object) = store.read_loose(&oid)? else {
            continue; // pack-only or missing: this branch of history ends
        };
        if object.kind != ObjectKind::Commit {
            continue;
        }

        let commit = CommitObject::parse(oid, &object.body);
        for parent in commit.parents {
            if visited.insert(parent.clone()) {
                queue.push_back((parent, distance + 1));
            }
        }
    }

    tracing::debug!(start = %start, "frontier exhausted without reaching a tag");
    Ok(None)
}
