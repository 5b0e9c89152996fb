//! Split-point (merge base) computation
//!
//! The split point of two branch heads is the nearest commit lying on BOTH
//! first-parent chains. This is deliberately not a general-DAG lowest common
//! ancestor: histories containing earlier merge commits may yield a split
//! point further back than the true closest ancestor, widening the three-way
//! diff. Preserved as-is; see the open questions in DESIGN.md.
//!
//! The finder takes a loader closure so it works against any commit source,
//! file-backed or in-memory.

use crate::artifacts::object_id::ObjectId;
use crate::errors::Result;
use std::collections::HashSet;

/// Result of a split-point search.
#[derive(Debug)]
pub struct SplitPoint {
    /// Nearest commit on both first-parent chains.
    pub id: ObjectId,
    /// Every commit id on the current branch's first-parent chain, used by
    /// the caller for the ancestor pre-merge check.
    pub current_chain: HashSet<ObjectId>,
}

/// Finds the split point between two branch heads by walking first-parent
/// chains only.
pub struct SplitPointFinder<ParentLoaderFn>
where
    ParentLoaderFn: Fn(&ObjectId) -> Result<Option<ObjectId>>,
{
    /// Loads the first parent of a commit, `None` for the root.
    parent_of: ParentLoaderFn,
}

impl<ParentLoaderFn> SplitPointFinder<ParentLoaderFn>
where
    ParentLoaderFn: Fn(&ObjectId) -> Result<Option<ObjectId>>,
{
    pub fn new(parent_of: ParentLoaderFn) -> Self {
        Self { parent_of }
    }

    /// Walk the current chain into a set, then walk the other chain until a
    /// member of that set is hit. Both walks are linear in chain length.
    ///
    /// If the other chain never intersects (malformed graph with two roots),
    /// the walk stops at the other chain's root and returns it.
    pub fn find(&self, current: &ObjectId, other: &ObjectId) -> Result<SplitPoint> {
        let mut current_chain = HashSet::new();
        let mut cursor = Some(current.clone());
        while let Some(id) = cursor {
            cursor = (self.parent_of)(&id)?;
            current_chain.insert(id);
        }

        let mut cursor = other.clone();
        loop {
            if current_chain.contains(&cursor) {
                break;
            }
            match (self.parent_of)(&cursor)? {
                Some(parent) => cursor = parent,
                None => break,
            }
        }

        Ok(SplitPoint {
            id: cursor,
            current_chain,
        })
    }
}
