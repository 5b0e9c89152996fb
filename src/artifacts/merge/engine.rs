//! Three-way reconciliation
//!
//! For every path appearing in the split, current or other snapshot, the
//! engine classifies the combination of presence and content equality into
//! an outcome. Content equality is decided by blob hash, never by re-reading
//! bytes. The classification is pure; applying outcomes to the working tree
//! and staging index is the merge command's job.

use crate::artifacts::object_id::ObjectId;
use crate::artifacts::tree::Tree;
use std::collections::BTreeSet;

/// What the merge does to one path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The working tree already shows the right content; nothing to do.
    Unchanged,
    /// Take the other side's blob: write it out and stage it.
    TakeOther(ObjectId),
    /// Delete the file from the working tree and stage the removal.
    RemoveCurrent,
    /// Both sides disagree; write a conflict-marked file and stage it.
    /// Either side may be absent, which selects the marker shape.
    Conflict {
        current: Option<ObjectId>,
        other: Option<ObjectId>,
    },
}

/// Classify a single path by its presence in the split (S), current (C) and
/// other (O) snapshots.
pub fn classify(
    split: Option<&ObjectId>,
    current: Option<&ObjectId>,
    other: Option<&ObjectId>,
) -> MergeOutcome {
    match (split, current, other) {
        // Present everywhere: compare each side against the base.
        (Some(s), Some(c), Some(o)) => {
            if c == o {
                MergeOutcome::Unchanged
            } else if c == s {
                MergeOutcome::TakeOther(o.clone())
            } else if o == s {
                MergeOutcome::Unchanged
            } else {
                MergeOutcome::Conflict {
                    current: Some(c.clone()),
                    other: Some(o.clone()),
                }
            }
        }
        // Deleted in other.
        (Some(s), Some(c), None) => {
            if c == s {
                MergeOutcome::RemoveCurrent
            } else {
                MergeOutcome::Conflict {
                    current: Some(c.clone()),
                    other: None,
                }
            }
        }
        // Deleted in current.
        (Some(s), None, Some(o)) => {
            if o == s {
                MergeOutcome::Unchanged
            } else {
                MergeOutcome::Conflict {
                    current: None,
                    other: Some(o.clone()),
                }
            }
        }
        // Deleted on both sides.
        (Some(_), None, None) => MergeOutcome::Unchanged,
        // Added on both sides since the split.
        (None, Some(c), Some(o)) => {
            if c == o {
                MergeOutcome::Unchanged
            } else {
                MergeOutcome::Conflict {
                    current: Some(c.clone()),
                    other: Some(o.clone()),
                }
            }
        }
        // Added only in current.
        (None, Some(_), None) => MergeOutcome::Unchanged,
        // Added only in other.
        (None, None, Some(o)) => MergeOutcome::TakeOther(o.clone()),
        (None, None, None) => MergeOutcome::Unchanged,
    }
}

/// Classify every path in the union of the three snapshots, in path order.
pub fn reconcile(split: &Tree, current: &Tree, other: &Tree) -> Vec<(String, MergeOutcome)> {
    let paths: BTreeSet<&String> = split
        .paths()
        .chain(current.paths())
        .chain(other.paths())
        .collect();

    paths
        .into_iter()
        .map(|path| {
            let outcome = classify(split.get(path), current.get(path), other.get(path));
            (path.clone(), outcome)
        })
        .collect()
}

/// Compose the byte-exact conflict file for a path.
///
/// The absent side contributes nothing between its markers:
///
/// ```text
/// <<<<<<< HEAD
/// <current bytes, if present>
/// =======
/// <other bytes, if present>
/// >>>>>>>
/// ```
pub fn conflict_bytes(current: Option<&[u8]>, other: Option<&[u8]>) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(b"<<<<<<< HEAD\n");
    if let Some(bytes) = current {
        out.extend_from_slice(bytes);
    }
    out.extend_from_slice(b"=======\n");
    if let Some(bytes) = other {
        out.extend_from_slice(bytes);
    }
    out.extend_from_slice(b">>>>>>>\n");
    out
}
