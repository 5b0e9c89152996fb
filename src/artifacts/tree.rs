//! Commit snapshot: path to blob-hash mapping
//!
//! A tree is the full snapshot a commit tracks. Keys are workspace-relative
//! paths, values are blob ids in the object store. The map is ordered so a
//! tree always encodes to the same byte sequence regardless of insertion
//! order.

use crate::artifacts::object_id::ObjectId;
use crate::errors::{LitError, Result};
use std::collections::BTreeMap;

/// Path-to-blob snapshot owned by a commit.
///
/// Copied (not shared) when a new commit is derived from its parent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    entries: BTreeMap<String, ObjectId>,
}

impl Tree {
    pub fn new() -> Self {
        Tree::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    pub fn get(&self, path: &str) -> Option<&ObjectId> {
        self.entries.get(path)
    }

    pub fn insert(&mut self, path: String, id: ObjectId) {
        self.entries.insert(path, id);
    }

    pub fn remove(&mut self, path: &str) {
        self.entries.remove(path);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ObjectId)> {
        self.entries.iter()
    }

    pub fn paths(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    /// Append the tree as sorted `tree <hash> <path>` lines.
    pub fn encode_into(&self, out: &mut String) {
        for (path, id) in &self.entries {
            out.push_str(&format!("tree {} {}\n", id, path));
        }
    }

    /// Parse the payload of a single `tree` line (everything after the tag).
    pub fn decode_entry(payload: &str) -> Result<(String, ObjectId)> {
        let (hash, path) = payload
            .split_once(' ')
            .ok_or_else(|| LitError::corrupt(format!("Malformed tree entry: {}", payload)))?;
        let id = ObjectId::try_parse(hash.to_string())?;
        if path.is_empty() {
            return Err(LitError::corrupt("Tree entry with empty path".to_string()));
        }
        Ok((path.to_string(), id))
    }
}
