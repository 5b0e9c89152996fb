//! Staging index
//!
//! The index is the pending change set for the next commit: a map of paths
//! staged for addition (path to blob hash) and a set of paths staged for
//! removal. A path is never in both halves at once; staging a removal after
//! an addition un-stages the addition, and staging an addition after a
//! removal clears the removal.
//!
//! Persisted as two record files, `index/added` and `index/removed`, and
//! cleared atomically after a successful commit, reset or branch checkout.

use crate::artifacts::object_id::ObjectId;
use crate::artifacts::record;
use crate::errors::{LitError, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

const ADDED_KIND: &str = "index-added";
const REMOVED_KIND: &str = "index-removed";

#[derive(Debug, Clone)]
pub struct Index {
    path: Box<Path>,
    added: BTreeMap<String, ObjectId>,
    removed: BTreeSet<String>,
}

impl Index {
    pub fn new(path: Box<Path>) -> Self {
        Index {
            path,
            added: BTreeMap::new(),
            removed: BTreeSet::new(),
        }
    }

    fn added_path(&self) -> std::path::PathBuf {
        self.path.join("added")
    }

    fn removed_path(&self) -> std::path::PathBuf {
        self.path.join("removed")
    }

    /// Reload both halves from disk, replacing in-memory state. Missing
    /// files mean an empty index.
    pub fn load(&mut self) -> Result<()> {
        self.added.clear();
        self.removed.clear();

        let added_path = self.added_path();
        if added_path.exists() {
            let content = std::fs::read_to_string(&added_path)?;
            for line in record::body(&content, ADDED_KIND)?.lines() {
                let (hash, path) = line.split_once(' ').ok_or_else(|| {
                    LitError::corrupt(format!("Malformed index entry: {}", line))
                })?;
                self.added
                    .insert(path.to_string(), ObjectId::try_parse(hash.to_string())?);
            }
        }

        let removed_path = self.removed_path();
        if removed_path.exists() {
            let content = std::fs::read_to_string(&removed_path)?;
            for line in record::body(&content, REMOVED_KIND)?.lines() {
                self.removed.insert(line.to_string());
            }
        }

        Ok(())
    }

    /// Write both halves back to disk.
    pub fn save(&self) -> Result<()> {
        let mut added = record::header(ADDED_KIND);
        for (path, hash) in &self.added {
            added.push_str(&format!("{} {}\n", hash, path));
        }
        std::fs::write(self.added_path(), added)?;

        let mut removed = record::header(REMOVED_KIND);
        for path in &self.removed {
            removed.push_str(&format!("{}\n", path));
        }
        std::fs::write(self.removed_path(), removed)?;

        Ok(())
    }

    /// Stage a path for addition.
    ///
    /// `tracked` is the blob the current HEAD commit tracks for this path,
    /// if any. When the new content equals it, there is nothing to stage:
    /// the call is a no-op that also drops any earlier staged entry for the
    /// path. Returns whether the path ended up staged.
    pub fn stage_add(&mut self, path: &str, id: ObjectId, tracked: Option<&ObjectId>) -> bool {
        self.removed.remove(path);

        if tracked == Some(&id) {
            self.added.remove(path);
            return false;
        }

        self.added.insert(path.to_string(), id);
        true
    }

    /// Stage a path for removal. Only commit-tracked paths are recorded in
    /// the removal set; either way a pending addition is dropped.
    pub fn stage_remove(&mut self, path: &str, tracked_in_commit: bool) {
        self.added.remove(path);
        if tracked_in_commit {
            self.removed.insert(path.to_string());
        }
    }

    /// Clear a pending removal.
    pub fn unremove(&mut self, path: &str) {
        self.removed.remove(path);
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }

    pub fn clear(&mut self) {
        self.added.clear();
        self.removed.clear();
    }

    pub fn staged_hash(&self, path: &str) -> Option<&ObjectId> {
        self.added.get(path)
    }

    pub fn is_removed(&self, path: &str) -> bool {
        self.removed.contains(path)
    }

    /// True if the path appears in either half of the index.
    pub fn mentions(&self, path: &str) -> bool {
        self.added.contains_key(path) || self.removed.contains(path)
    }

    pub fn added(&self) -> impl Iterator<Item = (&String, &ObjectId)> {
        self.added.iter()
    }

    pub fn removed(&self) -> impl Iterator<Item = &String> {
        self.removed.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::TempDir;

    fn oid(tag: &str) -> ObjectId {
        ObjectId::hash_bytes(tag.as_bytes())
    }

    fn empty_index(dir: &TempDir) -> Index {
        let path = dir.path().join("index");
        std::fs::create_dir_all(&path).unwrap();
        Index::new(path.into_boxed_path())
    }

    #[test]
    fn add_and_remove_are_mutually_exclusive() {
        let dir = TempDir::new().unwrap();
        let mut index = empty_index(&dir);

        index.stage_add("a.txt", oid("one"), None);
        index.stage_remove("a.txt", true);
        assert!(index.staged_hash("a.txt").is_none());
        assert!(index.is_removed("a.txt"));

        index.stage_add("a.txt", oid("two"), None);
        assert!(!index.is_removed("a.txt"));
        assert_eq!(index.staged_hash("a.txt"), Some(&oid("two")));
    }

    #[test]
    fn staging_unchanged_content_is_a_no_op() {
        let dir = TempDir::new().unwrap();
        let mut index = empty_index(&dir);

        index.stage_add("a.txt", oid("draft"), Some(&oid("head")));
        assert!(index.staged_hash("a.txt").is_some());

        // Content now matches what HEAD tracks: the stale entry goes away.
        let staged = index.stage_add("a.txt", oid("head"), Some(&oid("head")));
        assert!(!staged);
        assert!(index.is_empty());
    }

    #[test]
    fn untracked_removal_is_not_recorded() {
        let dir = TempDir::new().unwrap();
        let mut index = empty_index(&dir);

        index.stage_add("a.txt", oid("one"), None);
        index.stage_remove("a.txt", false);
        assert!(index.is_empty());
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let mut index = empty_index(&dir);

        index.stage_add("a.txt", oid("one"), None);
        index.stage_add("dir/b.txt", oid("two"), None);
        index.stage_remove("gone.txt", true);
        index.save().unwrap();

        let mut reloaded = empty_index(&dir);
        reloaded.load().unwrap();
        assert_eq!(reloaded.staged_hash("a.txt"), Some(&oid("one")));
        assert_eq!(reloaded.staged_hash("dir/b.txt"), Some(&oid("two")));
        assert!(reloaded.is_removed("gone.txt"));
    }

    #[test]
    fn missing_files_load_as_empty() {
        let dir = TempDir::new().unwrap();
        let mut index = empty_index(&dir);
        index.load().unwrap();
        assert!(index.is_empty());
    }
}
