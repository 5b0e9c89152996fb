//! Commit storage and history traversal
//!
//! Each commit is one file under `commits/`, named by the commit id and
//! written once. History is walked lazily through first-parent links so
//! `log` never loads more commits than it prints.

use crate::artifacts::commit::Commit;
use crate::artifacts::object_id::ObjectId;
use crate::artifacts::tree::Tree;
use crate::errors::{LitError, Result};
use chrono::Utc;
use derive_new::new;
use std::path::Path;

#[derive(Debug, new)]
pub struct CommitStore {
    path: Box<Path>,
}

impl CommitStore {
    /// Build and persist a commit stamped with the current time.
    pub fn create(&self, message: String, parents: Vec<ObjectId>, tree: Tree) -> Result<Commit> {
        let commit = Commit::new(message, parents, tree, Utc::now())?;
        self.write(&commit)?;
        Ok(commit)
    }

    /// Persist the fixed root commit every repository begins with.
    pub fn create_root(&self) -> Result<Commit> {
        let root = Commit::root();
        self.write(&root)?;
        Ok(root)
    }

    pub fn write(&self, commit: &Commit) -> Result<()> {
        let commit_path = self.path.join(commit.id().as_ref());
        std::fs::write(commit_path, commit.encode())?;
        Ok(())
    }

    pub fn read(&self, id: &ObjectId) -> Result<Commit> {
        let commit_path = self.path.join(id.as_ref());
        if !commit_path.exists() {
            return Err(LitError::not_found("No commit with that id exists."));
        }
        let content = std::fs::read_to_string(&commit_path)?;
        Commit::decode(&content)
    }

    pub fn exists(&self, id: &ObjectId) -> bool {
        self.path.join(id.as_ref()).exists()
    }

    /// First parent of a commit, loaded without keeping the commit around.
    pub fn first_parent(&self, id: &ObjectId) -> Result<Option<ObjectId>> {
        Ok(self.read(id)?.first_parent().cloned())
    }

    /// Lazy first-parent walk from `start` back to the root.
    pub fn history(&self, start: ObjectId) -> History<'_> {
        History {
            store: self,
            cursor: Some(start),
        }
    }

    /// Every stored commit, in no particular order.
    pub fn iter_all(&self) -> Result<Vec<Commit>> {
        let mut commits = Vec::new();
        for entry in std::fs::read_dir(&self.path)? {
            let content = std::fs::read_to_string(entry?.path())?;
            commits.push(Commit::decode(&content)?);
        }
        Ok(commits)
    }

    /// Ids of every commit whose message matches exactly.
    pub fn find_by_message(&self, message: &str) -> Result<Vec<ObjectId>> {
        Ok(self
            .iter_all()?
            .into_iter()
            .filter(|commit| commit.message() == message)
            .map(|commit| commit.id().clone())
            .collect())
    }
}

pub struct History<'a> {
    store: &'a CommitStore,
    cursor: Option<ObjectId>,
}

impl Iterator for History<'_> {
    type Item = Result<Commit>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cursor.take()?;
        match self.store.read(&id) {
            Ok(commit) => {
                self.cursor = commit.first_parent().cloned();
                Some(Ok(commit))
            }
            Err(err) => Some(Err(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::TempDir;

    fn store(dir: &TempDir) -> CommitStore {
        let path = dir.path().join("commits");
        std::fs::create_dir_all(&path).unwrap();
        CommitStore::new(path.into_boxed_path())
    }

    #[test]
    fn created_commits_read_back() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        let root = store.create_root().unwrap();
        let commit = store
            .create("add a file".to_string(), vec![root.id().clone()], Tree::new())
            .unwrap();

        assert_eq!(store.read(commit.id()).unwrap(), commit);
        assert_eq!(store.first_parent(commit.id()).unwrap(), Some(root.id().clone()));
    }

    #[test]
    fn unknown_id_is_not_found() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        let missing = ObjectId::hash_bytes(b"missing");
        let err = store.read(&missing).unwrap_err();
        assert_eq!(err.to_string(), "No commit with that id exists.");
    }

    #[test]
    fn history_walks_first_parents_to_the_root() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        let root = store.create_root().unwrap();
        let a = store
            .create("a".to_string(), vec![root.id().clone()], Tree::new())
            .unwrap();
        let b = store
            .create("b".to_string(), vec![a.id().clone()], Tree::new())
            .unwrap();

        let walked: Vec<_> = store
            .history(b.id().clone())
            .map(|commit| commit.unwrap().message().to_string())
            .collect();
        assert_eq!(walked, vec!["b", "a", "initial commit"]);
    }

    #[test]
    fn history_follows_only_the_first_parent_of_a_merge() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        let root = store.create_root().unwrap();
        let side = store
            .create("side".to_string(), vec![root.id().clone()], Tree::new())
            .unwrap();
        let main = store
            .create("main".to_string(), vec![root.id().clone()], Tree::new())
            .unwrap();
        let merge = store
            .create(
                "Merged feature into master.".to_string(),
                vec![main.id().clone(), side.id().clone()],
                Tree::new(),
            )
            .unwrap();

        let walked: Vec<_> = store
            .history(merge.id().clone())
            .map(|commit| commit.unwrap().message().to_string())
            .collect();
        assert_eq!(
            walked,
            vec!["Merged feature into master.", "main", "initial commit"]
        );
    }

    #[test]
    fn find_by_message_matches_exactly() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        let root = store.create_root().unwrap();
        let hit = store
            .create("fix typo".to_string(), vec![root.id().clone()], Tree::new())
            .unwrap();
        store
            .create("fix typos".to_string(), vec![hit.id().clone()], Tree::new())
            .unwrap();

        let found = store.find_by_message("fix typo").unwrap();
        assert_eq!(found, vec![hit.id().clone()]);
        assert!(store.find_by_message("no such message").unwrap().is_empty());
    }
}
