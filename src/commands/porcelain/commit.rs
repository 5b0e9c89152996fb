use crate::areas::repository::Repository;
use crate::artifacts::object_id::ObjectId;
use crate::errors::{LitError, Result};

impl Repository {
    /// Turn the staging index into a new commit on the active branch.
    pub fn commit(&mut self, message: &str) -> Result<()> {
        if self.index().is_empty() {
            return Err(LitError::precondition_failed(
                "No changes added to the commit.",
            ));
        }
        let head = self.refs().head_commit()?;
        self.commit_with_parents(message, vec![head])?;
        Ok(())
    }

    /// Shared tail of `commit` and `merge`: derive the new tree from the
    /// current one plus the index, promote referenced blobs, advance the
    /// branch and clear the index. Merge commits skip the emptiness guard
    /// since a conflict-free merge may stage nothing new.
    pub fn commit_with_parents(
        &mut self,
        message: &str,
        parents: Vec<ObjectId>,
    ) -> Result<ObjectId> {
        let mut tree = self.current_commit()?.tree().clone();
        for (path, id) in self.index().added() {
            self.objects().promote(id)?;
            tree.insert(path.clone(), id.clone());
        }
        for path in self.index().removed() {
            tree.remove(path);
        }

        let commit = self
            .commits()
            .create(message.to_string(), parents, tree)?;
        self.refs().advance(commit.id())?;

        self.index_mut().clear();
        self.save_index()?;
        self.objects().clear_staged()?;
        Ok(commit.id().clone())
    }
}
