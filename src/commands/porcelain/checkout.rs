use crate::areas::repository::Repository;
use crate::errors::{LitError, Result};

impl Repository {
    /// Switch to another branch, replacing the working tree with its head
    /// commit's snapshot and clearing the staging index.
    pub fn checkout_branch(&mut self, name: &str) -> Result<()> {
        if self.refs().head_branch()? == name {
            return Err(LitError::precondition_failed(
                "No need to checkout the current branch.",
            ));
        }
        let target_id = self
            .refs()
            .read(name)?
            .ok_or_else(|| LitError::not_found("No such branch exists."))?;

        let current = self.current_commit()?;
        self.ensure_no_untracked(current.tree())?;

        let target = self.commits().read(&target_id)?;
        self.materialize_all(&target, &current)?;
        self.refs().switch_to(name)?;

        self.index_mut().clear();
        self.save_index()?;
        self.objects().clear_staged()
    }

    /// Restore one file from the current commit. The staging index is left
    /// alone.
    pub fn checkout_file(&self, path: &str) -> Result<()> {
        let head = self.current_commit()?;
        self.materialize_one(&head, path)
    }

    /// Restore one file from an arbitrary commit.
    pub fn checkout_file_at(&self, commit_id: &str, path: &str) -> Result<()> {
        let commit = self.resolve_commit(commit_id)?;
        self.materialize_one(&commit, path)
    }
}
