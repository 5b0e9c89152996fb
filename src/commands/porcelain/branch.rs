use crate::areas::repository::Repository;
use crate::errors::Result;

impl Repository {
    /// Create a branch pointing at the current commit. HEAD stays put.
    pub fn branch(&self, name: &str) -> Result<()> {
        let head = self.refs().head_commit()?;
        self.refs().create(name, &head)
    }

    /// Delete a branch pointer. The commits it pointed at are kept.
    pub fn rm_branch(&self, name: &str) -> Result<()> {
        self.refs().delete(name)
    }
}
