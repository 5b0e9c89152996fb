use crate::areas::repository::Repository;
use crate::errors::{LitError, Result};

impl Repository {
    /// Stage a working-tree file for the next commit.
    ///
    /// Content identical to what the current commit already tracks stages
    /// nothing and drops any earlier staged version of the path.
    pub fn add(&mut self, path: &str) -> Result<()> {
        if !self.workspace().exists(path) {
            return Err(LitError::not_found("File does not exist."));
        }

        let content = self.workspace().read_file(path)?;
        let id = self.objects().put_staged(&content)?;
        let head = self.current_commit()?;
        let tracked = head.tree().get(path).cloned();

        self.index_mut().stage_add(path, id, tracked.as_ref());
        self.save_index()
    }
}
