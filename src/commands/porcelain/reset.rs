use crate::areas::repository::Repository;
use crate::errors::Result;

impl Repository {
    /// Move the active branch to an arbitrary commit and make the working
    /// tree match its snapshot. Clears the staging index.
    pub fn reset(&mut self, commit_id: &str) -> Result<()> {
        let target = self.resolve_commit(commit_id)?;
        let current = self.current_commit()?;
        self.ensure_no_untracked(current.tree())?;

        self.materialize_all(&target, &current)?;
        self.refs().advance(target.id())?;

        self.index_mut().clear();
        self.save_index()?;
        self.objects().clear_staged()
    }
}
