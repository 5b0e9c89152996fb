use crate::areas::repository::Repository;
use crate::errors::{LitError, Result};

impl Repository {
    /// Unstage a path, and stage its removal when the current commit tracks
    /// it. A tracked removal also deletes the working-tree file.
    pub fn rm(&mut self, path: &str) -> Result<()> {
        let staged = self.index().staged_hash(path).is_some();
        let tracked = self.current_commit()?.tree().contains(path);

        if !staged && !tracked {
            return Err(LitError::precondition_failed("No reason to remove the file."));
        }

        self.index_mut().stage_remove(path, tracked);
        if tracked {
            self.workspace().remove_file(path)?;
        }
        self.save_index()
    }
}
