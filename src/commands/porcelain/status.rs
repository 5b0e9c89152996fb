use crate::areas::repository::Repository;
use crate::artifacts::object_id::ObjectId;
use crate::artifacts::status::{ChangeKind, StatusReport};
use crate::errors::Result;

impl Repository {
    pub fn status(&self) -> Result<()> {
        let rendered = self.gather_status()?.to_string();
        self.writeln(rendered.trim_end_matches('\n'))?;
        Ok(())
    }

    /// Classify every staged, tracked and loose working-tree file.
    pub fn gather_status(&self) -> Result<StatusReport> {
        let head = self.current_commit()?;
        let mut report = StatusReport {
            current_branch: self.refs().head_branch()?,
            branches: self.refs().list()?,
            ..StatusReport::default()
        };

        for (path, staged_hash) in self.index().added() {
            report.staged.push(path.clone());
            match self.working_hash(path)? {
                None => report
                    .modifications
                    .push((path.clone(), ChangeKind::Deleted)),
                Some(actual) if actual != *staged_hash => report
                    .modifications
                    .push((path.clone(), ChangeKind::Modified)),
                Some(_) => {}
            }
        }

        report.removed.extend(self.index().removed().cloned());

        for (path, tracked_hash) in head.tree().iter() {
            if self.index().mentions(path) {
                continue;
            }
            match self.working_hash(path)? {
                None => report
                    .modifications
                    .push((path.clone(), ChangeKind::Deleted)),
                Some(actual) if actual != *tracked_hash => report
                    .modifications
                    .push((path.clone(), ChangeKind::Modified)),
                Some(_) => {}
            }
        }
        report.modifications.sort();

        report.untracked = self.untracked_files(head.tree())?;
        Ok(report)
    }

    fn working_hash(&self, path: &str) -> Result<Option<ObjectId>> {
        if !self.workspace().exists(path) {
            return Ok(None);
        }
        let content = self.workspace().read_file(path)?;
        Ok(Some(ObjectId::hash_bytes(&content)))
    }
}
