use crate::areas::repository::Repository;
use crate::artifacts::merge::engine::{self, MergeOutcome};
use crate::artifacts::merge::split_point::SplitPointFinder;
use crate::errors::{LitError, Result};

impl Repository {
    /// Three-way merge of another branch into the active one.
    ///
    /// Fast-forwards when the split point is the current head. Otherwise
    /// reconciles the two snapshots against their split point, applies every
    /// outcome to the working tree and index, and concludes with a
    /// two-parent commit, conflicts included.
    pub fn merge(&mut self, branch: &str) -> Result<()> {
        if !self.index().is_empty() {
            return Err(LitError::precondition_failed("You have uncommitted changes."));
        }
        let other_id = self
            .refs()
            .read(branch)?
            .ok_or_else(|| LitError::not_found("A branch with that name does not exist."))?;
        let current_branch = self.refs().head_branch()?;
        if current_branch == branch {
            return Err(LitError::precondition_failed(
                "Cannot merge a branch with itself.",
            ));
        }

        let head_id = self.refs().head_commit()?;
        let finder = SplitPointFinder::new(|id| self.commits().first_parent(id));
        let split = finder.find(&head_id, &other_id)?;

        if split.current_chain.contains(&other_id) {
            return Err(LitError::precondition_failed(
                "Given branch is an ancestor of the current branch.",
            ));
        }
        let current = self.current_commit()?;
        if split.id == head_id {
            // Fast-forward: move the active branch to the other head, no
            // merge commit.
            self.ensure_no_untracked(current.tree())?;
            let other = self.commits().read(&other_id)?;
            self.materialize_all(&other, &current)?;
            self.refs().advance(&other_id)?;
            self.index_mut().clear();
            self.save_index()?;
            self.objects().clear_staged()?;
            return self.writeln("Current branch fast-forwarded.");
        }

        let other = self.commits().read(&other_id)?;
        let split_commit = self.commits().read(&split.id)?;
        let outcomes = engine::reconcile(split_commit.tree(), current.tree(), other.tree());

        let untracked = self.untracked_files(current.tree())?;
        let collides = untracked.iter().any(|path| {
            outcomes
                .iter()
                .any(|(touched, outcome)| touched == path && *outcome != MergeOutcome::Unchanged)
        });
        if collides {
            return Err(LitError::precondition_failed(
                "There is an untracked file in the way; delete it, or add and commit it first.",
            ));
        }

        let mut conflicted = false;
        for (path, outcome) in outcomes {
            match outcome {
                MergeOutcome::Unchanged => {}
                MergeOutcome::TakeOther(id) => {
                    let content = self.objects().get(&id)?;
                    self.workspace().write_file(&path, &content)?;
                    let tracked = current.tree().get(&path).cloned();
                    self.index_mut().stage_add(&path, id, tracked.as_ref());
                }
                MergeOutcome::RemoveCurrent => {
                    self.workspace().remove_file(&path)?;
                    self.index_mut().stage_remove(&path, true);
                }
                MergeOutcome::Conflict { current: ours, other: theirs } => {
                    conflicted = true;
                    let ours = ours.map(|id| self.objects().get(&id)).transpose()?;
                    let theirs = theirs.map(|id| self.objects().get(&id)).transpose()?;
                    let merged =
                        engine::conflict_bytes(ours.as_deref(), theirs.as_deref());
                    self.workspace().write_file(&path, &merged)?;
                    let id = self.objects().put_staged(&merged)?;
                    let tracked = current.tree().get(&path).cloned();
                    self.index_mut().stage_add(&path, id, tracked.as_ref());
                }
            }
        }
        self.save_index()?;

        let message = format!("Merged {} into {}.", branch, current_branch);
        self.commit_with_parents(&message, vec![head_id, other_id])?;

        if conflicted {
            self.writeln("Encountered a merge conflict.")?;
        }
        Ok(())
    }
}
