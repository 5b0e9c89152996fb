//! Branches and HEAD
//!
//! Branch pointers live one file per branch under `branches/`, each holding
//! a commit id. `branches/HEAD` holds the NAME of the active branch, never a
//! commit id, so this tool has no detached-HEAD state: HEAD always resolves
//! through a branch.

use crate::artifacts::object_id::ObjectId;
use crate::artifacts::record;
use crate::errors::{LitError, Result};
use derive_new::new;
use std::path::Path;

const BRANCH_KIND: &str = "branch";
const HEAD_KIND: &str = "head";
const HEAD_FILE: &str = "HEAD";

pub const DEFAULT_BRANCH: &str = "master";

#[derive(Debug, new)]
pub struct Refs {
    path: Box<Path>,
}

impl Refs {
    /// Create the default branch at the root commit and point HEAD at it.
    pub fn initialize(&self, root_id: &ObjectId) -> Result<()> {
        if self.path.join(HEAD_FILE).exists() {
            return Err(LitError::already_exists(
                "A lit version-control system already exists in the current directory.",
            ));
        }
        self.write_branch(DEFAULT_BRANCH, root_id)?;
        self.write_head(DEFAULT_BRANCH)
    }

    /// Create a new branch at the given commit. HEAD does not move.
    pub fn create(&self, name: &str, id: &ObjectId) -> Result<()> {
        if self.branch_path(name).exists() {
            return Err(LitError::already_exists(
                "A branch with that name already exists.",
            ));
        }
        self.write_branch(name, id)
    }

    /// Delete a branch pointer. The active branch cannot be deleted.
    pub fn delete(&self, name: &str) -> Result<()> {
        if self.head_branch()? == name {
            return Err(LitError::precondition_failed(
                "Cannot remove the current branch.",
            ));
        }
        let branch_path = self.branch_path(name);
        if !branch_path.exists() {
            return Err(LitError::not_found(
                "A branch with that name does not exist.",
            ));
        }
        std::fs::remove_file(branch_path)?;
        Ok(())
    }

    /// Point HEAD at another existing branch.
    pub fn switch_to(&self, name: &str) -> Result<()> {
        if !self.branch_path(name).exists() {
            return Err(LitError::not_found("No such branch exists."));
        }
        self.write_head(name)
    }

    /// Move the active branch pointer to a new commit.
    pub fn advance(&self, id: &ObjectId) -> Result<()> {
        let branch = self.head_branch()?;
        self.write_branch(&branch, id)
    }

    /// Name of the branch HEAD points at.
    pub fn head_branch(&self) -> Result<String> {
        let content = std::fs::read_to_string(self.path.join(HEAD_FILE))?;
        Ok(record::body(&content, HEAD_KIND)?.trim_end().to_string())
    }

    /// Commit id the active branch points at.
    pub fn head_commit(&self) -> Result<ObjectId> {
        let branch = self.head_branch()?;
        self.read(&branch)?
            .ok_or_else(|| LitError::corrupt(format!("HEAD points at missing branch {}", branch)))
    }

    /// Commit id a branch points at, `None` when the branch does not exist.
    pub fn read(&self, name: &str) -> Result<Option<ObjectId>> {
        let branch_path = self.branch_path(name);
        if !branch_path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&branch_path)?;
        let id = record::body(&content, BRANCH_KIND)?.trim_end();
        Ok(Some(ObjectId::try_parse(id.to_string())?))
    }

    /// All branch names in lexicographic order.
    pub fn list(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in std::fs::read_dir(&self.path)? {
            let name = entry?.file_name().to_string_lossy().into_owned();
            if name != HEAD_FILE {
                names.push(name);
            }
        }
        names.sort();
        Ok(names)
    }

    fn branch_path(&self, name: &str) -> std::path::PathBuf {
        self.path.join(name)
    }

    fn write_branch(&self, name: &str, id: &ObjectId) -> Result<()> {
        let mut content = record::header(BRANCH_KIND);
        content.push_str(id.as_ref());
        content.push('\n');
        std::fs::write(self.branch_path(name), content)?;
        Ok(())
    }

    fn write_head(&self, name: &str) -> Result<()> {
        let mut content = record::header(HEAD_KIND);
        content.push_str(name);
        content.push('\n');
        std::fs::write(self.path.join(HEAD_FILE), content)?;
        Ok(())
    }
}
