//! Repository: the aggregate of every storage area
//!
//! Commands are implemented as methods on [`Repository`], one file per
//! command under `commands/porcelain`. This module only wires the areas
//! together and hosts the working-tree synchronization helpers they share.

use crate::areas::commit_store::CommitStore;
use crate::areas::index::Index;
use crate::areas::object_store::ObjectStore;
use crate::areas::refs::Refs;
use crate::areas::workspace::{Workspace, METADATA_DIR};
use crate::artifacts::commit::Commit;
use crate::artifacts::object_id::ObjectId;
use crate::artifacts::tree::Tree;
use crate::errors::{LitError, Result};
use std::cell::RefCell;
use std::io::Write;
use std::path::Path;

pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn Write>>,
    objects: ObjectStore,
    commits: CommitStore,
    refs: Refs,
    workspace: Workspace,
    index: Index,
}

impl std::fmt::Debug for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl Repository {
    /// Assemble a repository rooted at `path` without touching the disk.
    /// `init` creates the metadata layout; every other command goes through
    /// [`Repository::open`] instead.
    pub fn new(path: Box<Path>, writer: Box<dyn Write>) -> Self {
        let metadata = path.join(METADATA_DIR);
        Repository {
            objects: ObjectStore::new(
                metadata.join("staged-objects").into_boxed_path(),
                metadata.join("committed-objects").into_boxed_path(),
            ),
            commits: CommitStore::new(metadata.join("commits").into_boxed_path()),
            refs: Refs::new(metadata.join("branches").into_boxed_path()),
            workspace: Workspace::new(path.clone()),
            index: Index::new(metadata.join("index").into_boxed_path()),
            writer: RefCell::new(writer),
            path,
        }
    }

    /// Open an existing repository, loading the staging index.
    pub fn open(path: Box<Path>, writer: Box<dyn Write>) -> Result<Self> {
        let mut repository = Repository::new(path, writer);
        if !repository.is_initialized() {
            return Err(LitError::precondition_failed(
                "Not in an initialized lit directory.",
            ));
        }
        repository.index.load()?;
        Ok(repository)
    }

    pub fn is_initialized(&self) -> bool {
        self.metadata_path().is_dir()
    }

    pub fn metadata_path(&self) -> std::path::PathBuf {
        self.path.join(METADATA_DIR)
    }

    pub fn objects(&self) -> &ObjectStore {
        &self.objects
    }

    pub fn commits(&self) -> &CommitStore {
        &self.commits
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn index(&self) -> &Index {
        &self.index
    }

    pub fn index_mut(&mut self) -> &mut Index {
        &mut self.index
    }

    pub fn writeln(&self, line: &str) -> Result<()> {
        writeln!(self.writer.borrow_mut(), "{}", line)?;
        Ok(())
    }

    /// Commit the active branch currently points at.
    pub fn current_commit(&self) -> Result<Commit> {
        self.commits.read(&self.refs.head_commit()?)
    }

    /// Load a commit from a user-supplied id string. Malformed ids report
    /// the same way as unknown ones.
    pub fn resolve_commit(&self, id: &str) -> Result<Commit> {
        let id = ObjectId::try_parse(id.to_string())
            .map_err(|_| LitError::not_found("No commit with that id exists."))?;
        self.commits.read(&id)
    }

    /// Write one tracked file from a commit's snapshot into the working
    /// tree, overwriting whatever is there.
    pub fn materialize_one(&self, commit: &Commit, path: &str) -> Result<()> {
        let blob = commit
            .tree()
            .get(path)
            .ok_or_else(|| LitError::not_found("File does not exist in that commit."))?;
        let content = self.objects.get(blob)?;
        self.workspace.write_file(path, &content)
    }

    /// Replace the working tree's tracked files with a commit's snapshot:
    /// write everything the target tracks, then delete files the current
    /// commit tracks but the target does not.
    pub fn materialize_all(&self, target: &Commit, current: &Commit) -> Result<()> {
        for (path, blob) in target.tree().iter() {
            let content = self.objects.get(blob)?;
            self.workspace.write_file(path, &content)?;
        }
        for path in current.tree().paths() {
            if !target.tree().contains(path) {
                self.workspace.remove_file(path)?;
            }
        }
        Ok(())
    }

    /// Files present in the working tree but unknown to both the given
    /// snapshot and the staging index. Checkout and merge refuse to run when
    /// any exist, since they would be overwritten without a trace.
    pub fn untracked_files(&self, tree: &Tree) -> Result<Vec<String>> {
        let mut untracked = Vec::new();
        for path in self.workspace.list_files()? {
            if !tree.contains(&path) && !self.index.mentions(&path) {
                untracked.push(path);
            }
        }
        Ok(untracked)
    }

    /// Guard shared by branch checkout, reset and merge.
    pub fn ensure_no_untracked(&self, tree: &Tree) -> Result<()> {
        if self.untracked_files(tree)?.is_empty() {
            Ok(())
        } else {
            Err(LitError::precondition_failed(
                "There is an untracked file in the way; delete it, or add and commit it first.",
            ))
        }
    }

    /// Persist the index and drop any staged blobs it no longer references.
    pub fn save_index(&self) -> Result<()> {
        self.index.save()
    }
}
