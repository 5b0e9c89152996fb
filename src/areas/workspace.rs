//! Working tree access
//!
//! All reads and writes of user files go through here. Paths handed out are
//! always workspace-relative with `/` separators, matching the keys stored
//! in trees and the index. The metadata directory is invisible to listing.

use crate::errors::Result;
use bytes::Bytes;
use derive_new::new;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Name of the repository metadata directory at the workspace root.
pub const METADATA_DIR: &str = ".lit";

#[derive(Debug, new)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn root(&self) -> &Path {
        &self.path
    }

    fn full_path(&self, relative: &str) -> PathBuf {
        self.path.join(relative)
    }

    /// Every file in the working tree, sorted, excluding the metadata
    /// directory.
    pub fn list_files(&self) -> Result<Vec<String>> {
        let mut files = Vec::new();
        let walker = WalkDir::new(&self.path)
            .into_iter()
            .filter_entry(|entry| entry.file_name() != METADATA_DIR);
        for entry in walker {
            let entry = entry.map_err(std::io::Error::from)?;
            if !entry.file_type().is_file() {
                continue;
            }
            let relative = entry
                .path()
                .strip_prefix(&self.path)
                .expect("walked path is under the workspace root");
            files.push(relative.to_string_lossy().replace('\\', "/"));
        }
        files.sort();
        Ok(files)
    }

    pub fn exists(&self, relative: &str) -> bool {
        self.full_path(relative).is_file()
    }

    pub fn read_file(&self, relative: &str) -> Result<Bytes> {
        Ok(std::fs::read(self.full_path(relative))?.into())
    }

    /// Write a file, creating parent directories as needed.
    pub fn write_file(&self, relative: &str, data: &[u8]) -> Result<()> {
        let full = self.full_path(relative);
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(full, data)?;
        Ok(())
    }

    /// Delete a file. Already-absent files are fine.
    pub fn remove_file(&self, relative: &str) -> Result<()> {
        let full = self.full_path(relative);
        if full.is_file() {
            std::fs::remove_file(full)?;
        }
        Ok(())
    }
}
