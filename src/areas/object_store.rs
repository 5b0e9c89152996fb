//! Content-addressable blob storage
//!
//! Blobs are stored once per distinct content, keyed by the hash of their
//! bytes, and never mutated after creation. Two physical areas exist: a
//! transient staged area written by `add` and a permanent committed area that
//! holds every blob referenced by any commit. `commit` promotes staged blobs
//! into the committed area and clears the staged area.
//!
//! On-disk entries are zlib-compressed and written through a temp file plus
//! rename, so a reader never observes a half-written object.

use crate::artifacts::object_id::ObjectId;
use crate::errors::{LitError, Result};
use bytes::Bytes;
use chrono::Utc;
use derive_new::new;
use std::io::{Read, Write};
use std::path::Path;

#[derive(Debug, new)]
pub struct ObjectStore {
    staged_path: Box<Path>,
    committed_path: Box<Path>,
}

impl ObjectStore {
    pub fn staged_path(&self) -> &Path {
        &self.staged_path
    }

    pub fn committed_path(&self) -> &Path {
        &self.committed_path
    }

    /// Store bytes in the committed area. Idempotent: re-putting existing
    /// content is a no-op that returns the same hash.
    pub fn put(&self, data: &[u8]) -> Result<ObjectId> {
        let id = ObjectId::hash_bytes(data);
        self.write_object(&self.committed_path, &id, data)?;
        Ok(id)
    }

    /// Store bytes in the staged area, pending the next commit.
    pub fn put_staged(&self, data: &[u8]) -> Result<ObjectId> {
        let id = ObjectId::hash_bytes(data);
        self.write_object(&self.staged_path, &id, data)?;
        Ok(id)
    }

    /// Read a blob from the committed area.
    pub fn get(&self, id: &ObjectId) -> Result<Bytes> {
        let object_path = self.committed_path.join(id.as_ref());
        if !object_path.exists() {
            return Err(LitError::not_found(format!("No blob with id {}", id)));
        }
        let compressed = std::fs::read(&object_path)?;
        Self::decompress(&compressed)
    }

    pub fn exists(&self, id: &ObjectId) -> bool {
        self.committed_path.join(id.as_ref()).exists()
    }

    /// Move one staged blob into the committed area. If the blob is not in
    /// the staged area it must already be committed (a merge can stage a
    /// hash whose content an earlier commit stored).
    pub fn promote(&self, id: &ObjectId) -> Result<()> {
        let staged = self.staged_path.join(id.as_ref());
        let committed = self.committed_path.join(id.as_ref());

        if staged.exists() {
            if committed.exists() {
                std::fs::remove_file(&staged)?;
            } else {
                std::fs::rename(&staged, &committed)?;
            }
            return Ok(());
        }

        if !committed.exists() {
            return Err(LitError::not_found(format!("No blob with id {}", id)));
        }
        Ok(())
    }

    /// Drop every pending blob from the staged area.
    pub fn clear_staged(&self) -> Result<()> {
        for entry in std::fs::read_dir(&self.staged_path)? {
            let entry = entry?;
            if entry.path().is_file() {
                std::fs::remove_file(entry.path())?;
            }
        }
        Ok(())
    }

    fn write_object(&self, area: &Path, id: &ObjectId, data: &[u8]) -> Result<()> {
        let object_path = area.join(id.as_ref());
        if object_path.exists() {
            // deduplicated: identical content is already stored
            return Ok(());
        }

        let compressed = Self::compress(data)?;
        let temp_path = area.join(Self::temp_name());
        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)?;
        file.write_all(&compressed)?;
        std::fs::rename(&temp_path, &object_path)?;

        Ok(())
    }

    fn compress(data: &[u8]) -> Result<Vec<u8>> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(data)?;
        Ok(encoder.finish()?)
    }

    fn decompress(data: &[u8]) -> Result<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(data);
        let mut out = Vec::new();
        decoder
            .read_to_end(&mut out)
            .map_err(|_| LitError::corrupt("Unable to decompress object content".to_string()))?;
        Ok(out.into())
    }

    fn temp_name() -> String {
        format!(
            "tmp-obj-{}-{}",
            std::process::id(),
            Utc::now().timestamp_nanos_opt().unwrap_or_default()
        )
    }
}
