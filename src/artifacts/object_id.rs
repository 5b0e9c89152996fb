//! Object identifier (SHA-1 hash)
//!
//! Object IDs are 40-character lowercase hexadecimal strings. They identify
//! blobs by their content and commits by their metadata, so identical input
//! always yields the identical id (the store deduplicates on it).

use crate::errors::{LitError, Result};
use sha1::{Digest, Sha1};

/// Length of an object ID in hexadecimal characters.
pub const OBJECT_ID_LENGTH: usize = 40;

/// Content hash identifying a blob or a commit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct ObjectId(String);

impl ObjectId {
    /// Parse and validate an object ID from a string.
    pub fn try_parse(id: String) -> Result<Self> {
        if id.len() != OBJECT_ID_LENGTH {
            return Err(LitError::corrupt(format!(
                "Invalid object ID length: {}",
                id.len()
            )));
        }
        if !id.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(LitError::corrupt(format!(
                "Invalid object ID characters: {}",
                id
            )));
        }
        Ok(Self(id.to_ascii_lowercase()))
    }

    /// Hash a single byte sequence into an object ID.
    pub fn hash_bytes(data: &[u8]) -> Self {
        Self::hash_parts(&[data])
    }

    /// Hash a concatenation of byte sequences into an object ID.
    pub fn hash_parts(parts: &[&[u8]]) -> Self {
        let mut hasher = Sha1::new();
        for part in parts {
            hasher.update(part);
        }
        let digest = hasher.finalize();
        let hex = digest.iter().fold(
            String::with_capacity(OBJECT_ID_LENGTH),
            |mut acc, byte| {
                acc.push_str(&format!("{:02x}", byte));
                acc
            },
        );
        Self(hex)
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
