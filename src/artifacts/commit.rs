//! Immutable commit records
//!
//! A commit snapshots the whole tracked tree, carries a message and a
//! timestamp, and links to zero, one or two parents. The root commit has no
//! parent and an empty tree; a merge commit has exactly two parents. Commits
//! are append-only: created once, read many times, never rewritten.

use crate::artifacts::object_id::ObjectId;
use crate::artifacts::record;
use crate::artifacts::tree::Tree;
use crate::errors::{LitError, Result};
use chrono::{DateTime, Utc};

const RECORD_KIND: &str = "commit";

/// Message given to the automatically created root commit.
pub const ROOT_COMMIT_MESSAGE: &str = "initial commit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    id: ObjectId,
    message: String,
    timestamp: DateTime<Utc>,
    parents: Vec<ObjectId>,
    tree: Tree,
}

impl Commit {
    /// Create a commit, deriving its id from message, parents and timestamp.
    pub fn new(
        message: String,
        parents: Vec<ObjectId>,
        tree: Tree,
        timestamp: DateTime<Utc>,
    ) -> Result<Self> {
        if message.is_empty() {
            return Err(LitError::invalid_argument("Please enter a commit message."));
        }
        if parents.len() > 2 {
            return Err(LitError::invalid_argument(format!(
                "A commit cannot have {} parents",
                parents.len()
            )));
        }

        let id = Self::derive_id(&message, &parents, timestamp);
        Ok(Commit {
            id,
            message,
            timestamp,
            parents,
            tree,
        })
    }

    /// The parentless commit every repository starts from: empty tree,
    /// timestamp fixed at the Unix epoch so its id is stable.
    pub fn root() -> Self {
        Commit::new(
            ROOT_COMMIT_MESSAGE.to_string(),
            Vec::new(),
            Tree::new(),
            DateTime::<Utc>::UNIX_EPOCH,
        )
        .expect("root commit is well-formed")
    }

    fn derive_id(message: &str, parents: &[ObjectId], timestamp: DateTime<Utc>) -> ObjectId {
        let seconds = timestamp.timestamp().to_string();
        let mut parts: Vec<&[u8]> = vec![message.as_bytes()];
        for parent in parents {
            parts.push(parent.as_ref().as_bytes());
        }
        parts.push(seconds.as_bytes());
        ObjectId::hash_parts(&parts)
    }

    pub fn id(&self) -> &ObjectId {
        &self.id
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn parents(&self) -> &[ObjectId] {
        &self.parents
    }

    /// First-parent link, the only edge history traversal follows.
    pub fn first_parent(&self) -> Option<&ObjectId> {
        self.parents.first()
    }

    pub fn is_merge(&self) -> bool {
        self.parents.len() == 2
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Timestamp rendered for `log` output.
    pub fn format_date(&self) -> String {
        self.timestamp.format("%a %b %-d %H:%M:%S %Y %z").to_string()
    }

    pub fn encode(&self) -> String {
        let mut out = record::header(RECORD_KIND);
        out.push_str(&format!("id {}\n", self.id));
        for parent in &self.parents {
            out.push_str(&format!("parent {}\n", parent));
        }
        out.push_str(&format!("timestamp {}\n", self.timestamp.timestamp()));
        self.tree.encode_into(&mut out);
        out.push('\n');
        out.push_str(&self.message);
        out.push('\n');
        out
    }

    pub fn decode(content: &str) -> Result<Self> {
        let body = record::body(content, RECORD_KIND)?;
        let (fields, message) = body
            .split_once("\n\n")
            .ok_or_else(|| LitError::corrupt("Commit record without message".to_string()))?;

        let mut id = None;
        let mut timestamp = None;
        let mut parents = Vec::new();
        let mut tree = Tree::new();

        for line in fields.lines() {
            let (tag, payload) = line
                .split_once(' ')
                .ok_or_else(|| LitError::corrupt(format!("Malformed commit line: {}", line)))?;
            match tag {
                "id" => id = Some(ObjectId::try_parse(payload.to_string())?),
                "parent" => parents.push(ObjectId::try_parse(payload.to_string())?),
                "timestamp" => {
                    let seconds: i64 = payload.parse().map_err(|_| {
                        LitError::corrupt(format!("Malformed commit timestamp: {}", payload))
                    })?;
                    timestamp = DateTime::from_timestamp(seconds, 0);
                }
                "tree" => {
                    let (path, blob) = Tree::decode_entry(payload)?;
                    tree.insert(path, blob);
                }
                _ => {
                    return Err(LitError::corrupt(format!(
                        "Unknown commit field: {}",
                        tag
                    )));
                }
            }
        }

        if parents.len() > 2 {
            return Err(LitError::corrupt("Commit with more than two parents".to_string()));
        }

        Ok(Commit {
            id: id.ok_or_else(|| LitError::corrupt("Commit record without id".to_string()))?,
            message: message.trim_end_matches('\n').to_string(),
            timestamp: timestamp
                .ok_or_else(|| LitError::corrupt("Commit record without timestamp".to_string()))?,
            parents,
            tree,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_tree() -> Tree {
        let mut tree = Tree::new();
        tree.insert("a.txt".to_string(), ObjectId::hash_bytes(b"hello"));
        tree.insert("dir/b.txt".to_string(), ObjectId::hash_bytes(b"world"));
        tree
    }

    #[test]
    fn root_commit_is_stable() {
        let first = Commit::root();
        let second = Commit::root();
        assert_eq!(first.id(), second.id());
        assert!(first.parents().is_empty());
        assert!(first.tree().is_empty());
        assert_eq!(first.message(), ROOT_COMMIT_MESSAGE);
    }

    #[test]
    fn empty_message_is_rejected() {
        let result = Commit::new(String::new(), Vec::new(), Tree::new(), Utc::now());
        assert!(matches!(result, Err(crate::errors::LitError::InvalidArgument(_))));
    }

    #[test]
    fn encode_decode_round_trip() {
        let root = Commit::root();
        let commit = Commit::new(
            "first\n\nwith a body".to_string(),
            vec![root.id().clone()],
            sample_tree(),
            DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
        )
        .unwrap();

        let decoded = Commit::decode(&commit.encode()).unwrap();
        assert_eq!(decoded, commit);
    }

    #[test]
    fn merge_commit_keeps_both_parents() {
        let root = Commit::root();
        let left = Commit::new(
            "left".to_string(),
            vec![root.id().clone()],
            Tree::new(),
            DateTime::from_timestamp(1, 0).unwrap(),
        )
        .unwrap();
        let merge = Commit::new(
            "Merged feature into master.".to_string(),
            vec![left.id().clone(), root.id().clone()],
            Tree::new(),
            DateTime::from_timestamp(2, 0).unwrap(),
        )
        .unwrap();

        assert!(merge.is_merge());
        let decoded = Commit::decode(&merge.encode()).unwrap();
        assert_eq!(decoded.parents(), merge.parents());
        assert_eq!(decoded.first_parent(), Some(left.id()));
    }

    #[test]
    fn id_depends_on_parents_and_timestamp() {
        let timestamp = DateTime::from_timestamp(42, 0).unwrap();
        let a = Commit::new("same".to_string(), Vec::new(), Tree::new(), timestamp).unwrap();
        let b = Commit::new(
            "same".to_string(),
            vec![a.id().clone()],
            Tree::new(),
            timestamp,
        )
        .unwrap();
        let c = Commit::new(
            "same".to_string(),
            Vec::new(),
            Tree::new(),
            DateTime::from_timestamp(43, 0).unwrap(),
        )
        .unwrap();

        assert_ne!(a.id(), b.id());
        assert_ne!(a.id(), c.id());
    }
}
