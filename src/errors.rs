//! Typed failures surfaced by the core.
//!
//! Every operation reports its failure as one of these kinds; the CLI driver
//! is the only place a message is printed and the process exits. The core
//! never terminates the process and never recovers on its own.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, LitError>;

#[derive(Debug, Error)]
pub enum LitError {
    /// A commit, branch, blob or path that was asked for does not exist.
    #[error("{0}")]
    NotFound(String),

    /// A branch or repository with that name already exists.
    #[error("{0}")]
    AlreadyExists(String),

    /// Malformed user input, such as an empty commit message.
    #[error("{0}")]
    InvalidArgument(String),

    /// The repository is in a state that forbids the operation.
    #[error("{0}")]
    PreconditionFailed(String),

    /// A persisted record could not be decoded.
    #[error("{0}")]
    Corrupt(String),

    #[error("{0}")]
    Io(#[from] std::io::Error),
}

impl LitError {
    pub fn not_found(message: impl Into<String>) -> Self {
        LitError::NotFound(message.into())
    }

    pub fn already_exists(message: impl Into<String>) -> Self {
        LitError::AlreadyExists(message.into())
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        LitError::InvalidArgument(message.into())
    }

    pub fn precondition_failed(message: impl Into<String>) -> Self {
        LitError::PreconditionFailed(message.into())
    }

    pub fn corrupt(message: impl Into<String>) -> Self {
        LitError::Corrupt(message.into())
    }
}
