//! Versioned record encoding for persisted entities
//!
//! Every entity written to disk (commits, branch pointers, HEAD, the two
//! halves of the staging index) starts with a one-line header naming the
//! record kind and its schema version:
//!
//! ```text
//! lit <kind> <version>
//! ```
//!
//! Readers reject records of the wrong kind or an unsupported version, so a
//! future schema change can bump the version without silently misreading old
//! repositories.

use crate::errors::{LitError, Result};

/// Current schema version for all persisted records.
pub const FORMAT_VERSION: u32 = 1;

/// Render the header line (including the trailing newline) for a record kind.
pub fn header(kind: &str) -> String {
    format!("lit {} {}\n", kind, FORMAT_VERSION)
}

/// Validate the header of a persisted record and return its body.
pub fn body<'a>(content: &'a str, kind: &str) -> Result<&'a str> {
    let (line, rest) = content
        .split_once('\n')
        .ok_or_else(|| LitError::corrupt(format!("Truncated {} record", kind)))?;

    let mut fields = line.split(' ');
    if fields.next() != Some("lit") {
        return Err(LitError::corrupt(format!("Not a lit {} record", kind)));
    }
    if fields.next() != Some(kind) {
        return Err(LitError::corrupt(format!(
            "Expected a {} record, found: {}",
            kind, line
        )));
    }
    let version = fields
        .next()
        .and_then(|v| v.parse::<u32>().ok())
        .ok_or_else(|| LitError::corrupt(format!("Missing version in {} record", kind)))?;
    if version != FORMAT_VERSION {
        return Err(LitError::corrupt(format!(
            "Unsupported {} record version: {}",
            kind, version
        )));
    }

    Ok(rest)
}
