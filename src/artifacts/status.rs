//! Status report model and rendering
//!
//! Gathering the report from the working tree lives with the `status`
//! command; this module owns the shape of the report and its exact textual
//! form. Sections always appear, even when empty, in a fixed order.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ChangeKind {
    Modified,
    Deleted,
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeKind::Modified => write!(f, "modified"),
            ChangeKind::Deleted => write!(f, "deleted"),
        }
    }
}

#[derive(Debug, Default)]
pub struct StatusReport {
    pub current_branch: String,
    /// All branch names, sorted.
    pub branches: Vec<String>,
    /// Paths staged for addition, sorted.
    pub staged: Vec<String>,
    /// Paths staged for removal, sorted.
    pub removed: Vec<String>,
    /// Tracked or staged paths whose working copy drifted, sorted by path.
    pub modifications: Vec<(String, ChangeKind)>,
    /// Working files neither staged nor tracked, sorted.
    pub untracked: Vec<String>,
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Branches ===")?;
        for branch in &self.branches {
            if *branch == self.current_branch {
                writeln!(f, "*{}", branch)?;
            } else {
                writeln!(f, "{}", branch)?;
            }
        }

        writeln!(f, "\n=== Staged Files ===")?;
        for path in &self.staged {
            writeln!(f, "{}", path)?;
        }

        writeln!(f, "\n=== Removed Files ===")?;
        for path in &self.removed {
            writeln!(f, "{}", path)?;
        }

        writeln!(f, "\n=== Modifications Not Staged For Commit ===")?;
        for (path, kind) in &self.modifications {
            writeln!(f, "{} ({})", path, kind)?;
        }

        writeln!(f, "\n=== Untracked Files ===")?;
        for path in &self.untracked {
            writeln!(f, "{}", path)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn all_sections_render_in_order() {
        let report = StatusReport {
            current_branch: "master".to_string(),
            branches: vec!["feature".to_string(), "master".to_string()],
            staged: vec!["new.txt".to_string()],
            removed: vec!["gone.txt".to_string()],
            modifications: vec![
                ("drifted.txt".to_string(), ChangeKind::Modified),
                ("vanished.txt".to_string(), ChangeKind::Deleted),
            ],
            untracked: vec!["loose.txt".to_string()],
        };

        assert_eq!(
            report.to_string(),
            "=== Branches ===\n\
             feature\n\
             *master\n\
             \n\
             === Staged Files ===\n\
             new.txt\n\
             \n\
             === Removed Files ===\n\
             gone.txt\n\
             \n\
             === Modifications Not Staged For Commit ===\n\
             drifted.txt (modified)\n\
             vanished.txt (deleted)\n\
             \n\
             === Untracked Files ===\n\
             loose.txt\n"
        );
    }

    #[test]
    fn empty_sections_still_appear() {
        let report = StatusReport {
            current_branch: "master".to_string(),
            branches: vec!["master".to_string()],
            ..StatusReport::default()
        };

        assert_eq!(
            report.to_string(),
            "=== Branches ===\n\
             *master\n\
             \n\
             === Staged Files ===\n\
             \n\
             === Removed Files ===\n\
             \n\
             === Modifications Not Staged For Commit ===\n\
             \n\
             === Untracked Files ===\n"
        );
    }
}
