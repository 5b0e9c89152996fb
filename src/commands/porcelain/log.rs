use crate::areas::repository::Repository;
use crate::artifacts::commit::Commit;
use crate::errors::Result;

impl Repository {
    /// Print the active branch's history, newest first, following first
    /// parents only.
    pub fn log(&self) -> Result<()> {
        let head = self.refs().head_commit()?;
        for commit in self.commits().history(head) {
            self.print_commit(&commit?)?;
        }
        Ok(())
    }

    /// Print every commit ever made, in no particular order.
    pub fn global_log(&self) -> Result<()> {
        for commit in self.commits().iter_all()? {
            self.print_commit(&commit)?;
        }
        Ok(())
    }

    fn print_commit(&self, commit: &Commit) -> Result<()> {
        self.writeln("===")?;
        self.writeln(&format!("commit {}", commit.id()))?;
        self.writeln(&format!("Date: {}", commit.format_date()))?;
        self.writeln(commit.message())?;
        self.writeln("")
    }
}
