use crate::areas::repository::Repository;
use crate::errors::{LitError, Result};

impl Repository {
    /// Print the ids of every commit whose message matches exactly.
    pub fn find(&self, message: &str) -> Result<()> {
        let ids = self.commits().find_by_message(message)?;
        if ids.is_empty() {
            return Err(LitError::not_found("Found no commit with that message."));
        }
        for id in ids {
            self.writeln(id.as_ref())?;
        }
        Ok(())
    }
}
