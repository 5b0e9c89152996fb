use crate::areas::repository::Repository;
use crate::errors::{LitError, Result};

impl Repository {
    /// Create the metadata layout, the root commit and the default branch.
    pub fn init(&self) -> Result<()> {
        if self.is_initialized() {
            return Err(LitError::already_exists(
                "A lit version-control system already exists in the current directory.",
            ));
        }

        let metadata = self.metadata_path();
        for area in [
            "staged-objects",
            "committed-objects",
            "commits",
            "branches",
            "index",
        ] {
            std::fs::create_dir_all(metadata.join(area))?;
        }

        let root = self.commits().create_root()?;
        self.refs().initialize(root.id())?;
        self.save_index()
    }
}
