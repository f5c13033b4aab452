use std::path;

use crate::error::*;

/// Create a documentation site
#[derive(Clone, Debug, PartialEq, Eq, clap::Args)]
pub(crate) struct InitArgs {
    /// Target directory
    #[arg(default_value = "./")]
    pub(crate) directory: path::PathBuf,
}

impl InitArgs {
    pub(crate) fn run(&self) -> Result<()> {
        vidya::create_new_project(&self.directory)
            .with_context(|| anyhow::format_err!("Could not create a new vidya site"))?;
        log::info!("Created new site at {}", self.directory.display());

        Ok(())
    }
}
