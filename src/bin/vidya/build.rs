use crate::args;
use crate::error::*;

/// Build the site into the destination folder
#[derive(Clone, Debug, PartialEq, Eq, clap::Args)]
pub(crate) struct BuildArgs {
    #[command(flatten, next_help_heading = "Config")]
    pub(crate) config: args::ConfigArgs,
}

impl BuildArgs {
    pub(crate) fn run(&self) -> Result<()> {
        let config = self.config.load_config()?;

        build(&config)?;
        log::info!("Build successful");

        Ok(())
    }
}

pub(crate) fn build(config: &vidya::Config) -> Result<vidya::BuildSummary> {
    log::info!(
        "Building from `{}` into `{}`",
        config.source.display(),
        config.destination.display()
    );
    let summary = vidya::build(config, &vidya::SystemClock)?;
    for page in &summary.pages {
        log::debug!("Wrote {}", page.display());
    }
    log::debug!("Copied {} static files", summary.static_files);

    Ok(summary)
}

/// Remove the destination folder
#[derive(Clone, Debug, PartialEq, Eq, clap::Args)]
pub(crate) struct CleanArgs {
    #[command(flatten, next_help_heading = "Config")]
    pub(crate) config: args::ConfigArgs,
}

impl CleanArgs {
    pub(crate) fn run(&self) -> Result<()> {
        let config = self.config.load_config()?;

        vidya::clean(&config)
    }
}
