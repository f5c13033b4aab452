use std::env;
use std::io::Write as _;
use std::path;

use crate::error::*;

#[derive(Clone, Debug, PartialEq, Eq, clap::Args)]
pub(crate) struct ConfigArgs {
    /// Config file to use [default: vidya.yml]
    #[arg(short, long, value_name = "FILE")]
    pub(crate) config: Option<path::PathBuf>,

    /// Site destination folder [default: ./build]
    #[arg(short, long, value_name = "DIR")]
    pub(crate) destination: Option<path::PathBuf>,
}

impl ConfigArgs {
    pub(crate) fn load_config(&self) -> Result<vidya::Config> {
        let config = self.load_site_config()?;
        let mut config = vidya::Config::from_config(config)?;

        if let Some(destination) = self.destination.as_deref() {
            log::debug!(
                "Overriding config `destination` with `{}`",
                destination.display()
            );
            config = config.with_destination(destination);
        }

        Ok(config)
    }

    fn load_site_config(&self) -> Result<vidya_config::Config> {
        let config = if let Some(config_path) = self.config.as_deref() {
            vidya_config::Config::from_file(config_path).with_context(|| {
                anyhow::format_err!("Error reading config file {}", config_path.display())
            })?
        } else {
            let cwd = env::current_dir().context("Failed to read current directory")?;
            vidya_config::Config::from_cwd(cwd)?
        };
        Ok(config)
    }
}

pub(crate) fn init_logging(
    level: clap_verbosity_flag::Verbosity<clap_verbosity_flag::InfoLevel>,
    colored: bool,
) {
    let Some(level) = level.log_level() else {
        return;
    };

    let mut builder = env_logger::Builder::new();
    builder.write_style(if colored {
        env_logger::WriteStyle::Always
    } else {
        env_logger::WriteStyle::Never
    });
    builder.filter(None, level.to_level_filter());

    if level == log::Level::Trace || level == log::Level::Debug {
        builder.format_timestamp_secs();
    } else {
        builder.format(move |f, record| {
            let style = level_style(record.level(), colored);
            writeln!(
                f,
                "{}[{}]{} {}",
                style.render(),
                record.level().as_str().to_lowercase(),
                style.render_reset(),
                record.args()
            )
        });
    }

    builder.init();
}

fn level_style(level: log::Level, colored: bool) -> anstyle::Style {
    if !colored {
        return anstyle::Style::new();
    }
    match level {
        log::Level::Error => anstyle::AnsiColor::Red.on_default().bold(),
        log::Level::Warn => anstyle::AnsiColor::Yellow.on_default(),
        log::Level::Info => anstyle::AnsiColor::Green.on_default(),
        log::Level::Debug | log::Level::Trace => anstyle::Style::new().dimmed(),
    }
}
