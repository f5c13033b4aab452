use crate::args;
use crate::error::*;

/// Print site debug information
#[derive(Clone, Debug, PartialEq, Eq, clap::Subcommand)]
pub(crate) enum DebugCommands {
    /// Prints post-processed config
    Config {
        #[command(flatten, next_help_heading = "Config")]
        config: args::ConfigArgs,
    },

    /// Prints the messages a locale resolves to
    Translations {
        /// Locale to print [default: the site's default locale]
        #[arg(long)]
        locale: Option<String>,

        #[command(flatten, next_help_heading = "Config")]
        config: args::ConfigArgs,
    },

    /// Prints theme components and whether the site swizzled them
    Theme {
        #[command(flatten, next_help_heading = "Config")]
        config: args::ConfigArgs,
    },
}

impl DebugCommands {
    pub(crate) fn run(&self) -> Result<()> {
        match self {
            Self::Config { config } => {
                let config = config.load_config()?;
                println!("{config}");
            }
            Self::Translations { locale, config } => {
                let config = config.load_config()?;
                let locale = locale
                    .as_deref()
                    .unwrap_or(config.site.i18n.default_locale.as_str());
                if !config.site.i18n.locales.iter().any(|l| l.as_str() == locale) {
                    anyhow::bail!("Locale `{locale}` is not in `i18n.locales`");
                }
                let translations = vidya::i18n::Translations::load(&config.source, locale)?;
                for (id, default) in vidya::theme::not_found::MESSAGES {
                    let message = translations.translate(id, default);
                    let origin = if translations.get(id).is_some() {
                        locale
                    } else {
                        "default"
                    };
                    println!("{id} ({origin}): {message}");
                }
            }
            Self::Theme { config } => {
                let config = config.load_config()?;
                let liquid = vidya::theme::Liquid::new()?;
                let mut theme = vidya::theme::Theme::classic(&liquid)?;
                theme.load_overrides(&liquid, &config.theme_dir())?;
                for (name, swizzled) in theme.components() {
                    let origin = if swizzled { "swizzled" } else { "classic" };
                    println!("{name} ({origin})");
                }
            }
        }

        Ok(())
    }
}
