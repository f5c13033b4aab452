use std::fmt;
use std::path;

use crate::error::*;

/// Where the built site goes unless told otherwise
pub const DEFAULT_DESTINATION: &str = "build";
/// Files copied verbatim into the destination
pub const STATIC_DIR: &str = "static";
/// Component overrides, `<Component>.liquid`
pub const THEME_DIR: &str = "src/theme";

/// Site configuration with its paths resolved against the project root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub source: path::PathBuf,
    pub destination: path::PathBuf,
    pub site: vidya_config::Config,
}

impl Config {
    pub fn from_config(source: vidya_config::Config) -> Result<Self> {
        let root = source.root.clone();
        let destination = root.join(DEFAULT_DESTINATION);
        let config = Self {
            source: root,
            destination,
            site: source,
        };
        Ok(config)
    }

    pub fn with_destination(mut self, destination: impl Into<path::PathBuf>) -> Self {
        self.destination = destination.into();
        self
    }

    pub fn static_dir(&self) -> path::PathBuf {
        self.source.join(STATIC_DIR)
    }

    pub fn theme_dir(&self) -> path::PathBuf {
        self.source.join(THEME_DIR)
    }

    pub fn docs_dir(&self) -> Option<path::PathBuf> {
        self.site.docs().map(|docs| docs.path.to_path(&self.source))
    }

    /// Stylesheet the layout links to, relative to both source and destination
    pub fn custom_css(&self) -> Option<&vidya_config::RelPath> {
        self.site
            .presets
            .classic
            .as_ref()
            .and_then(|c| c.theme.custom_css.as_deref())
    }

    /// Output directory for pages of `locale`
    pub fn locale_destination(&self, locale: &str) -> path::PathBuf {
        match self.site.i18n.locale_prefix(locale) {
            Some(prefix) => self.destination.join(prefix),
            None => self.destination.clone(),
        }
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# source: {}", self.source.display())?;
        writeln!(f, "# destination: {}", self.destination.display())?;
        write!(f, "{}", self.site)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn destination_defaults_under_root() {
        let site = vidya_config::Config {
            root: path::PathBuf::from("site"),
            ..Default::default()
        };
        let config = Config::from_config(site).unwrap();
        assert_eq!(config.source, path::Path::new("site"));
        assert_eq!(config.destination, path::Path::new("site/build"));
        assert_eq!(config.static_dir(), path::Path::new("site/static"));
    }

    #[test]
    fn non_default_locales_nest() {
        let site = vidya_config::Config {
            root: path::PathBuf::from("site"),
            i18n: vidya_config::I18n {
                default_locale: "en".into(),
                locales: vec!["en".into(), "hi".into()],
            },
            ..Default::default()
        };
        let config = Config::from_config(site).unwrap();
        assert_eq!(config.locale_destination("en"), path::Path::new("site/build"));
        assert_eq!(
            config.locale_destination("hi"),
            path::Path::new("site/build/hi")
        );
    }
}
