use std::fmt;
use std::path;

use super::*;

pub const CONFIG_FILE: &str = "vidya.yml";

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "unstable", serde(deny_unknown_fields))]
#[cfg_attr(not(feature = "unstable"), non_exhaustive)]
pub struct Config {
    #[serde(skip)]
    pub root: path::PathBuf,
    pub title: String,
    pub tagline: String,
    pub favicon: String,
    pub url: String,
    pub base_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    pub on_broken_links: BrokenLinkPolicy,
    pub on_broken_markdown_links: BrokenLinkPolicy,
    pub i18n: I18n,
    pub presets: Presets,
    pub theme_config: ThemeConfig,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            root: Default::default(),
            title: "My Site".to_owned(),
            tagline: String::new(),
            favicon: "img/favicon.ico".to_owned(),
            url: "https://example.com".to_owned(),
            base_url: "/".to_owned(),
            organization_name: None,
            project_name: None,
            on_broken_links: BrokenLinkPolicy::Throw,
            on_broken_markdown_links: BrokenLinkPolicy::Warn,
            i18n: Default::default(),
            presets: Default::default(),
            theme_config: Default::default(),
        }
    }
}

impl Config {
    pub fn from_file<P: Into<path::PathBuf>>(path: P) -> Result<Config> {
        Self::from_file_internal(path.into())
    }

    fn from_file_internal(path: path::PathBuf) -> Result<Config> {
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Status::new("Failed to read config")
                .with_source(e)
                .context_with(|c| c.insert("Path", path.display().to_string()))
        })?;

        let mut config = if content.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(&content).map_err(|e| {
                Status::new("Failed to parse config")
                    .with_source(e)
                    .context_with(|c| c.insert("Path", path.display().to_string()))
            })?
        };

        let mut root = path;
        root.pop(); // Remove filename
        if root == path::Path::new("") {
            root = path::Path::new(".").to_owned();
        }
        config.root = root;

        Ok(config)
    }

    pub fn from_cwd<P: Into<path::PathBuf>>(cwd: P) -> Result<Config> {
        Self::from_cwd_internal(cwd.into())
    }

    fn from_cwd_internal(cwd: path::PathBuf) -> Result<Config> {
        let file_path = find_project_file(&cwd, CONFIG_FILE);
        let config = file_path
            .map(|p| {
                log::debug!("Using config file `{}`", p.display());
                Self::from_file(&p)
            })
            .unwrap_or_else(|| {
                log::warn!("No {CONFIG_FILE} file found in current directory, using default config.");
                let config = Config {
                    root: cwd,
                    ..Default::default()
                };
                Ok(config)
            })?;
        Ok(config)
    }

    /// Absolute link for a site-relative asset or route, honoring `baseUrl`
    ///
    /// External URLs are passed through.
    pub fn site_link(&self, target: &str) -> String {
        if is_external(target) {
            return target.to_owned();
        }
        let base = self.base_url.trim_end_matches('/');
        let target = target.trim_start_matches('/');
        format!("{base}/{target}")
    }

    pub fn docs(&self) -> Option<&DocsOptions> {
        self.presets.classic.as_ref().and_then(|c| c.docs.as_ref())
    }

    pub fn blog(&self) -> Option<&BlogOptions> {
        self.presets.classic.as_ref().and_then(|c| c.blog.as_ref())
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let converted = serde_yaml::to_string(self).map_err(|_| fmt::Error)?;
        write!(f, "{converted}")
    }
}

fn find_project_file<P: Into<path::PathBuf>>(dir: P, name: &str) -> Option<path::PathBuf> {
    find_project_file_internal(dir.into(), name)
}

fn find_project_file_internal(dir: path::PathBuf, name: &str) -> Option<path::PathBuf> {
    let mut file_path = dir;
    file_path.push(name);
    while !file_path.exists() {
        file_path.pop(); // filename
        let hit_bottom = !file_path.pop();
        if hit_bottom {
            return None;
        }
        file_path.push(name);
    }
    Some(file_path)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_from_file_ok() {
        let result = Config::from_file("tests/fixtures/config/vidya.yml").unwrap();
        assert_eq!(
            result.root,
            path::Path::new("tests/fixtures/config").to_path_buf()
        );
        assert_eq!(result.title, "VidyaSikha");
        assert_eq!(result.base_url, "/Notes/");
        assert_eq!(result.on_broken_links, BrokenLinkPolicy::Throw);
        assert_eq!(result.on_broken_markdown_links, BrokenLinkPolicy::Warn);
    }

    #[test]
    fn test_from_file_presets() {
        let result = Config::from_file("tests/fixtures/config/vidya.yml").unwrap();
        let docs = result.docs().unwrap();
        assert_eq!(docs.route_base_path, "/");
        assert_eq!(docs.sidebar_path.as_deref(), Some(RelPath::new("sidebars.js")));
        let blog = result.blog().unwrap();
        assert_eq!(blog.blog_title, "VidyaSikha Blog");
        assert_eq!(blog.posts_per_page, Limit::All);
        assert_eq!(blog.blog_sidebar_count, Limit::All);
        assert!(blog.show_reading_time);
    }

    #[test]
    fn test_from_file_theme_config() {
        let result = Config::from_file("tests/fixtures/config/vidya.yml").unwrap();
        let navbar = &result.theme_config.navbar;
        assert_eq!(navbar.items.len(), 1);
        assert_eq!(navbar.items[0].to.as_deref(), Some("/blog"));
        assert_eq!(navbar.items[0].position, Position::Left);
        let footer = &result.theme_config.footer;
        assert_eq!(footer.style, FooterStyle::Dark);
        assert_eq!(footer.links[0].items.len(), 2);
        assert_eq!(result.theme_config.prism.theme, "github");
        assert_eq!(result.theme_config.prism.dark_theme, "dracula");
    }

    #[test]
    fn test_from_file_empty() {
        let result = Config::from_file("tests/fixtures/config/empty.yml").unwrap();
        assert_eq!(
            result.root,
            path::Path::new("tests/fixtures/config").to_path_buf()
        );
        assert_eq!(
            Config {
                root: result.root.clone(),
                ..Default::default()
            },
            result
        );
    }

    #[test]
    fn test_from_file_disabled_blog() {
        let result = Config::from_file("tests/fixtures/config/no_blog.yml").unwrap();
        assert!(result.blog().is_none());
        assert!(result.docs().is_some());
    }

    #[test]
    fn test_from_file_invalid_syntax() {
        let result = Config::from_file("tests/fixtures/config/invalid_syntax.yml");
        assert!(result.is_err());
    }

    #[test]
    fn test_from_file_invalid_policy() {
        let result = Config::from_file("tests/fixtures/config/invalid_policy.yml");
        assert!(result.is_err());
    }

    #[test]
    fn test_from_file_not_found() {
        let result = Config::from_file("tests/fixtures/config/config_does_not_exist.yml");
        assert!(result.is_err());
    }

    #[test]
    fn test_from_cwd_ok() {
        let result = Config::from_cwd("tests/fixtures/config/child").unwrap();
        assert_eq!(
            result.root,
            path::Path::new("tests/fixtures/config").to_path_buf()
        );
    }

    #[test]
    fn test_from_cwd_not_found() {
        let result = Config::from_cwd("tests/fixtures").unwrap();
        assert_eq!(result.root, path::Path::new("tests/fixtures").to_path_buf());
    }

    #[test]
    fn test_display_roundtrips() {
        let config = Config::from_file("tests/fixtures/config/vidya.yml").unwrap();
        let dumped = config.to_string();
        let mut reparsed: Config = serde_yaml::from_str(&dumped).unwrap();
        reparsed.root = config.root.clone();
        assert_eq!(reparsed, config);
    }

    #[test]
    fn site_link_prefixes_base_url() {
        let config = Config {
            base_url: "/Notes/".to_owned(),
            ..Default::default()
        };
        assert_eq!(config.site_link("img/logo.svg"), "/Notes/img/logo.svg");
        assert_eq!(config.site_link("/blog"), "/Notes/blog");
        assert_eq!(config.site_link("/"), "/Notes/");
        assert_eq!(
            config.site_link("https://github.com/vidyasikha"),
            "https://github.com/vidyasikha"
        );
    }

    #[test]
    fn site_link_root_base_url() {
        let config = Config::default();
        assert_eq!(config.site_link("img/logo.svg"), "/img/logo.svg");
        assert_eq!(config.site_link("/"), "/");
    }

    #[test]
    fn find_project_file_same_dir() {
        let actual = find_project_file("tests/fixtures/config", CONFIG_FILE).unwrap();
        let expected = path::Path::new("tests/fixtures/config/vidya.yml");
        assert_eq!(actual, expected);
    }

    #[test]
    fn find_project_file_parent_dir() {
        let actual = find_project_file("tests/fixtures/config/child", CONFIG_FILE).unwrap();
        let expected = path::Path::new("tests/fixtures/config/vidya.yml");
        assert_eq!(actual, expected);
    }

    #[test]
    fn find_project_file_doesnt_exist() {
        let expected = path::Path::new("<NOT FOUND>");
        let actual =
            find_project_file("tests/fixtures/", CONFIG_FILE).unwrap_or_else(|| expected.into());
        assert_eq!(actual, expected);
    }
}
