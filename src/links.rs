//! Broken link detection.
//!
//! Two independent checks, each governed by its own policy: navbar/footer entries that point at
//! routes the site doesn't have (`onBrokenLinks`), and relative links between markdown documents
//! that point at files that don't exist (`onBrokenMarkdownLinks`).

use std::collections::BTreeSet;
use std::fmt;
use std::path;

use vidya_config::BrokenLinkPolicy;
use vidya_config::Target;

use crate::error::*;
use crate::model::Config;

const MARKDOWN_EXTENSIONS: &[&str] = &["md", "mdx"];
const INDEX_STEMS: &[&str] = &["index", "README"];

/// A link whose target doesn't exist
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BrokenLink {
    /// Where the link was found
    pub origin: String,
    pub target: String,
}

impl fmt::Display for BrokenLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.origin, self.target)
    }
}

/// Every route the built site will answer, relative to `baseUrl`
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Routes {
    routes: BTreeSet<String>,
}

impl Routes {
    pub fn collect(config: &Config) -> Result<Self> {
        let mut routes = Self::default();
        routes.insert("/404.html");

        if let Some(docs) = config.site.docs() {
            routes.insert(&docs.route_base_path);
            if let Some(docs_dir) = config.docs_dir() {
                for file in markdown_files(&docs_dir) {
                    let rel = file.strip_prefix(&docs_dir).unwrap_or(&file);
                    routes.insert(&join_route(&docs.route_base_path, &doc_slug(rel)));
                }
            }
        }

        if let Some(blog) = config.site.blog() {
            routes.insert(&blog.route_base_path);
            routes.insert(&join_route(&blog.route_base_path, "archive"));
            routes.insert(&join_route(&blog.route_base_path, "tags"));
        }

        let static_dir = config.static_dir();
        if static_dir.is_dir() {
            for entry in walkdir::WalkDir::new(&static_dir)
                .min_depth(1)
                .sort_by_file_name()
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file())
            {
                let rel = entry.path().strip_prefix(&static_dir).unwrap_or(entry.path());
                routes.insert(&format!("/{}", url_path(rel)));
            }
        }

        log::trace!("Known routes: {:?}", routes.routes);
        Ok(routes)
    }

    pub fn insert(&mut self, route: &str) {
        self.routes.insert(normalize_route(route));
    }

    pub fn contains(&self, target: &str) -> bool {
        self.routes.contains(&normalize_route(target))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.routes.iter().map(String::as_str)
    }
}

/// Navbar and footer entries pointing at routes the site doesn't have
pub fn check_site_links(config: &Config, routes: &Routes) -> Vec<BrokenLink> {
    config
        .site
        .theme_config
        .links()
        .filter_map(|(origin, _label, target)| match target {
            Some(Target::Internal(to)) if !routes.contains(to) => Some(BrokenLink {
                origin,
                target: to.to_owned(),
            }),
            _ => None,
        })
        .collect()
}

/// Relative links between docs that point at missing files
pub fn check_markdown_links(docs_dir: &path::Path) -> Result<Vec<BrokenLink>> {
    let mut broken = Vec::new();
    for file in markdown_files(docs_dir) {
        let content = std::fs::read_to_string(&file)
            .with_context(|| format!("Failed to read {}", file.display()))?;
        let dir = file.parent().unwrap_or(docs_dir);
        for target in markdown_links(&content) {
            let Some(rel) = relative_markdown_target(&target) else {
                continue;
            };
            let rel = percent_encoding::percent_decode_str(rel).decode_utf8_lossy();
            if !dir.join(&*rel).is_file() {
                broken.push(BrokenLink {
                    origin: file.display().to_string(),
                    target,
                });
            }
        }
    }
    Ok(broken)
}

/// Apply `policy` to everything found by one check
pub fn enforce(policy: BrokenLinkPolicy, kind: &str, broken: &[BrokenLink]) -> Result<()> {
    if broken.is_empty() {
        return Ok(());
    }
    match policy {
        BrokenLinkPolicy::Throw => {
            let listing = itertools::join(broken.iter().map(|b| format!("- {b}")), "\n");
            anyhow::bail!("Found {} broken {kind}:\n{listing}", broken.len());
        }
        BrokenLinkPolicy::Warn => {
            for link in broken {
                log::warn!("Broken {kind}: {link}");
            }
        }
        BrokenLinkPolicy::Ignore => {
            for link in broken {
                log::debug!("Ignoring broken {kind}: {link}");
            }
        }
    }
    Ok(())
}

fn markdown_links(content: &str) -> Vec<String> {
    pulldown_cmark::Parser::new(content)
        .filter_map(|event| match event {
            pulldown_cmark::Event::Start(pulldown_cmark::Tag::Link { dest_url, .. }) => {
                Some(dest_url.into_string())
            }
            _ => None,
        })
        .collect()
}

/// The file part of a link to another markdown document, if that's what it is
fn relative_markdown_target(target: &str) -> Option<&str> {
    if target.starts_with('/') || target.starts_with('#') || vidya_config::is_external(target) {
        return None;
    }
    let file = target
        .split(['#', '?'])
        .next()
        .filter(|f| !f.is_empty())?;
    let ext = path::Path::new(file).extension()?.to_str()?;
    MARKDOWN_EXTENSIONS.contains(&ext).then_some(file)
}

fn markdown_files(dir: &path::Path) -> Vec<path::PathBuf> {
    if !dir.is_dir() {
        return Vec::new();
    }
    walkdir::WalkDir::new(dir)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| MARKDOWN_EXTENSIONS.contains(&e))
        })
        .collect()
}

fn doc_slug(rel: &path::Path) -> String {
    let stem = rel.with_extension("");
    let is_index = stem
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| INDEX_STEMS.contains(&n));
    let stem = if is_index {
        stem.parent().map(path::Path::to_path_buf).unwrap_or_default()
    } else {
        stem
    };
    url_path(&stem)
}

fn url_path(rel: &path::Path) -> String {
    itertools::join(
        rel.components()
            .filter_map(|c| c.as_os_str().to_str()),
        "/",
    )
}

fn join_route(base: &str, rest: &str) -> String {
    let base = base.trim_end_matches('/');
    let rest = rest.trim_start_matches('/');
    format!("{base}/{rest}")
}

fn normalize_route(route: &str) -> String {
    let route = route.split(['#', '?']).next().unwrap_or_default();
    let route = route.trim_end_matches('/');
    if route.is_empty() {
        "/".to_owned()
    } else if route.starts_with('/') {
        route.to_owned()
    } else {
        format!("/{route}")
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn site_config() -> Config {
        let site = vidya_config::Config::from_file("tests/fixtures/site/vidya.yml").unwrap();
        Config::from_config(site).unwrap()
    }

    #[test]
    fn normalize_strips_trailing_slash_and_fragment() {
        assert_eq!(normalize_route("/blog/"), "/blog");
        assert_eq!(normalize_route("/blog#top"), "/blog");
        assert_eq!(normalize_route("/blog?page=2"), "/blog");
        assert_eq!(normalize_route("/"), "/");
        assert_eq!(normalize_route(""), "/");
    }

    #[test]
    fn doc_slugs() {
        assert_eq!(doc_slug(path::Path::new("intro.md")), "intro");
        assert_eq!(doc_slug(path::Path::new("guides/setup.mdx")), "guides/setup");
        assert_eq!(doc_slug(path::Path::new("guides/index.md")), "guides");
        assert_eq!(doc_slug(path::Path::new("index.md")), "");
    }

    #[test]
    fn routes_from_site() {
        let routes = Routes::collect(&site_config()).unwrap();
        assert!(routes.contains("/"));
        assert!(routes.contains("/intro"));
        assert!(routes.contains("/guides/setup"));
        assert!(routes.contains("/blog"));
        assert!(routes.contains("/blog/"));
        assert!(routes.contains("/img/logo1.svg"));
        assert!(!routes.contains("/missing"));
    }

    #[test]
    fn site_links_resolve() {
        let config = site_config();
        let routes = Routes::collect(&config).unwrap();
        assert_eq!(check_site_links(&config, &routes), vec![]);
    }

    #[test]
    fn site_links_missing_route() {
        let mut config = site_config();
        config
            .site
            .theme_config
            .navbar
            .items
            .push(vidya_config::NavbarItem {
                label: "Tutorials".into(),
                to: Some("/tutorials".to_owned()),
                ..Default::default()
            });
        let routes = Routes::collect(&config).unwrap();
        assert_eq!(
            check_site_links(&config, &routes),
            vec![BrokenLink {
                origin: "themeConfig.navbar.items[1]".to_owned(),
                target: "/tutorials".to_owned(),
            }]
        );
    }

    #[test]
    fn external_links_are_not_checked() {
        let mut config = site_config();
        config.site.theme_config.footer.links[0]
            .items
            .push(vidya_config::Link::external(
                "GitHub",
                "https://github.com/vidyasikha",
            ));
        let routes = Routes::collect(&config).unwrap();
        assert_eq!(check_site_links(&config, &routes), vec![]);
    }

    #[test]
    fn markdown_targets() {
        assert_eq!(relative_markdown_target("setup.md"), Some("setup.md"));
        assert_eq!(relative_markdown_target("../intro.md#usage"), Some("../intro.md"));
        assert_eq!(relative_markdown_target("guide.mdx?x=1"), Some("guide.mdx"));
        assert_eq!(relative_markdown_target("/intro.md"), None);
        assert_eq!(relative_markdown_target("#usage"), None);
        assert_eq!(relative_markdown_target("https://example.com/a.md"), None);
        assert_eq!(relative_markdown_target("img/logo.svg"), None);
    }

    #[test]
    fn markdown_links_in_docs() {
        let broken = check_markdown_links(path::Path::new("tests/fixtures/site/docs")).unwrap();
        assert_eq!(broken.len(), 1);
        assert_eq!(broken[0].target, "missing.md");
        assert!(broken[0].origin.ends_with("setup.md"));
    }

    #[test]
    fn markdown_links_are_percent_decoded() {
        let docs = tempfile::tempdir().unwrap();
        std::fs::write(docs.path().join("my notes.md"), "# Notes\n").unwrap();
        std::fs::write(
            docs.path().join("intro.md"),
            "See [notes](my%20notes.md) and [more](more%20notes.md).\n",
        )
        .unwrap();

        let broken = check_markdown_links(docs.path()).unwrap();
        assert_eq!(broken.len(), 1);
        assert_eq!(broken[0].target, "more%20notes.md");
    }

    #[test]
    fn enforce_throw_fails() {
        let broken = vec![BrokenLink {
            origin: "themeConfig.navbar.items[0]".to_owned(),
            target: "/tutorials".to_owned(),
        }];
        assert!(enforce(BrokenLinkPolicy::Throw, "links", &broken).is_err());
        assert!(enforce(BrokenLinkPolicy::Warn, "links", &broken).is_ok());
        assert!(enforce(BrokenLinkPolicy::Ignore, "links", &broken).is_ok());
        assert!(enforce(BrokenLinkPolicy::Throw, "links", &[]).is_ok());
    }
}
