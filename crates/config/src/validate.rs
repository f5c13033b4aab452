use std::fmt;

use itertools::Itertools;

use super::*;

/// A configuration value that breaks one of the site's invariants
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Path of the offending field, e.g. `i18n.defaultLocale`
    pub field: String,
    pub reason: String,
}

impl Violation {
    fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}` {}", self.field, self.reason)
    }
}

impl Config {
    /// Reject configurations the site can't be built from
    pub fn validate(&self) -> Result<()> {
        match self.violations().into_iter().next() {
            None => Ok(()),
            Some(violation) => Err(Status::new("Invalid configuration").context_with(|c| {
                c.insert("Field", violation.field.clone())
                    .insert("Reason", violation.reason.clone())
            })),
        }
    }

    /// Every broken invariant, in field order
    pub fn violations(&self) -> Vec<Violation> {
        let mut violations = Vec::new();

        if self.title.trim().is_empty() {
            violations.push(Violation::new("title", "must not be empty"));
        }

        if !is_well_formed_external(&self.url) || !self.url.starts_with("http") {
            violations.push(Violation::new(
                "url",
                format!("must be an absolute http(s) URL, found `{}`", self.url),
            ));
        }

        check_base_path(&mut violations, "baseUrl", &self.base_url);

        check_locales(&mut violations, &self.i18n);

        if let Some(docs) = self.docs() {
            check_base_path(
                &mut violations,
                "presets.classic.docs.routeBasePath",
                &docs.route_base_path,
            );
        }
        if let Some(blog) = self.blog() {
            check_base_path(
                &mut violations,
                "presets.classic.blog.routeBasePath",
                &blog.route_base_path,
            );
            check_limit(
                &mut violations,
                "presets.classic.blog.postsPerPage",
                blog.posts_per_page,
            );
            check_limit(
                &mut violations,
                "presets.classic.blog.blogSidebarCount",
                blog.blog_sidebar_count,
            );
        }

        for (field, label, target) in self.theme_config.links() {
            match target {
                None => violations.push(Violation::new(
                    field,
                    format!("(`{label}`) needs exactly one of `to` or `href`"),
                )),
                Some(Target::Internal(to)) if !is_well_formed_internal(to) => {
                    violations.push(Violation::new(
                        format!("{field}.to"),
                        format!("must be a route beginning with `/`, found `{to}`"),
                    ));
                }
                Some(Target::External(href)) if !is_well_formed_external(href) => {
                    violations.push(Violation::new(
                        format!("{field}.href"),
                        format!("must be a well-formed URL, found `{href}`"),
                    ));
                }
                Some(_) => {}
            }
        }

        violations
    }
}

fn check_base_path(violations: &mut Vec<Violation>, field: &str, path: &str) {
    if path.is_empty() {
        violations.push(Violation::new(field, "must not be empty"));
    } else if !path.starts_with('/') {
        violations.push(Violation::new(
            field,
            format!("must begin with `/`, found `{path}`"),
        ));
    }
}

fn check_locales(violations: &mut Vec<Violation>, i18n: &I18n) {
    if i18n.locales.is_empty() {
        violations.push(Violation::new("i18n.locales", "must not be empty"));
    }
    for (i, locale) in i18n.locales.iter().enumerate() {
        if !is_path_segment(locale) {
            violations.push(Violation::new(
                format!("i18n.locales[{i}]"),
                format!("must be a single path segment, found `{locale}`"),
            ));
        }
    }
    let duplicates = i18n.locales.iter().duplicates().join(", ");
    if !duplicates.is_empty() {
        violations.push(Violation::new(
            "i18n.locales",
            format!("lists {duplicates} more than once"),
        ));
    }
    if !i18n.locales.contains(&i18n.default_locale) {
        violations.push(Violation::new(
            "i18n.defaultLocale",
            format!(
                "`{}` is not one of the supported locales [{}]",
                i18n.default_locale,
                i18n.locales.iter().join(", ")
            ),
        ));
    }
}

/// Locales name directories under both the source and the destination
fn is_path_segment(locale: &str) -> bool {
    !locale.is_empty()
        && locale != "."
        && locale != ".."
        && !locale.contains(['/', '\\'])
}

fn check_limit(violations: &mut Vec<Violation>, field: &str, limit: Limit) {
    if limit == Limit::Count(0) {
        violations.push(Violation::new(field, "must be positive or `ALL`"));
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn fields(config: &Config) -> Vec<String> {
        config.violations().into_iter().map(|v| v.field).collect()
    }

    #[test]
    fn default_is_valid() {
        let config = Config::default();
        assert_eq!(config.violations(), vec![]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn fixture_is_valid() {
        let config = Config::from_file("tests/fixtures/config/vidya.yml").unwrap();
        assert_eq!(config.violations(), vec![]);
    }

    #[test]
    fn default_locale_must_be_supported() {
        let config = Config {
            i18n: I18n {
                default_locale: "fr".into(),
                locales: vec!["en".into(), "hi".into()],
            },
            ..Default::default()
        };
        assert_eq!(fields(&config), vec!["i18n.defaultLocale".to_owned()]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn default_locale_from_file_must_be_supported() {
        let config = Config::from_file("tests/fixtures/config/bad_locale.yml").unwrap();
        assert_eq!(fields(&config), vec!["i18n.defaultLocale".to_owned()]);
    }

    #[test]
    fn locales_must_not_repeat() {
        let config = Config {
            i18n: I18n {
                default_locale: "en".into(),
                locales: vec!["en".into(), "en".into()],
            },
            ..Default::default()
        };
        assert_eq!(fields(&config), vec!["i18n.locales".to_owned()]);
    }

    #[test]
    fn locales_must_be_path_segments() {
        let config = Config {
            i18n: I18n {
                default_locale: "en".into(),
                locales: vec!["en".into(), "../x".into(), "..".into(), "a\\b".into()],
            },
            ..Default::default()
        };
        assert_eq!(
            fields(&config),
            vec![
                "i18n.locales[1]".to_owned(),
                "i18n.locales[2]".to_owned(),
                "i18n.locales[3]".to_owned(),
            ]
        );
    }

    #[test]
    fn base_url_must_begin_with_slash() {
        let config = Config {
            base_url: "Notes/".to_owned(),
            ..Default::default()
        };
        assert_eq!(fields(&config), vec!["baseUrl".to_owned()]);

        let config = Config {
            base_url: String::new(),
            ..Default::default()
        };
        assert_eq!(fields(&config), vec!["baseUrl".to_owned()]);
    }

    #[test]
    fn route_base_path_must_begin_with_slash() {
        let mut config = Config::default();
        if let Some(docs) = config
            .presets
            .classic
            .as_mut()
            .and_then(|c| c.docs.as_mut())
        {
            docs.route_base_path = "docs".to_owned();
        }
        assert_eq!(
            fields(&config),
            vec!["presets.classic.docs.routeBasePath".to_owned()]
        );
    }

    #[test]
    fn url_must_be_absolute() {
        let config = Config {
            url: "vidyasikha.github.io".to_owned(),
            ..Default::default()
        };
        assert_eq!(fields(&config), vec!["url".to_owned()]);
    }

    #[test]
    fn links_need_a_well_formed_target() {
        let mut config = Config::default();
        config.theme_config.footer.links = vec![LinkGroup {
            title: Some("Community".into()),
            items: vec![
                Link::internal("Main Page", "/"),
                Link::internal("Blog", "blog"),
                Link::external("GitHub", "github.com/vidyasikha"),
                Link {
                    label: "Nowhere".into(),
                    ..Default::default()
                },
            ],
        }];
        assert_eq!(
            fields(&config),
            vec![
                "themeConfig.footer.links[0].items[1].to".to_owned(),
                "themeConfig.footer.links[0].items[2].href".to_owned(),
                "themeConfig.footer.links[0].items[3]".to_owned(),
            ]
        );
    }

    #[test]
    fn zero_posts_per_page_is_rejected() {
        let mut config = Config::default();
        if let Some(blog) = config
            .presets
            .classic
            .as_mut()
            .and_then(|c| c.blog.as_mut())
        {
            blog.posts_per_page = Limit::Count(0);
        }
        assert_eq!(
            fields(&config),
            vec!["presets.classic.blog.postsPerPage".to_owned()]
        );
    }

    #[test]
    fn strict_link_policies_are_independent() {
        let config = Config {
            on_broken_links: BrokenLinkPolicy::Ignore,
            on_broken_markdown_links: BrokenLinkPolicy::Throw,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
