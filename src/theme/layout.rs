use std::fmt;

use vidya_config::Position;
use vidya_config::Target;

use crate::error::*;

use super::Liquid;
use super::Page;
use super::ViewContext;

const BUILTIN: &str = include_str!("templates/layout.liquid");

/// Frames a rendered component into a full HTML document: head, navbar and footer
pub struct Layout {
    template: liquid::Template,
    copyright: Option<liquid::Template>,
}

impl fmt::Debug for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Layout")
            .field("copyright", &self.copyright.is_some())
            .finish_non_exhaustive()
    }
}

#[derive(serde::Serialize)]
struct Globals<'a> {
    page: &'a Page,
    site: SiteGlobals<'a>,
    navbar: NavbarGlobals<'a>,
    footer: FooterGlobals<'a>,
    prism: &'a vidya_config::Prism,
}

#[derive(serde::Serialize)]
struct SiteGlobals<'a> {
    title: &'a str,
    tagline: &'a str,
    locale: &'a str,
    home: String,
    favicon: String,
    image: Option<String>,
    custom_css: Option<String>,
}

#[derive(serde::Serialize)]
struct NavbarGlobals<'a> {
    title: Option<&'a str>,
    logo: Option<LogoGlobals<'a>>,
    hide_on_scroll: bool,
    left: Vec<LinkGlobals<'a>>,
    right: Vec<LinkGlobals<'a>>,
}

#[derive(serde::Serialize)]
struct LogoGlobals<'a> {
    src: String,
    alt: &'a str,
}

#[derive(serde::Serialize)]
struct FooterGlobals<'a> {
    style: &'static str,
    groups: Vec<GroupGlobals<'a>>,
    copyright: Option<String>,
}

#[derive(serde::Serialize)]
struct GroupGlobals<'a> {
    title: Option<&'a str>,
    items: Vec<LinkGlobals<'a>>,
}

#[derive(serde::Serialize)]
struct LinkGlobals<'a> {
    label: &'a str,
    href: String,
    external: bool,
}

#[derive(serde::Serialize)]
struct CopyrightGlobals {
    year: i32,
}

impl Layout {
    pub fn new(liquid: &Liquid, site: &vidya_config::Config) -> Result<Self> {
        let template = liquid.parse(BUILTIN)?;
        let copyright = site
            .theme_config
            .footer
            .copyright
            .as_deref()
            .map(|c| {
                liquid
                    .parse(c)
                    .context("Failed to parse `themeConfig.footer.copyright`")
            })
            .transpose()?;
        Ok(Self {
            template,
            copyright,
        })
    }

    /// Footer copyright line for a site built in `year`
    pub fn copyright(&self, year: i32) -> Result<Option<String>> {
        self.copyright
            .as_ref()
            .map(|c| super::render(c, &CopyrightGlobals { year }))
            .transpose()
    }

    pub fn render(&self, page: &Page, ctx: &ViewContext<'_>) -> Result<String> {
        let site = ctx.site;
        let theme = &site.theme_config;

        let (left, right): (Vec<_>, Vec<_>) = theme
            .navbar
            .items
            .iter()
            .partition(|item| item.position == Position::Left);
        let navbar = NavbarGlobals {
            title: theme.navbar.title.as_deref(),
            logo: theme.navbar.logo.as_ref().map(|logo| LogoGlobals {
                src: site.site_link(&logo.src),
                alt: &logo.alt,
            }),
            hide_on_scroll: theme.navbar.hide_on_scroll,
            left: left
                .into_iter()
                .map(|item| link_globals(site, &item.label, item.target()))
                .collect(),
            right: right
                .into_iter()
                .map(|item| link_globals(site, &item.label, item.target()))
                .collect(),
        };

        let footer = FooterGlobals {
            style: theme.footer.style.as_str(),
            groups: theme
                .footer
                .links
                .iter()
                .map(|group| GroupGlobals {
                    title: group.title.as_deref(),
                    items: group
                        .items
                        .iter()
                        .map(|item| link_globals(site, &item.label, item.target()))
                        .collect(),
                })
                .collect(),
            copyright: self.copyright(ctx.year)?,
        };

        let globals = Globals {
            page,
            site: SiteGlobals {
                title: &site.title,
                tagline: &site.tagline,
                locale: ctx.translations.locale(),
                home: site.site_link("/"),
                favicon: site.site_link(&site.favicon),
                image: theme.image.as_deref().map(|i| site.site_link(i)),
                custom_css: site
                    .presets
                    .classic
                    .as_ref()
                    .and_then(|c| c.theme.custom_css.as_ref())
                    .map(|css| site.site_link(css.as_str())),
            },
            navbar,
            footer,
            prism: &theme.prism,
        };
        super::render(&self.template, &globals)
    }
}

fn link_globals<'a>(
    site: &vidya_config::Config,
    label: &'a str,
    target: Option<Target<'_>>,
) -> LinkGlobals<'a> {
    match target {
        Some(Target::Internal(to)) => LinkGlobals {
            label,
            href: site.site_link(to),
            external: false,
        },
        Some(Target::External(href)) => LinkGlobals {
            label,
            href: href.to_owned(),
            external: true,
        },
        None => LinkGlobals {
            label,
            href: "#".to_owned(),
            external: false,
        },
    }
}
