use std::fmt;

use crate::error::*;

use super::Liquid;
use super::Page;
use super::View;
use super::ViewContext;

pub const TITLE_ID: &str = "theme.NotFound.title";
pub const TITLE_DEFAULT: &str = "Page Not Found";
pub const P1_ID: &str = "theme.NotFound.p1";
pub const P1_DEFAULT: &str = "Oops! It seems this page has gone on a field trip. We'll make sure it returns with a wealth of knowledge soon.";

/// Every message the page uses, with its default
pub const MESSAGES: &[(&str, &str)] = &[(TITLE_ID, TITLE_DEFAULT), (P1_ID, P1_DEFAULT)];

const BUILTIN: &str = include_str!("templates/not_found.liquid");

/// Variables a `NotFound` template is rendered with
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct NotFoundProps<'a> {
    pub title: &'a str,
    pub p1: &'a str,
    pub logo: LogoProps,
    pub locale: &'a str,
    pub site: SiteProps<'a>,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct LogoProps {
    pub src: String,
    pub alt: String,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct SiteProps<'a> {
    pub title: &'a str,
    pub tagline: &'a str,
    pub base_url: &'a str,
}

/// Fallback page for routes that don't exist
pub struct NotFound {
    template: liquid::Template,
}

impl fmt::Debug for NotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotFound").finish_non_exhaustive()
    }
}

impl NotFound {
    pub const NAME: &'static str = "NotFound";

    pub fn new(template: liquid::Template) -> Self {
        Self { template }
    }

    pub fn builtin(liquid: &Liquid) -> Result<Self> {
        let template = liquid.parse(BUILTIN)?;
        Ok(Self::new(template))
    }

    pub fn props<'a>(ctx: &ViewContext<'a>) -> NotFoundProps<'a> {
        let site = ctx.site;
        let logo = &site.theme_config.not_found.logo;
        NotFoundProps {
            title: ctx.translations.translate(TITLE_ID, TITLE_DEFAULT),
            p1: ctx.translations.translate(P1_ID, P1_DEFAULT),
            logo: LogoProps {
                src: site.site_link(&logo.src),
                alt: logo.alt.clone(),
            },
            locale: ctx.translations.locale(),
            site: SiteProps {
                title: &site.title,
                tagline: &site.tagline,
                base_url: &site.base_url,
            },
        }
    }
}

impl View for NotFound {
    fn render(&self, ctx: &ViewContext<'_>) -> Result<Page> {
        let props = Self::props(ctx);
        let content = super::render(&self.template, &props)?;
        Ok(Page {
            title: props.title.to_owned(),
            content,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::i18n::Translations;

    fn render(translations: &Translations) -> Page {
        let site = vidya_config::Config {
            base_url: "/Notes/".to_owned(),
            ..Default::default()
        };
        let ctx = ViewContext {
            site: &site,
            translations,
            year: 2024,
        };
        let liquid = Liquid::new().unwrap();
        NotFound::builtin(&liquid).unwrap().render(&ctx).unwrap()
    }

    #[test]
    fn title_defaults() {
        let page = render(&Translations::new("en"));
        assert_eq!(page.title, "Page Not Found");
        assert!(page
            .content
            .contains(r#"<h1 class="hero__title">Page Not Found</h1>"#));
    }

    #[test]
    fn title_is_translated() {
        let translations = Translations::new("hi")
            .with_message(TITLE_ID, "पृष्ठ नहीं मिला")
            .with_message(P1_ID, "यह पृष्ठ मौजूद नहीं है।");
        let page = render(&translations);
        assert_eq!(page.title, "पृष्ठ नहीं मिला");
        assert!(page.content.contains("<h1 class=\"hero__title\">पृष्ठ नहीं मिला</h1>"));
        assert!(page.content.contains("<p>यह पृष्ठ मौजूद नहीं है।</p>"));
    }

    #[test]
    fn partial_translation_falls_back_per_key() {
        let translations = Translations::new("hi").with_message(P1_ID, "यह पृष्ठ मौजूद नहीं है।");
        let page = render(&translations);
        assert_eq!(page.title, "Page Not Found");
    }

    #[test]
    fn logo_is_half_size_and_first() {
        let page = render(&Translations::new("en"));
        let logo = page.content.find("<img").unwrap();
        let heading = page.content.find("<h1").unwrap();
        let paragraph = page.content.find("<p>").unwrap();
        assert!(logo < heading && heading < paragraph);
        assert!(page.content.contains(r#"src="/Notes/img/404.svg""#));
        assert!(page.content.contains("height: 50%; width: 50%;"));
    }

    #[test]
    fn debug_names_the_view() {
        let liquid = Liquid::new().unwrap();
        let view = NotFound::builtin(&liquid).unwrap();
        assert_eq!(format!("{view:?}"), "NotFound { .. }");
    }

    #[test]
    fn props_default_messages() {
        let site = vidya_config::Config::default();
        let translations = Translations::new("en");
        let ctx = ViewContext {
            site: &site,
            translations: &translations,
            year: 2024,
        };
        let props = NotFound::props(&ctx);
        assert_eq!(props.title, "Page Not Found");
        assert_eq!(
            props.p1,
            "Oops! It seems this page has gone on a field trip. We'll make sure it returns with a wealth of knowledge soon."
        );
    }
}
