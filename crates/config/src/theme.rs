use liquid_core::model::KString;

use super::*;

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "unstable", serde(deny_unknown_fields))]
#[cfg_attr(not(feature = "unstable"), non_exhaustive)]
pub struct ThemeConfig {
    /// Social card
    pub image: Option<String>,
    pub docs: DocsThemeConfig,
    pub navbar: Navbar,
    pub footer: Footer,
    pub prism: Prism,
    pub not_found: NotFoundThemeConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "unstable", serde(deny_unknown_fields))]
#[cfg_attr(not(feature = "unstable"), non_exhaustive)]
pub struct DocsThemeConfig {
    pub sidebar: SidebarThemeConfig,
    pub show_last_update_time: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "unstable", serde(deny_unknown_fields))]
#[cfg_attr(not(feature = "unstable"), non_exhaustive)]
pub struct SidebarThemeConfig {
    pub hideable: bool,
    pub auto_collapse_categories: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "unstable", serde(deny_unknown_fields))]
#[cfg_attr(not(feature = "unstable"), non_exhaustive)]
pub struct Logo {
    pub alt: String,
    pub src: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "unstable", serde(deny_unknown_fields))]
#[cfg_attr(not(feature = "unstable"), non_exhaustive)]
pub struct Navbar {
    pub title: Option<String>,
    pub logo: Option<Logo>,
    pub hide_on_scroll: bool,
    pub items: Vec<NavbarItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "unstable", serde(deny_unknown_fields))]
#[cfg_attr(not(feature = "unstable"), non_exhaustive)]
pub struct NavbarItem {
    pub label: KString,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    pub position: Position,
}

impl NavbarItem {
    pub fn target(&self) -> Option<Target<'_>> {
        Target::from_parts(self.to.as_deref(), self.href.as_deref())
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    #[default]
    Left,
    Right,
}

impl Position {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "unstable", serde(deny_unknown_fields))]
#[cfg_attr(not(feature = "unstable"), non_exhaustive)]
pub struct Footer {
    pub style: FooterStyle,
    pub links: Vec<LinkGroup>,
    /// Liquid template, `{{ year }}` is the year the site was built
    pub copyright: Option<String>,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FooterStyle {
    #[default]
    Light,
    Dark,
}

impl FooterStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "unstable", serde(deny_unknown_fields))]
#[cfg_attr(not(feature = "unstable"), non_exhaustive)]
pub struct LinkGroup {
    pub title: Option<KString>,
    pub items: Vec<Link>,
}

/// Code highlighting themes, passed through to the highlighter untouched
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "unstable", serde(deny_unknown_fields))]
#[cfg_attr(not(feature = "unstable"), non_exhaustive)]
pub struct Prism {
    pub theme: KString,
    pub dark_theme: KString,
}

impl Default for Prism {
    fn default() -> Self {
        Self {
            theme: "github".into(),
            dark_theme: "dracula".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "unstable", serde(deny_unknown_fields))]
#[cfg_attr(not(feature = "unstable"), non_exhaustive)]
pub struct NotFoundThemeConfig {
    pub logo: Logo,
}

impl Default for NotFoundThemeConfig {
    fn default() -> Self {
        Self {
            logo: Logo {
                alt: "Page Not Found".to_owned(),
                src: "img/404.svg".to_owned(),
            },
        }
    }
}

impl ThemeConfig {
    /// Every navbar and footer entry, in display order, paired with a description of where it
    /// lives in the config
    pub fn links(&self) -> impl Iterator<Item = (String, &str, Option<Target<'_>>)> + '_ {
        let navbar = self
            .navbar
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                (
                    format!("themeConfig.navbar.items[{i}]"),
                    item.label.as_str(),
                    item.target(),
                )
            });
        let footer = self
            .footer
            .links
            .iter()
            .enumerate()
            .flat_map(|(g, group)| {
                group.items.iter().enumerate().map(move |(i, item)| {
                    (
                        format!("themeConfig.footer.links[{g}].items[{i}]"),
                        item.label.as_str(),
                        item.target(),
                    )
                })
            });
        navbar.chain(footer)
    }
}
