use std::fmt;

use super::*;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "unstable", serde(deny_unknown_fields))]
#[cfg_attr(not(feature = "unstable"), non_exhaustive)]
pub struct Presets {
    pub classic: Option<ClassicPreset>,
}

impl Default for Presets {
    fn default() -> Self {
        Self {
            classic: Some(Default::default()),
        }
    }
}

/// Docs, blog and theme wired together
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "unstable", serde(deny_unknown_fields))]
#[cfg_attr(not(feature = "unstable"), non_exhaustive)]
pub struct ClassicPreset {
    pub docs: Option<DocsOptions>,
    pub blog: Option<BlogOptions>,
    pub theme: ThemeOptions,
}

impl Default for ClassicPreset {
    fn default() -> Self {
        Self {
            docs: Some(Default::default()),
            blog: Some(Default::default()),
            theme: Default::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "unstable", serde(deny_unknown_fields))]
#[cfg_attr(not(feature = "unstable"), non_exhaustive)]
pub struct DocsOptions {
    pub path: RelPathBuf,
    pub sidebar_path: Option<RelPathBuf>,
    pub route_base_path: String,
}

impl Default for DocsOptions {
    fn default() -> Self {
        Self {
            path: "docs".into(),
            sidebar_path: None,
            route_base_path: "/docs".to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "unstable", serde(deny_unknown_fields))]
#[cfg_attr(not(feature = "unstable"), non_exhaustive)]
pub struct BlogOptions {
    pub path: RelPathBuf,
    pub route_base_path: String,
    pub blog_title: String,
    pub blog_description: String,
    pub show_reading_time: bool,
    pub blog_sidebar_count: Limit,
    pub posts_per_page: Limit,
    pub blog_sidebar_title: String,
}

impl Default for BlogOptions {
    fn default() -> Self {
        Self {
            path: "blog".into(),
            route_base_path: "/blog".to_owned(),
            blog_title: "Blog".to_owned(),
            blog_description: "Blog".to_owned(),
            show_reading_time: true,
            blog_sidebar_count: Limit::Count(5),
            posts_per_page: Limit::Count(10),
            blog_sidebar_title: "Recent posts".to_owned(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "unstable", serde(deny_unknown_fields))]
#[cfg_attr(not(feature = "unstable"), non_exhaustive)]
pub struct ThemeOptions {
    pub custom_css: Option<RelPathBuf>,
}

/// How many items to show at once: `ALL` or a positive count
///
/// For `postsPerPage`, `Count` is the paged mode and `All` the show-all mode.
#[derive(Copy, Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "LimitRepr", into = "LimitRepr")]
pub enum Limit {
    Count(u32),
    All,
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count(count) => count.fmt(f),
            Self::All => ALL.fmt(f),
        }
    }
}

const ALL: &str = "ALL";

#[derive(serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
enum LimitRepr {
    Count(u32),
    Keyword(String),
}

impl TryFrom<LimitRepr> for Limit {
    type Error = String;

    fn try_from(repr: LimitRepr) -> Result<Self, Self::Error> {
        match repr {
            LimitRepr::Count(count) => Ok(Self::Count(count)),
            LimitRepr::Keyword(keyword) if keyword == ALL => Ok(Self::All),
            LimitRepr::Keyword(keyword) => {
                Err(format!("expected a count or `{ALL}`, found `{keyword}`"))
            }
        }
    }
}

impl From<Limit> for LimitRepr {
    fn from(limit: Limit) -> Self {
        match limit {
            Limit::Count(count) => Self::Count(count),
            Limit::All => Self::Keyword(ALL.to_owned()),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn limit_parses_keyword() {
        let limit: Limit = serde_yaml::from_str("ALL").unwrap();
        assert_eq!(limit, Limit::All);
    }

    #[test]
    fn limit_parses_count() {
        let limit: Limit = serde_yaml::from_str("7").unwrap();
        assert_eq!(limit, Limit::Count(7));
    }

    #[test]
    fn limit_rejects_other_words() {
        let limit = serde_yaml::from_str::<Limit>("some");
        assert!(limit.is_err());
    }

    #[test]
    fn limit_serializes_keyword() {
        let dumped = serde_yaml::to_string(&Limit::All).unwrap();
        assert_eq!(dumped.trim(), "ALL");
    }
}
