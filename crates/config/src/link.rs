use liquid_core::model::KString;

/// Where a navbar or footer entry points
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Target<'s> {
    /// A route on this site, relative to `baseUrl`
    Internal(&'s str),
    External(&'s str),
}

impl<'s> Target<'s> {
    /// Resolve the `to` / `href` pair of an entry
    ///
    /// Exactly one of them must be set.
    pub fn from_parts(to: Option<&'s str>, href: Option<&'s str>) -> Option<Self> {
        match (to, href) {
            (Some(to), None) => Some(Self::Internal(to)),
            (None, Some(href)) => Some(Self::External(href)),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'s str {
        match self {
            Self::Internal(s) | Self::External(s) => s,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "unstable", serde(deny_unknown_fields))]
#[cfg_attr(not(feature = "unstable"), non_exhaustive)]
pub struct Link {
    pub label: KString,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

impl Link {
    pub fn internal(label: impl Into<KString>, to: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            to: Some(to.into()),
            href: None,
        }
    }

    pub fn external(label: impl Into<KString>, href: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            to: None,
            href: Some(href.into()),
        }
    }

    pub fn target(&self) -> Option<Target<'_>> {
        Target::from_parts(self.to.as_deref(), self.href.as_deref())
    }
}

/// Whether `target` leaves the site
pub fn is_external(target: &str) -> bool {
    url::Url::parse(target).is_ok()
}

/// Whether `target` is an absolute URL we know how to link to
pub fn is_well_formed_external(target: &str) -> bool {
    match url::Url::parse(target) {
        Ok(url) => match url.scheme() {
            "http" | "https" => url.host().is_some(),
            "mailto" => !url.path().is_empty(),
            _ => false,
        },
        Err(_) => false,
    }
}

/// Whether `target` is a route on this site
pub fn is_well_formed_internal(target: &str) -> bool {
    target.starts_with('/') && !target.starts_with("//")
}
