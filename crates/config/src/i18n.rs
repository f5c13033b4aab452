use liquid_core::model::KString;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "unstable", serde(deny_unknown_fields))]
#[cfg_attr(not(feature = "unstable"), non_exhaustive)]
pub struct I18n {
    pub default_locale: KString,
    pub locales: Vec<KString>,
}

impl Default for I18n {
    fn default() -> Self {
        Self {
            default_locale: "en".into(),
            locales: vec!["en".into()],
        }
    }
}

impl I18n {
    /// URL prefix pages of `locale` are placed under
    ///
    /// The default locale lives at the site root.
    pub fn locale_prefix<'l>(&self, locale: &'l str) -> Option<&'l str> {
        (locale != self.default_locale.as_str()).then_some(locale)
    }
}
