use std::collections::BTreeMap;
use std::path;

use crate::error::*;

/// Directory, under the site source, holding one sub-directory of message files per locale
pub const I18N_DIR: &str = "i18n";
const CODE_FILE: &str = "code.json";

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Message {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Messages for one locale, keyed by message id (`theme.NotFound.title`)
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Translations {
    locale: String,
    messages: BTreeMap<String, Message>,
}

impl Translations {
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            messages: Default::default(),
        }
    }

    /// Load `<source>/i18n/<locale>/code.json`
    ///
    /// A locale without a message file has no translations; every lookup uses its default.
    pub fn load(source: &path::Path, locale: &str) -> Result<Self> {
        let path = source.join(I18N_DIR).join(locale).join(CODE_FILE);
        if !path.is_file() {
            log::debug!(
                "No translations for `{locale}` at {}, using defaults",
                path.display()
            );
            return Ok(Self::new(locale));
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read translations {}", path.display()))?;
        let messages: BTreeMap<String, Message> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse translations {}", path.display()))?;
        log::trace!("Loaded {} messages for `{locale}`", messages.len());

        Ok(Self {
            locale: locale.to_owned(),
            messages,
        })
    }

    pub fn with_message(mut self, id: impl Into<String>, message: impl Into<String>) -> Self {
        self.messages.insert(
            id.into(),
            Message {
                message: message.into(),
                description: None,
            },
        );
        self
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.messages.get(id).map(|m| m.message.as_str())
    }

    /// Look up `id`, falling back to `default` when this locale doesn't define it
    pub fn translate<'s>(&'s self, id: &str, default: &'s str) -> &'s str {
        self.get(id).unwrap_or(default)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.messages
            .iter()
            .map(|(id, m)| (id.as_str(), m.message.as_str()))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn translate_falls_back_to_default() {
        let translations = Translations::new("en");
        assert_eq!(
            translations.translate("theme.NotFound.title", "Page Not Found"),
            "Page Not Found"
        );
    }

    #[test]
    fn translate_prefers_message() {
        let translations =
            Translations::new("hi").with_message("theme.NotFound.title", "पृष्ठ नहीं मिला");
        assert_eq!(
            translations.translate("theme.NotFound.title", "Page Not Found"),
            "पृष्ठ नहीं मिला"
        );
    }

    #[test]
    fn load_missing_locale_is_empty() {
        let translations = Translations::load(path::Path::new("tests/fixtures/site"), "de").unwrap();
        assert_eq!(translations.locale(), "de");
        assert_eq!(translations.iter().count(), 0);
    }

    #[test]
    fn load_code_json() {
        let translations = Translations::load(path::Path::new("tests/fixtures/site"), "hi").unwrap();
        assert_eq!(translations.get("theme.NotFound.title"), Some("पृष्ठ नहीं मिला"));
    }

    #[test]
    fn load_malformed() {
        let translations = Translations::load(path::Path::new("tests/fixtures/broken"), "en");
        assert!(translations.is_err());
    }
}
