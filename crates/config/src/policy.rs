/// What to do when a link points nowhere
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrokenLinkPolicy {
    /// Abort the build
    #[default]
    Throw,
    /// Report and keep going
    Warn,
    Ignore,
}

impl BrokenLinkPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Throw => "throw",
            Self::Warn => "warn",
            Self::Ignore => "ignore",
        }
    }
}

impl std::fmt::Display for BrokenLinkPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.as_str().fmt(f)
    }
}
