//! Presentational components and the registry that decides which implementation renders each
//! one.
//!
//! A component is anything implementing [`View`].  [`Theme::classic`] registers the built-in
//! views; a site replaces ("swizzles") one by dropping `<Component>.liquid` into `src/theme/`.

mod layout;
pub mod not_found;
mod template;

use std::collections::BTreeMap;
use std::fmt;
use std::path;

use crate::error::*;
use crate::i18n::Translations;

pub use self::layout::Layout;
pub use self::not_found::NotFound;
pub use self::template::Liquid;
pub use self::template::render;

/// Rendered component: what goes in `<main>` plus the document title it asks for
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Page {
    pub title: String,
    pub content: String,
}

/// Everything a view may depend on
///
/// Notably absent is the requested path: views render the same for every request.
#[derive(Copy, Clone, Debug)]
pub struct ViewContext<'a> {
    pub site: &'a vidya_config::Config,
    pub translations: &'a Translations,
    /// Year the build happened in
    pub year: i32,
}

pub trait View: fmt::Debug {
    fn render(&self, ctx: &ViewContext<'_>) -> Result<Page>;
}

#[derive(Debug)]
struct Component {
    view: Box<dyn View>,
    swizzled: bool,
}

/// Component name to implementation
#[derive(Debug)]
pub struct Theme {
    components: BTreeMap<&'static str, Component>,
}

impl Theme {
    /// The built-in components
    pub fn classic(liquid: &Liquid) -> Result<Self> {
        let mut components = BTreeMap::new();
        components.insert(
            NotFound::NAME,
            Component {
                view: Box::new(NotFound::builtin(liquid)?),
                swizzled: false,
            },
        );
        Ok(Self { components })
    }

    /// Replace the implementation of a built-in component
    pub fn swizzle(&mut self, name: &str, view: Box<dyn View>) -> Result<()> {
        let component = self
            .components
            .get_mut(name)
            .ok_or_else(|| anyhow::format_err!("Unknown theme component `{name}`"))?;
        log::debug!("Swizzling theme component `{name}`");
        component.view = view;
        component.swizzled = true;
        Ok(())
    }

    /// Swizzle every component that has a `<Component>.liquid` template in `dir`
    pub fn load_overrides(&mut self, liquid: &Liquid, dir: &path::Path) -> Result<()> {
        if !dir.is_dir() {
            log::trace!("No theme overrides in {}", dir.display());
            return Ok(());
        }

        let entries = std::fs::read_dir(dir)
            .with_context(|| format!("Failed to read theme overrides {}", dir.display()))?;
        let mut templates = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) == Some("liquid") && path.is_file() {
                templates.push(path);
            }
        }
        templates.sort();

        for path in templates {
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let view: Box<dyn View> = match name {
                NotFound::NAME => Box::new(NotFound::new(liquid.parse_file(&path)?)),
                _ => {
                    log::warn!(
                        "Ignoring {}: there is no theme component named `{name}`",
                        path.display()
                    );
                    continue;
                }
            };
            self.swizzle(name, view)?;
        }

        Ok(())
    }

    pub fn render(&self, name: &str, ctx: &ViewContext<'_>) -> Result<Page> {
        let component = self
            .components
            .get(name)
            .ok_or_else(|| anyhow::format_err!("Unknown theme component `{name}`"))?;
        component
            .view
            .render(ctx)
            .with_context(|| format!("Failed to render theme component `{name}`"))
    }

    /// Page shown for any route that doesn't exist
    pub fn not_found(&self, ctx: &ViewContext<'_>) -> Result<Page> {
        self.render(NotFound::NAME, ctx)
    }

    /// Registered components and whether the site replaced them
    pub fn components(&self) -> impl Iterator<Item = (&'static str, bool)> + '_ {
        self.components
            .iter()
            .map(|(name, component)| (*name, component.swizzled))
    }
}
