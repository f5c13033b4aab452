use std::env;
use std::fs;
use std::path;

use crate::clock::Clock;
use crate::error::*;
use crate::files;
use crate::i18n::Translations;
use crate::links;
use crate::model::Config;
use crate::theme::Layout;
use crate::theme::Liquid;
use crate::theme::Theme;
use crate::theme::ViewContext;

/// File the not-found page is written to, per locale
pub const NOT_FOUND_FILE: &str = "404.html";

/// What a build produced
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BuildSummary {
    /// Not-found pages, one per locale, relative to the destination
    pub pages: Vec<path::PathBuf>,
    pub static_files: usize,
}

/// The primary build function that turns a site into deployable files
pub fn build(config: &Config, clock: &dyn Clock) -> Result<BuildSummary> {
    log::trace!("Build configuration: {:?}", config);
    let site = &config.site;
    site.validate()?;

    check_links(config)?;

    let liquid = Liquid::new()?;
    let mut theme = Theme::classic(&liquid)?;
    theme.load_overrides(&liquid, &config.theme_dir())?;
    let layout = Layout::new(&liquid, site)?;

    // Read once: the site shows the year it was built in until the next build
    let year = clock.year();
    log::debug!("Building for {year}");

    let mut summary = BuildSummary::default();

    // Generated pages are written last so they win over static files of the same name
    let static_dir = config.static_dir();
    if static_dir.is_dir() {
        summary.static_files = files::copy_dir(&static_dir, &config.destination)?;
    } else {
        log::debug!("No static files at {}", static_dir.display());
    }

    if let Some(css) = config.custom_css() {
        let src_file = css.to_path(&config.source);
        let dest_file = css.to_path(&config.destination);
        files::copy_file(&src_file, &dest_file)
            .context("Failed to copy `presets.classic.theme.customCss`")?;
    }

    for locale in &site.i18n.locales {
        let translations = Translations::load(&config.source, locale)?;
        let ctx = ViewContext {
            site,
            translations: &translations,
            year,
        };
        let page = theme.not_found(&ctx)?;
        let html = layout.render(&page, &ctx)?;

        let dest_file = config.locale_destination(locale).join(NOT_FOUND_FILE);
        let rel = dest_file
            .strip_prefix(&config.destination)
            .unwrap_or(&dest_file)
            .to_owned();
        if static_dir.join(&rel).is_file() {
            log::warn!(
                "`{}` is replaced by the generated not-found page for `{locale}`",
                path::Path::new(crate::model::STATIC_DIR).join(&rel).display()
            );
        }
        files::write_document_file(html, &dest_file)?;
        log::debug!("Rendered {} for `{locale}`", dest_file.display());
        summary.pages.push(rel);
    }

    Ok(summary)
}

fn check_links(config: &Config) -> Result<()> {
    let site = &config.site;

    let routes = links::Routes::collect(config)?;
    let broken = links::check_site_links(config, &routes);
    links::enforce(site.on_broken_links, "links", &broken)
        .context("Broken links found, see `onBrokenLinks`")?;

    if let Some(docs_dir) = config.docs_dir() {
        let broken = links::check_markdown_links(&docs_dir)?;
        links::enforce(site.on_broken_markdown_links, "markdown links", &broken)
            .context("Broken markdown links found, see `onBrokenMarkdownLinks`")?;
    }

    Ok(())
}

/// Remove the build output
pub fn clean(config: &Config) -> Result<()> {
    let cwd = env::current_dir().unwrap_or_else(|_| path::PathBuf::new());
    let destdir = dunce::canonicalize(&config.destination);
    let destdir = match destdir {
        Ok(destdir) => destdir,
        Err(e) => {
            log::debug!("No `{}` to clean", config.destination.display());
            log::debug!("{e}");
            return Ok(());
        }
    };
    let cwd = dunce::canonicalize(&cwd).unwrap_or(cwd);
    if cwd.starts_with(&destdir) {
        anyhow::bail!(
            "Attempting to delete current directory ({}), Cancelling the operation",
            destdir.display()
        );
    }

    fs::remove_dir_all(&destdir)
        .with_context(|| format!("Failed to remove {}", destdir.display()))?;

    log::info!("directory `{}` removed", destdir.display());

    Ok(())
}
