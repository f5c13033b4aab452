use std::fs;
use std::io::Write;
use std::path;

use crate::error::*;

const VIDYA_YML: &str = "title: My Notes
tagline: Notes worth keeping
favicon: img/favicon.ico
url: https://example.com
baseUrl: /
onBrokenLinks: throw
onBrokenMarkdownLinks: warn
i18n:
  defaultLocale: en
  locales:
    - en
presets:
  classic:
    docs:
      routeBasePath: /
    blog:
      blogTitle: Blog
      postsPerPage: ALL
      blogSidebarCount: ALL
themeConfig:
  navbar:
    title: My Notes
    items:
      - to: /blog
        label: Blog
        position: left
  footer:
    style: dark
    links:
      - title: Docs
        items:
          - label: Main Page
            to: /
          - label: Blog
            to: /blog
    copyright: \"Copyright © {{ year }} My Notes.\"
";

const CODE_JSON: &str = r#"{
  "theme.NotFound.title": {
    "message": "Page Not Found",
    "description": "The title of the 404 page"
  },
  "theme.NotFound.p1": {
    "message": "Oops! It seems this page has gone on a field trip. We'll make sure it returns with a wealth of knowledge soon.",
    "description": "The first paragraph of the 404 page"
  }
}
"#;

const INTRO_MD: &str = "# Welcome

These notes are built with vidya. Start writing in `docs/`.
";

const NOT_FOUND_SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 120 60"><text x="60" y="40" font-size="32" text-anchor="middle">404</text></svg>
"#;

pub fn create_new_project<P: AsRef<path::Path>>(dest: P) -> Result<()> {
    create_new_project_for_path(dest.as_ref())
}

pub fn create_new_project_for_path(dest: &path::Path) -> Result<()> {
    fs::create_dir_all(dest)
        .with_context(|| format!("Failed to create {}", dest.display()))?;

    create_file(dest.join(vidya_config::CONFIG_FILE), VIDYA_YML)?;

    fs::create_dir_all(dest.join("i18n/en"))?;
    create_file(dest.join("i18n/en/code.json"), CODE_JSON)?;

    fs::create_dir_all(dest.join("docs"))?;
    create_file(dest.join("docs/intro.md"), INTRO_MD)?;

    fs::create_dir_all(dest.join("static/img"))?;
    create_file(dest.join("static/img/404.svg"), NOT_FOUND_SVG)?;

    Ok(())
}

fn create_file<P: AsRef<path::Path>>(path: P, content: &str) -> Result<()> {
    create_file_for_path(path.as_ref(), content)
}

fn create_file_for_path(path: &path::Path, content: &str) -> Result<()> {
    log::trace!("Creating file {}", path.display());

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .with_context(|| format!("Failed to create file {}", path.display()))?;

    file.write_all(content.as_bytes())?;

    Ok(())
}
