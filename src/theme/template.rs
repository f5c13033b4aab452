use std::fmt;
use std::path;

use crate::error::*;

/// Liquid parser shared by every template of a build
pub struct Liquid {
    parser: liquid::Parser,
}

impl Liquid {
    pub fn new() -> Result<Self> {
        let parser = liquid::ParserBuilder::with_stdlib()
            .filter(liquid_lib::jekyll::Slugify)
            .filter(liquid_lib::shopify::Pluralize)
            .filter(liquid_lib::extra::DateInTz)
            .build()?;
        Ok(Self { parser })
    }

    pub fn parse(&self, template: &str) -> Result<liquid::Template> {
        let template = self.parser.parse(template)?;
        Ok(template)
    }

    pub fn parse_file(&self, path: &path::Path) -> Result<liquid::Template> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read template {}", path.display()))?;
        self.parse(&content)
            .with_context(|| format!("Failed to parse template {}", path.display()))
    }
}

impl fmt::Debug for Liquid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Liquid{{}}")
    }
}

/// Render `template` with `globals` serialized as its top-level variables
pub fn render<T: serde::Serialize>(template: &liquid::Template, globals: &T) -> Result<String> {
    let globals = liquid::model::to_object(globals)?;
    let rendered = template.render(&globals)?;
    Ok(rendered)
}

#[cfg(test)]
mod test {
    use super::*;

    #[derive(serde::Serialize)]
    struct Globals<'s> {
        name: &'s str,
    }

    #[test]
    fn renders_serialized_globals() {
        let liquid = Liquid::new().unwrap();
        let template = liquid.parse("Hello {{ name | escape }}!").unwrap();
        let actual = render(&template, &Globals { name: "<world>" }).unwrap();
        assert_eq!(actual, "Hello &lt;world&gt;!");
    }

    #[test]
    fn slugify_is_available() {
        let liquid = Liquid::new().unwrap();
        let template = liquid.parse("{{ name | slugify }}").unwrap();
        let actual = render(&template, &Globals { name: "All our posts" }).unwrap();
        assert_eq!(actual, "all-our-posts");
    }

    #[test]
    fn parse_error() {
        let liquid = Liquid::new().unwrap();
        assert!(liquid.parse("{% if %}").is_err());
    }
}
