//! Site configuration
//!
//! Loaded from a TOML file such as:
//!
//! ```toml
//! template = "page.html"
//! template_dir = "templates"
//! output_dir = "out"
//!
//! [sections]
//! site_name = "My Site"
//! ```

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::CompileError;
use crate::sections::TagRegistry;

/// Name of the configuration file picked up from the working directory
pub const DEFAULT_CONFIG_FILE: &str = "snowflake.toml";

/// Configuration for a compilation run
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Top-level page template, resolved against `template_dir`
    pub template: String,

    /// Directory template names are resolved against
    pub template_dir: PathBuf,

    /// Directory output documents are written to
    pub output_dir: PathBuf,

    /// Extension stripped from input filenames
    pub source_extension: String,

    /// Extension given to output filenames
    pub output_extension: String,

    /// Static sections available to every document
    pub sections: IndexMap<String, String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            template: "page.html".to_string(),
            template_dir: PathBuf::from("."),
            output_dir: PathBuf::from("out"),
            source_extension: ".w".to_string(),
            output_extension: ".html".to_string(),
            sections: IndexMap::new(),
        }
    }
}

impl SiteConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, CompileError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| CompileError::read(path, e))?;
        Self::from_str(&content)
    }

    /// Load configuration from a TOML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, CompileError> {
        Ok(toml::from_str(content)?)
    }

    /// Set the top-level template
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }

    /// Set the template directory
    pub fn with_template_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.template_dir = dir.into();
        self
    }

    /// Set the output directory
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Set the source and output extensions
    pub fn with_extensions(
        mut self,
        source: impl Into<String>,
        output: impl Into<String>,
    ) -> Self {
        self.source_extension = source.into();
        self.output_extension = output.into();
        self
    }

    /// Add a static section
    pub fn with_section(mut self, name: impl Into<String>, content: impl Into<String>) -> Self {
        self.sections.insert(name.into(), content.into());
        self
    }

    /// Output filename for an input path
    ///
    /// Only the final path component is kept, so inputs with the same name in
    /// different directories collide; the compiler rejects that. The source
    /// extension is replaced by the output extension; without it the output
    /// extension is appended.
    pub fn output_filename(&self, input: &str) -> String {
        let name = Path::new(input)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| input.to_string());
        let stem = match name.strip_suffix(self.source_extension.as_str()) {
            Some(stem) if !self.source_extension.is_empty() => stem,
            _ => name.as_str(),
        };
        format!("{}{}", stem, self.output_extension)
    }

    /// Register the configured static sections as constant tags
    pub fn register_sections(&self, registry: &mut TagRegistry) -> Result<(), CompileError> {
        for (name, content) in &self.sections {
            registry.register_constant(name.as_str(), content.as_str())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.template, "page.html");
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.source_extension, ".w");
        assert_eq!(config.output_extension, ".html");
        assert!(config.sections.is_empty());
    }

    #[test]
    fn test_from_str_partial() {
        let config = SiteConfig::from_str(
            r#"
            template = "site.html"
            output_dir = "public"

            [sections]
            site_name = "Snowflake"
            year = "2026"
            "#,
        )
        .unwrap();
        assert_eq!(config.template, "site.html");
        assert_eq!(config.output_dir, PathBuf::from("public"));
        assert_eq!(config.template_dir, PathBuf::from("."));
        let names: Vec<&str> = config.sections.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["site_name", "year"]);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result = SiteConfig::from_str("templat = \"x\"");
        assert!(matches!(result, Err(CompileError::Config(_))));
    }

    #[test]
    fn test_builder_pattern() {
        let config = SiteConfig::new()
            .with_template("base.html")
            .with_template_dir("tpl")
            .with_output_dir("dist")
            .with_extensions(".md", ".htm")
            .with_section("a", "b");
        assert_eq!(config.template, "base.html");
        assert_eq!(config.template_dir, PathBuf::from("tpl"));
        assert_eq!(config.output_dir, PathBuf::from("dist"));
        assert_eq!(config.output_filename("x.md"), "x.htm");
        assert_eq!(config.sections.get("a").map(String::as_str), Some("b"));
    }

    #[test]
    fn test_output_filename() {
        let config = SiteConfig::default();
        assert_eq!(config.output_filename("index.w"), "index.html");
        assert_eq!(config.output_filename("about"), "about.html");
        assert_eq!(config.output_filename("notes.txt"), "notes.txt.html");
        assert_eq!(config.output_filename("pages/blog.w"), "blog.html");
    }

    #[test]
    fn test_register_sections() {
        let config = SiteConfig::new().with_section("site", "S");
        let mut registry = TagRegistry::new();
        config.register_sections(&mut registry).unwrap();
        assert_eq!(registry.seed().get("site"), Some("S"));
    }
}
