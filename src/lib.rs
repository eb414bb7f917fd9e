//! Snowflake - a static page compiler
//!
//! Input documents are split into named sections and substituted into a
//! shared page template. The page template may extend a base template and
//! override its blocks.
//!
//! # Example
//!
//! ```rust
//! use snowflake::{compile_str, MemorySource};
//!
//! let source = MemorySource::new()
//!     .with_template("base.html", "<title>{% block title %}Site{% endblock %}</title>{{body}}")
//!     .with_template("page.html", "{% extends \"base.html\" %}\n{% block title %}{{title}}{% endblock %}\n");
//!
//! let html = compile_str(&source, "page.html", "index.w", "## title\nHome\n## body\nHello\n").unwrap();
//! assert_eq!(html, "<title>Home</title>Hello");
//! ```

pub mod compiler;
pub mod config;
pub mod document;
pub mod error;
pub mod sections;
pub mod template;

pub use compiler::{Compiler, Page, Preprocessor, RenderedPage};
pub use config::{SiteConfig, DEFAULT_CONFIG_FILE};
pub use document::Document;
pub use error::CompileError;
pub use sections::{parse_sections, substitute, SectionParser, Sections, TagError, TagRegistry};
pub use template::{resolve_inheritance, FsSource, MemorySource, TemplateSource};

/// Compile one document against a template without tags or file output
///
/// The template named `template` is read from `source` and its inheritance
/// resolved; the document's literal sections are then substituted into it.
pub fn compile_str(
    source: &dyn TemplateSource,
    template: &str,
    filename: &str,
    text: &str,
) -> Result<String, CompileError> {
    let template = Document::new(template, source.read(template)?);
    let resolved = resolve_inheritance(&template, source)?;
    let sections = parse_sections(&Document::new(filename, text));
    Ok(substitute(&resolved, &sections))
}
