//! Template inheritance - merges a child's blocks into its base template

use std::ops::Range;

use crate::document::Document;
use crate::error::CompileError;

use super::blocks::{block_content, extract_blocks, Blocks};
use super::lexer::{block_start, extends_target, END_BLOCK};
use super::source::TemplateSource;

/// Name of the base template a document extends, if any
///
/// Only a first line consisting of `{% extends "file" %}` counts.
pub fn base_name(doc: &Document) -> Option<&str> {
    doc.first_line().and_then(extends_target)
}

/// Resolve a document's inheritance
///
/// A document without an extends directive resolves to its own text. Otherwise
/// the child's blocks are spliced into a fresh read of the base template and
/// any blocks the child did not override are reduced to their default content.
/// Only one level of inheritance is followed.
pub fn resolve_inheritance(
    doc: &Document,
    source: &dyn TemplateSource,
) -> Result<String, CompileError> {
    let Some(base) = base_name(doc) else {
        return Ok(doc.text().to_string());
    };

    log::debug!("{} extends {}", doc.filename(), base);
    let blocks = extract_blocks(doc)?;
    let base_doc = Document::new(base, source.read(base)?);
    merge_blocks(&blocks, &base_doc)
}

/// Splice child blocks into a base document, then strip leftover markers
pub fn merge_blocks(blocks: &Blocks, base: &Document) -> Result<String, CompileError> {
    // Syntax errors in the base must point into the file as written.
    extract_blocks(base)?;
    let mut text = base.text().to_string();

    for (name, block) in blocks {
        match find_block(&text, name) {
            Some(range) => {
                log::debug!("overriding block '{}' in {}", name, base.filename());
                text.replace_range(range, &block.content());
            }
            None => {
                log::debug!(
                    "dropping block '{}': {} does not declare it",
                    name,
                    base.filename()
                );
            }
        }
    }

    strip_default_blocks(text, base.filename())
}

/// Replace every remaining block construct with its own content
///
/// Repeats until no complete construct is left, then drops end markers that
/// close no block, so the result carries no block markers for well-formed input.
pub fn strip_default_blocks(mut text: String, filename: &str) -> Result<String, CompileError> {
    loop {
        let blocks = extract_blocks(&Document::new(filename, text.as_str()))?;
        let mut stripped = false;

        for name in blocks.keys() {
            if let Some(range) = find_block(&text, name) {
                log::debug!("using default content for block '{}'", name);
                let content = block_content(name, &text[range.clone()]).to_string();
                text.replace_range(range, &content);
                stripped = true;
            }
        }

        if !stripped {
            if text.contains(END_BLOCK) {
                log::debug!("removing unmatched {} from {}", END_BLOCK, filename);
                text = text.replace(END_BLOCK, "");
            }
            return Ok(text);
        }
    }
}

/// Byte range of a named block construct, from its start marker through the
/// nearest end marker after it
fn find_block(text: &str, name: &str) -> Option<Range<usize>> {
    let start = text.find(&block_start(name))?;
    let end = text[start..].find(END_BLOCK)? + start + END_BLOCK.len();
    Some(start..end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::MemorySource;
    use pretty_assertions::assert_eq;

    fn resolve(child: &str, base: &str) -> String {
        let source = MemorySource::new().with_template("base.html", base);
        resolve_inheritance(&Document::new("page.html", child), &source).unwrap()
    }

    #[test]
    fn test_single_line_override() {
        let source = MemorySource::new()
            .with_template("base", "<html>{% block title %}Default{% endblock %}</html>");
        let child = Document::new(
            "page.html",
            "{% extends \"base\" %}\n{% block title %}Hello{% endblock %}",
        );
        let resolved = resolve_inheritance(&child, &source).unwrap();
        insta::assert_snapshot!(resolved, @"<html>Hello</html>");
    }

    #[test]
    fn test_no_extends_passes_through() {
        let text = "<html>{% block title %}Default{% endblock %}</html>\n";
        let doc = Document::new("page.html", text);
        let resolved = resolve_inheritance(&doc, &MemorySource::new()).unwrap();
        assert_eq!(resolved, text);
    }

    #[test]
    fn test_extends_only_on_first_line() {
        let text = "\n{% extends \"base.html\" %}\n";
        let doc = Document::new("page.html", text);
        assert_eq!(base_name(&doc), None);
        assert_eq!(resolve_inheritance(&doc, &MemorySource::new()).unwrap(), text);
    }

    #[test]
    fn test_unoverridden_blocks_use_defaults() {
        let base = "<title>{% block title %}Site{% endblock %}</title>\n\
                    <main>\n{% block body %}\nnothing here\n{% endblock %}\n</main>\n";
        let child = "{% extends \"base.html\" %}\n{% block title %}Home{% endblock %}\n";
        let resolved = resolve(child, base);
        assert_eq!(resolved, "<title>Home</title>\n<main>\n\nnothing here\n\n</main>\n");
        assert!(!resolved.contains("{% block"));
        assert!(!resolved.contains(END_BLOCK));
    }

    #[test]
    fn test_multi_line_override() {
        let base = "<main>\n{% block body %}\ndefault\n{% endblock %}\n</main>\n";
        let child = "{% extends \"base.html\" %}\n{% block body %}\n<p>{{content}}</p>\n{% endblock %}\n";
        assert_eq!(resolve(child, base), "<main>\n\n<p>{{content}}</p>\n\n</main>\n");
    }

    #[test]
    fn test_override_missing_from_base_is_dropped() {
        let base = "<html>{% block title %}T{% endblock %}</html>";
        let child = "{% extends \"base.html\" %}\n{% block sidebar %}S{% endblock %}\n";
        assert_eq!(resolve(child, base), "<html>T</html>");
    }

    #[test]
    fn test_child_text_outside_blocks_is_discarded() {
        let base = "[{% block a %}{% endblock %}]";
        let child = "{% extends \"base.html\" %}\nignored\n{% block a %}kept{% endblock %}\n";
        assert_eq!(resolve(child, base), "[kept]");
    }

    #[test]
    fn test_base_extends_is_not_followed() {
        let source = MemorySource::new()
            .with_template("base.html", "{% extends \"root.html\" %}\n{% block a %}x{% endblock %}")
            .with_template("root.html", "root");
        let child = Document::new("page.html", "{% extends \"base.html\" %}\n");
        let resolved = resolve_inheritance(&child, &source).unwrap();
        assert_eq!(resolved, "{% extends \"root.html\" %}\nx");
    }

    #[test]
    fn test_missing_base_is_read_error() {
        let child = Document::new("page.html", "{% extends \"gone.html\" %}\n");
        let err = resolve_inheritance(&child, &MemorySource::new()).unwrap_err();
        assert!(matches!(err, CompileError::Read { .. }));
    }

    #[test]
    fn test_malformed_child_block_is_fatal() {
        let child = "{% extends \"base.html\" %}\n{% block %}oops{% endblock %}\n";
        let source = MemorySource::new().with_template("base.html", "x");
        let err = resolve_inheritance(&Document::new("page.html", child), &source).unwrap_err();
        assert!(err.is_block_syntax());
    }

    #[test]
    fn test_malformed_base_block_is_fatal() {
        let base = "{% block a %}{% endblock %}\n{% block %}\n";
        let source = MemorySource::new().with_template("base.html", base);
        let mut child = String::from("{% extends \"base.html\" %}\n{% block a %}\n");
        for i in 0..30 {
            child.push_str(&format!("<p>line {}</p>\n", i));
        }
        child.push_str("{% endblock %}\n");

        let err = resolve_inheritance(&Document::new("page.html", child), &source).unwrap_err();
        match err {
            CompileError::BlockSyntax {
                file,
                line_no,
                span,
                ..
            } => {
                assert_eq!(file, "base.html");
                assert_eq!(line_no, 2);
                assert_eq!(span, 28..37);
                assert_eq!(&base[span], "{% block ");
            }
            other => panic!("Expected BlockSyntax, got {:?}", other),
        }
    }

    #[test]
    fn test_unterminated_base_directive_is_fatal() {
        let source = MemorySource::new().with_template("base.html", "<t>{% block title</t>\n");
        let child = Document::new("page.html", "{% extends \"base.html\" %}\n");
        let err = resolve_inheritance(&child, &source).unwrap_err();
        assert!(err.is_block_syntax());
    }

    #[test]
    fn test_stray_end_marker_in_base_removed() {
        let base = "<p>{% endblock %}</p>{% block a %}x{% endblock %}";
        let child = "{% extends \"base.html\" %}\n";
        let resolved = resolve(child, base);
        assert_eq!(resolved, "<p></p>x");
        assert!(!resolved.contains(END_BLOCK));
    }

    #[test]
    fn test_strip_is_idempotent() {
        let text = "a{% block x %}1{% endblock %}b{% block y %}2{% endblock %}c".to_string();
        let once = strip_default_blocks(text, "t").unwrap();
        assert_eq!(once, "a1b2c");
        assert_eq!(strip_default_blocks(once.clone(), "t").unwrap(), once);
    }
}
