//! Placeholder substitution

use super::parser::Sections;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Replace every `{{name}}` placeholder with the content of section `name`
///
/// Substitution is a single literal pass over the template: inserted content
/// is never scanned for placeholders, and placeholders naming unknown sections
/// are left untouched. A placeholder ends at the first `}}` after its `{{`,
/// so a section whose name contains `}}` is never substituted.
pub fn substitute(template: &str, sections: &Sections) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find(OPEN) {
        out.push_str(&rest[..open]);
        let after_open = &rest[open + OPEN.len()..];

        let content = after_open
            .find(CLOSE)
            .and_then(|close| Some((close, sections.get(&after_open[..close])?)));

        match content {
            Some((close, content)) => {
                out.push_str(content);
                rest = &after_open[close + CLOSE.len()..];
            }
            None => {
                // Not a known placeholder: emit one brace and rescan from the next.
                out.push('{');
                rest = &rest[open + 1..];
            }
        }
    }

    out.push_str(rest);
    out
}
