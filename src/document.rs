//! Source documents

/// A named text document split into lines
///
/// Lines keep their terminators, so concatenating them yields the original text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    filename: String,
    text: String,
}

impl Document {
    /// Create a document from its filename and full text
    pub fn new(filename: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            text: text.into(),
        }
    }

    /// Filename the document was read from
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Full raw text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Lines including their trailing newline, if any
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.split_inclusive('\n')
    }

    /// Lines paired with the byte offset at which each one starts
    pub fn lines_with_offsets(&self) -> impl Iterator<Item = (usize, &str)> {
        self.lines().scan(0, |offset, line| {
            let start = *offset;
            *offset += line.len();
            Some((start, line))
        })
    }

    /// The first line, if the document is not empty
    pub fn first_line(&self) -> Option<&str> {
        self.lines().next()
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_keep_terminators() {
        let doc = Document::new("a.w", "one\ntwo\nthree");
        let lines: Vec<&str> = doc.lines().collect();
        assert_eq!(lines, vec!["one\n", "two\n", "three"]);
        assert_eq!(lines.concat(), doc.text());
    }

    #[test]
    fn test_line_offsets() {
        let doc = Document::new("a.w", "ab\ncd\n");
        let offsets: Vec<(usize, &str)> = doc.lines_with_offsets().collect();
        assert_eq!(offsets, vec![(0, "ab\n"), (3, "cd\n")]);
    }

    #[test]
    fn test_empty_document_has_no_first_line() {
        let doc = Document::new("empty.w", "");
        assert_eq!(doc.first_line(), None);
        assert_eq!(doc.lines().count(), 0);
    }
}
