//! Section parsing
//!
//! A document is split into sections by delimiter lines:
//!
//! ```text
//! ## title
//! About us
//! ## body
//! <p>We make pages.</p>
//! ```

use indexmap::IndexMap;

use crate::document::Document;

use super::registry::TagRegistry;

/// Section holding text that precedes the first delimiter
pub const NO_SECTION: &str = "__nosection__";

/// Section holding the source document's filename
pub const FILENAME_SECTION: &str = "__filename__";

/// Prefix of a section delimiter line
pub const SECTION_DELIMITER: &str = "##";

/// Named sections of a document, in insertion order
///
/// Inserting an existing name replaces its content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sections {
    entries: IndexMap<String, String>,
}

impl Sections {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, content: impl Into<String>) {
        self.entries.insert(name.into(), content.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Sections {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut sections = Sections::new();
        for (name, content) in iter {
            sections.insert(name, content);
        }
        sections
    }
}

/// Splits documents into sections, optionally seeded by tag functions
#[derive(Debug, Clone, Copy)]
pub struct SectionParser<'r> {
    registry: Option<&'r TagRegistry>,
}

impl SectionParser<'static> {
    /// A parser that only reads literal sections
    pub fn new() -> Self {
        Self { registry: None }
    }
}

impl Default for SectionParser<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'r> SectionParser<'r> {
    /// A parser that can seed computed sections from `registry`
    pub fn with_registry(registry: &'r TagRegistry) -> Self {
        Self {
            registry: Some(registry),
        }
    }

    /// Parse a document into sections
    ///
    /// With `seed` set, tag functions run first; literal sections parsed
    /// afterwards replace tag output of the same name.
    pub fn parse(&self, doc: &Document, seed: bool) -> Sections {
        let mut sections = match self.registry {
            Some(registry) if seed => registry.seed(),
            _ => Sections::new(),
        };

        let mut name = NO_SECTION.to_string();
        let mut buffer = String::new();

        for line in doc.lines() {
            if let Some(rest) = line.strip_prefix(SECTION_DELIMITER) {
                sections.insert(std::mem::take(&mut name), buffer.trim());
                buffer.clear();
                name = rest.trim().to_string();
            } else {
                buffer.push_str(line);
            }
        }
        sections.insert(name, buffer.trim());

        sections.insert(FILENAME_SECTION, doc.filename());
        log::trace!("{}: parsed {} sections", doc.filename(), sections.len());
        sections
    }
}

/// Parse a document's literal sections without tag seeding
pub fn parse_sections(doc: &Document) -> Sections {
    SectionParser::new().parse(doc, false)
}
